pub mod auth_flow;
pub mod booking_form;
pub mod driver_board;
pub mod notice;
pub mod qr_upload;
pub mod review_board;
pub mod ride_board;

#[cfg(test)]
mod workflow_tests;

pub use auth_flow::{Landing, LoginForm, RegisterForm};
pub use booking_form::BookingForm;
pub use driver_board::{DriverBoard, DRIVER_TABS};
pub use notice::{Notice, NoticeLevel};
pub use qr_upload::QrUpload;
pub use review_board::{ReviewBoard, ReviewTab, REVIEW_TABS};
pub use ride_board::RideBoard;
