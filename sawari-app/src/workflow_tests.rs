use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use sawari_core::booking::{
    Booking, BookingStatus, BookingSubmission, ReviewAction, RiderRef, SeatSplit,
};
use sawari_core::media::ImageFile;
use sawari_core::repository::{AuthGateway, BookingGateway, RideGateway};
use sawari_core::ride::{DriverRef, NewRide, Ride, RideStatus, Vehicle};
use sawari_core::user::{LoginOutcome, LoginRequest, RegisterRequest, Role, User};
use sawari_core::validate::{RideDraftValues, SEAT_MINIMUM_ERROR};
use sawari_core::{GatewayError, GatewayResult};

use crate::auth_flow::{landing_for, Landing, LoginForm, RegisterForm};
use crate::booking_form::BookingForm;
use crate::driver_board::DriverBoard;
use crate::notice::NoticeLevel;
use crate::qr_upload::QrUpload;
use crate::review_board::{ReviewBoard, ReviewTab};
use crate::ride_board::RideBoard;

fn ride(id: &str, from: &str, to: &str, driver: &str, fare: f64, status: RideStatus) -> Ride {
    Ride {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        departure_time: "06:30".to_string(),
        arrival_time: "10:00".to_string(),
        fare,
        seats_available: 4,
        vehicle: Vehicle { model: "Swift".to_string(), number: "MH12AB1234".to_string() },
        driver: DriverRef { id: "d1".to_string(), name: driver.to_string(), phone: None },
        status,
    }
}

fn booking(id: &str, status: BookingStatus) -> Booking {
    Booking {
        id: id.to_string(),
        ride_id: "ride-1".to_string(),
        rider: RiderRef { id: "u1".to_string(), name: Some("Asha".to_string()), phone: None },
        pickup: "Pune".to_string(),
        drop_location: "Mumbai".to_string(),
        seats: SeatSplit { male: 1, female: 0 },
        total_seats: 1,
        total_fare: 100.0,
        payment_screenshot_url: Some("proofs/one.png".to_string()),
        ride_status: status,
        created_at: Utc::now(),
    }
}

fn screenshot() -> ImageFile {
    ImageFile::new("proof.png", "image/png", vec![0x89, 0x50])
}

#[derive(Default)]
struct FakeRides {
    rides: Mutex<Vec<Ride>>,
    create_calls: AtomicUsize,
    fail_create: bool,
}

#[async_trait]
impl RideGateway for FakeRides {
    async fn list_rides(&self) -> GatewayResult<Vec<Ride>> {
        Ok(self.rides.lock().unwrap().clone())
    }

    async fn rides_by_driver(&self, _driver_id: &str) -> GatewayResult<Vec<Ride>> {
        Ok(self.rides.lock().unwrap().clone())
    }

    async fn create_ride(&self, payload: &NewRide) -> GatewayResult<String> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(GatewayError::Rejected("Ride could not be created".to_string()));
        }
        self.rides.lock().unwrap().push(ride(
            "created",
            &payload.from,
            &payload.to,
            "Raj",
            payload.fare,
            RideStatus::Active,
        ));
        Ok("Ride created".to_string())
    }
}

#[derive(Default)]
struct FakeBookings {
    bookings: Mutex<Vec<Booking>>,
    create_calls: AtomicUsize,
    last_submission: Mutex<Option<BookingSubmission>>,
    fail_create: bool,
}

#[async_trait]
impl BookingGateway for FakeBookings {
    async fn bookings_for_ride(&self, _ride_id: &str) -> GatewayResult<Vec<Booking>> {
        Ok(self.bookings.lock().unwrap().clone())
    }

    async fn create_booking(&self, submission: &BookingSubmission) -> GatewayResult<String> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(GatewayError::Rejected("Ride is already full".to_string()));
        }
        *self.last_submission.lock().unwrap() = Some(submission.clone());
        Ok("Booking created".to_string())
    }

    async fn review_booking(&self, booking_id: &str, action: ReviewAction) -> GatewayResult<String> {
        let mut bookings = self.bookings.lock().unwrap();
        let Some(entry) = bookings.iter_mut().find(|b| b.id == booking_id) else {
            return Err(GatewayError::Rejected("Booking not found".to_string()));
        };
        entry.ride_status = match action {
            ReviewAction::Confirm => BookingStatus::Confirmed,
            ReviewAction::Reject => BookingStatus::Rejected,
        };
        Ok(format!("Booking {}", entry.ride_status.as_str()))
    }
}

#[derive(Default)]
struct FakeAuth {
    upload_calls: AtomicUsize,
    login_outcome: Option<LoginOutcome>,
}

#[async_trait]
impl AuthGateway for FakeAuth {
    async fn login(&self, _request: &LoginRequest) -> GatewayResult<LoginOutcome> {
        match &self.login_outcome {
            Some(outcome) => Ok(outcome.clone()),
            None => Err(GatewayError::Rejected("Invalid credentials".to_string())),
        }
    }

    async fn register(&self, _request: &RegisterRequest) -> GatewayResult<String> {
        Ok("Registered".to_string())
    }

    async fn upload_qr(&self, _image: &ImageFile) -> GatewayResult<String> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        Ok("QR uploaded".to_string())
    }
}

#[tokio::test]
async fn ride_board_filters_fetched_rides() {
    let gateway = FakeRides {
        rides: Mutex::new(vec![ride("r1", "Pune", "Mumbai", "Raj", 450.0, RideStatus::Active)]),
        ..FakeRides::default()
    };
    let mut board = RideBoard::new();
    board.refresh(&gateway).await;
    board.set_search("mumbai");
    assert_eq!(board.visible().len(), 1);

    board.set_search("goa");
    assert!(board.is_empty());
}

#[tokio::test]
async fn stale_fetch_result_is_discarded() {
    let mut board = RideBoard::new();
    let first = board.begin_refresh();
    let second = board.begin_refresh();

    // First fetch returns after it was superseded; latest wins.
    let applied = board.finish_refresh(
        first,
        Ok(vec![ride("old", "Satara", "Pune", "Vikram", 200.0, RideStatus::Active)]),
    );
    assert!(!applied);
    assert!(board.is_loading());

    board.finish_refresh(
        second,
        Ok(vec![ride("new", "Pune", "Mumbai", "Raj", 450.0, RideStatus::Active)]),
    );
    assert!(!board.is_loading());
    assert_eq!(board.visible().len(), 1);
    assert_eq!(board.visible()[0].id, "new");
}

#[tokio::test]
async fn fetch_failure_becomes_notice_not_panic() {
    let mut board = RideBoard::new();
    let ticket = board.begin_refresh();
    board.finish_refresh(ticket, Err(GatewayError::Transport("timeout".to_string())));
    let notice = board.notice.as_ref().expect("error notice");
    assert!(notice.is_error());
}

#[tokio::test]
async fn booking_form_derives_totals_and_enables_submit() {
    let selected = ride("r1", "Pune", "Mumbai", "Raj", 100.0, RideStatus::Active);
    let mut form = BookingForm::open(selected);

    // Prefilled from the ride's endpoints.
    assert_eq!(form.values.pickup, "Pune");
    assert_eq!(form.values.drop_location, "Mumbai");
    assert!(!form.can_submit());

    form.set_male_seats(2);
    form.set_female_seats(1);
    assert_eq!(form.total_seats(), 3);
    assert_eq!(form.fare_display(), "300.00");
    assert!(form.can_submit());
}

#[tokio::test]
async fn zero_seats_blocks_submit_with_combined_error() {
    let selected = ride("r1", "Pune", "Mumbai", "Raj", 100.0, RideStatus::Active);
    let mut form = BookingForm::open(selected);
    form.set_male_seats(0);
    form.set_female_seats(0);

    assert!(!form.can_submit());
    assert_eq!(form.report.form_errors, vec![SEAT_MINIMUM_ERROR.to_string()]);

    let gateway = FakeBookings::default();
    form.submit(&gateway).await;
    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 0);
    assert!(!form.is_closed());
}

#[tokio::test]
async fn missing_screenshot_blocks_submission_without_a_request() {
    let selected = ride("r1", "Pune", "Mumbai", "Raj", 100.0, RideStatus::Active);
    let mut form = BookingForm::open(selected);
    form.set_male_seats(2);

    let gateway = FakeBookings::default();
    form.submit(&gateway).await;

    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 0);
    assert!(form.report.field("paymentScreenshot").is_some());
    assert!(!form.is_closed());
}

#[tokio::test]
async fn successful_booking_closes_form_with_server_message() {
    let selected = ride("r1", "Pune", "Mumbai", "Raj", 100.0, RideStatus::Active);
    let mut form = BookingForm::open(selected);
    form.set_male_seats(2);
    form.set_female_seats(1);
    form.stage_screenshot(screenshot());

    let gateway = FakeBookings::default();
    form.submit(&gateway).await;

    assert!(form.is_closed());
    let notice = form.notice.as_ref().expect("success notice");
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Booking created");

    let sent = gateway.last_submission.lock().unwrap().clone().expect("submission sent");
    assert_eq!(sent.total_seats, 3);
    assert_eq!(sent.total_fare, 300.0);
    assert_eq!(sent.screenshot.file_name, "proof.png");
}

#[tokio::test]
async fn failed_booking_keeps_form_open_with_server_message() {
    let selected = ride("r1", "Pune", "Mumbai", "Raj", 100.0, RideStatus::Active);
    let mut form = BookingForm::open(selected);
    form.set_female_seats(1);
    form.stage_screenshot(screenshot());

    let gateway = FakeBookings { fail_create: true, ..FakeBookings::default() };
    form.submit(&gateway).await;

    assert!(!form.is_closed());
    let notice = form.notice.as_ref().expect("error notice");
    assert!(notice.is_error());
    assert_eq!(notice.message, "Ride is already full");
}

#[tokio::test]
async fn invalid_draft_stays_local() {
    let gateway = FakeRides::default();
    let mut board = DriverBoard::new("d1");
    board.submit_draft(&gateway).await;

    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 0);
    assert!(board.draft_report.field("from").is_some());
}

#[tokio::test]
async fn ride_creation_resets_draft_and_refreshes() {
    let gateway = FakeRides::default();
    let mut board = DriverBoard::new("d1");
    board.draft = RideDraftValues {
        from: "Pune".to_string(),
        to: "Nashik".to_string(),
        date: "2026-10-02".to_string(),
        departure_time: "07:00".to_string(),
        arrival_time: "11:30".to_string(),
        fare: "350".to_string(),
        seats_available: "3".to_string(),
        vehicle_model: "Ertiga".to_string(),
        vehicle_number: "MH14XY9876".to_string(),
    };

    board.submit_draft(&gateway).await;

    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 1);
    assert!(board.draft.from.is_empty(), "draft resets on success");
    assert_eq!(board.visible().len(), 1, "list refreshed with the new ride");
    let notice = board.notice.as_ref().expect("success notice");
    assert_eq!(notice.message, "Ride created");
}

#[tokio::test]
async fn driver_tabs_narrow_by_status() {
    let gateway = FakeRides {
        rides: Mutex::new(vec![
            ride("r1", "Pune", "Mumbai", "Raj", 450.0, RideStatus::Active),
            ride("r2", "Pune", "Nashik", "Raj", 300.0, RideStatus::Completed),
        ]),
        ..FakeRides::default()
    };
    let mut board = DriverBoard::new("d1");
    board.refresh(&gateway).await;

    assert_eq!(board.visible().len(), 2);
    board.select_tab(Some(RideStatus::Completed));
    assert_eq!(board.visible().len(), 1);
    assert_eq!(board.visible()[0].id, "r2");
}

#[tokio::test]
async fn review_board_groups_one_booking_per_tab() {
    let gateway = FakeBookings {
        bookings: Mutex::new(vec![
            booking("b1", BookingStatus::Pending),
            booking("b2", BookingStatus::Confirmed),
            booking("b3", BookingStatus::Rejected),
        ]),
        ..FakeBookings::default()
    };
    let mut board = ReviewBoard::new("ride-1", "http://localhost:5000/uploads");
    board.refresh(&gateway).await;

    assert_eq!(board.visible().len(), 1, "pending tab default");
    board.select_tab(ReviewTab::Confirmed);
    assert_eq!(board.visible().len(), 1);
    board.select_tab(ReviewTab::Rejected);
    assert_eq!(board.visible().len(), 1);
}

#[tokio::test]
async fn confirming_a_pending_booking_empties_the_pending_tab() {
    let gateway = FakeBookings {
        bookings: Mutex::new(vec![booking("b1", BookingStatus::Pending)]),
        ..FakeBookings::default()
    };
    let mut board = ReviewBoard::new("ride-1", "http://localhost:5000/uploads");
    board.refresh(&gateway).await;

    let pending = board.visible()[0].clone();
    board.open_review(&pending);
    let surface = board.surface().expect("surface open");
    assert_eq!(surface.image_url, "http://localhost:5000/uploads/proofs/one.png");

    board.resolve(ReviewAction::Confirm, &gateway).await;

    assert!(board.surface().is_none(), "surface closes on success");
    assert!(board.visible().is_empty(), "pending tab empties after refetch");
    board.select_tab(ReviewTab::Confirmed);
    assert_eq!(board.visible().len(), 1);
}

#[tokio::test]
async fn booking_without_proof_opens_no_surface() {
    let mut no_proof = booking("b1", BookingStatus::Pending);
    no_proof.payment_screenshot_url = None;

    let mut board = ReviewBoard::new("ride-1", "http://localhost:5000/uploads");
    board.open_review(&no_proof);
    assert!(board.surface().is_none());
}

#[tokio::test]
async fn login_routes_session_by_role() {
    let gateway = FakeAuth {
        login_outcome: Some(LoginOutcome {
            message: "Login successful".to_string(),
            user: User {
                id: "d1".to_string(),
                name: "Raj".to_string(),
                email: None,
                phone: None,
                role: Role::Driver,
            },
            token: "jwt-token".to_string(),
        }),
        ..FakeAuth::default()
    };

    let mut form = LoginForm::new();
    form.values.email = "raj@example.com".to_string();
    form.values.password = "secret1".to_string();
    form.submit(&gateway).await;

    let outcome = form.outcome().expect("login outcome");
    assert_eq!(landing_for(outcome.user.role), Landing::DriverBoard);
    assert_eq!(form.notice.as_ref().expect("notice").message, "Login successful");
}

#[tokio::test]
async fn invalid_login_fields_never_reach_the_gateway() {
    let gateway = FakeAuth::default();
    let mut form = LoginForm::new();
    form.values.email = "not-an-email".to_string();
    form.values.password = "123".to_string();
    form.submit(&gateway).await;

    assert!(form.outcome().is_none());
    assert!(form.notice.is_none(), "validation errors stay inline");
    assert_eq!(form.report.field("email"), Some("Invalid email address"));
}

#[tokio::test]
async fn rejected_login_surfaces_server_message() {
    let gateway = FakeAuth::default();
    let mut form = LoginForm::new();
    form.values.email = "raj@example.com".to_string();
    form.values.password = "wrong-password".to_string();
    form.submit(&gateway).await;

    assert!(form.outcome().is_none());
    assert_eq!(form.notice.as_ref().expect("notice").message, "Invalid credentials");
}

#[tokio::test]
async fn registration_round_trip() {
    let gateway = FakeAuth::default();
    let mut form = RegisterForm::new();
    form.values.name = "Asha".to_string();
    form.values.email = "asha@example.com".to_string();
    form.values.phone = "8390426319".to_string();
    form.values.password = "secret1".to_string();
    form.submit(&gateway).await;

    assert!(form.is_registered());
    assert_eq!(form.notice.as_ref().expect("notice").message, "Registered");
}

#[tokio::test]
async fn qr_upload_requires_a_staged_image() {
    let gateway = FakeAuth::default();
    let mut upload = QrUpload::new();
    upload.upload(&gateway).await;

    assert_eq!(gateway.upload_calls.load(Ordering::SeqCst), 0);
    let notice = upload.notice.as_ref().expect("notice");
    assert!(notice.is_error());
    assert_eq!(notice.message, "Please select an image first.");
}

#[tokio::test]
async fn qr_upload_sends_staged_image_once() {
    let gateway = FakeAuth::default();
    let mut upload = QrUpload::new();
    upload.stage(ImageFile::new("upi-qr.png", "image/png", vec![1, 2]));

    upload.upload(&gateway).await;

    assert_eq!(gateway.upload_calls.load(Ordering::SeqCst), 1);
    assert!(upload.is_closed());
    let notice = upload.notice.as_ref().expect("notice");
    assert_eq!(notice.message, "QR uploaded");
}
