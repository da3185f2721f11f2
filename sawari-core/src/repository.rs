use async_trait::async_trait;

use crate::booking::{Booking, BookingSubmission, ReviewAction};
use crate::media::ImageFile;
use crate::ride::{NewRide, Ride};
use crate::user::{LoginOutcome, LoginRequest, RegisterRequest};
use crate::GatewayResult;

/// Gateway for ride data access. Mutating calls return the server's
/// confirmation message.
#[async_trait]
pub trait RideGateway: Send + Sync {
    async fn list_rides(&self) -> GatewayResult<Vec<Ride>>;

    async fn rides_by_driver(&self, driver_id: &str) -> GatewayResult<Vec<Ride>>;

    async fn create_ride(&self, payload: &NewRide) -> GatewayResult<String>;
}

/// Gateway for booking data access and driver review actions.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn bookings_for_ride(&self, ride_id: &str) -> GatewayResult<Vec<Booking>>;

    async fn create_booking(&self, submission: &BookingSubmission) -> GatewayResult<String>;

    async fn review_booking(&self, booking_id: &str, action: ReviewAction) -> GatewayResult<String>;
}

/// Gateway for account operations and the driver's payment QR upload.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginOutcome>;

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<String>;

    async fn upload_qr(&self, image: &ImageFile) -> GatewayResult<String>;
}
