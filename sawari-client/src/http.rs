use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;

use sawari_core::booking::{Booking, BookingSubmission, ReviewAction};
use sawari_core::media::{resolve_image_url, ImageFile};
use sawari_core::repository::{AuthGateway, BookingGateway, RideGateway};
use sawari_core::ride::{NewRide, Ride};
use sawari_core::user::{LoginData, LoginOutcome, LoginRequest, RegisterRequest};
use sawari_core::{GatewayError, GatewayResult};

use crate::app_config::ApiConfig;
use crate::envelope::ApiEnvelope;
use crate::session::Session;

/// Thin request wrapper over the backend's JSON API.
///
/// Implements the core gateway traits; screens talk to the traits, never to
/// this type directly. The bearer token, when present, is attached to every
/// outgoing request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    image_base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.clone(),
            token: RwLock::new(None),
        })
    }

    /// Session init: subsequent requests carry `Authorization: Bearer <token>`.
    pub fn attach_session(&self, session: &Session) {
        match self.token.write() {
            Ok(mut guard) => *guard = Some(session.token().to_string()),
            Err(poisoned) => *poisoned.into_inner() = Some(session.token().to_string()),
        }
    }

    /// Logout teardown: the token is discarded, not persisted anywhere.
    pub fn clear_session(&self) {
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Screenshot paths come back relative; resolve against the image base.
    pub fn payment_proof_url(&self, stored_path: &str) -> String {
        resolve_image_url(&self.image_base_url, stored_path)
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a prepared request and decode the `{success, message, data}`
    /// envelope. Error bodies still carry the envelope, so the server's own
    /// message survives non-2xx statuses where possible.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> GatewayResult<ApiEnvelope<T>> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        match serde_json::from_str::<ApiEnvelope<T>>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => {
                Err(GatewayError::Transport(format!("HTTP {status}")))
            }
            Err(e) => Err(GatewayError::Decode(e.to_string())),
        }
    }

    fn image_part(image: &ImageFile) -> GatewayResult<multipart::Part> {
        multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}

#[async_trait]
impl RideGateway for ApiClient {
    async fn list_rides(&self) -> GatewayResult<Vec<Ride>> {
        tracing::debug!("GET /rides");
        let envelope: ApiEnvelope<Vec<Ride>> = self.send(self.http.get(self.url("/rides"))).await?;
        envelope.into_data_or_default()
    }

    async fn rides_by_driver(&self, driver_id: &str) -> GatewayResult<Vec<Ride>> {
        tracing::debug!(driver_id, "GET /rides/{{driverId}}");
        let envelope: ApiEnvelope<Vec<Ride>> = self
            .send(self.http.get(self.url(&format!("/rides/{driver_id}"))))
            .await?;
        envelope.into_data_or_default()
    }

    async fn create_ride(&self, payload: &NewRide) -> GatewayResult<String> {
        tracing::debug!(from = %payload.from, to = %payload.to, "POST /rides");
        let envelope: ApiEnvelope<serde_json::Value> = self
            .send(self.http.post(self.url("/rides")).json(payload))
            .await?;
        envelope.into_message()
    }
}

#[async_trait]
impl BookingGateway for ApiClient {
    async fn bookings_for_ride(&self, ride_id: &str) -> GatewayResult<Vec<Booking>> {
        tracing::debug!(ride_id, "GET /book/{{rideId}}");
        let envelope: ApiEnvelope<Vec<Booking>> = self
            .send(self.http.get(self.url(&format!("/book/{ride_id}"))))
            .await?;
        envelope.into_data_or_default()
    }

    async fn create_booking(&self, submission: &BookingSubmission) -> GatewayResult<String> {
        tracing::debug!(ride_id = %submission.ride_id, seats = submission.total_seats, "POST /book");
        let form = multipart::Form::new()
            .text("rideId", submission.ride_id.clone())
            .text("pickup", submission.pickup.clone())
            .text("drop", submission.drop_location.clone())
            .text("maleSeats", submission.seats.male.to_string())
            .text("femaleSeats", submission.seats.female.to_string())
            .text("totalSeats", submission.total_seats.to_string())
            .text("totalFare", submission.total_fare.to_string())
            .part("paymentScreenshot", Self::image_part(&submission.screenshot)?);

        let envelope: ApiEnvelope<serde_json::Value> = self
            .send(self.http.post(self.url("/book")).multipart(form))
            .await?;
        envelope.into_message()
    }

    async fn review_booking(&self, booking_id: &str, action: ReviewAction) -> GatewayResult<String> {
        tracing::debug!(booking_id, action = action.as_str(), "PUT /book/confirm/{{bookingId}}");
        let body = serde_json::json!({ "action": action.as_str() });
        let envelope: ApiEnvelope<serde_json::Value> = self
            .send(
                self.http
                    .put(self.url(&format!("/book/confirm/{booking_id}")))
                    .json(&body),
            )
            .await?;
        envelope.into_message()
    }
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, request: &LoginRequest) -> GatewayResult<LoginOutcome> {
        tracing::debug!(email = %request.email, "POST /auth/login");
        let envelope: ApiEnvelope<LoginData> = self
            .send(self.http.post(self.url("/auth/login")).json(request))
            .await?;
        let (data, message) = envelope.into_result()?;
        let data = data.ok_or_else(|| GatewayError::Decode("login response missing data".into()))?;
        Ok(LoginOutcome { message, user: data.user, token: data.token })
    }

    async fn register(&self, request: &RegisterRequest) -> GatewayResult<String> {
        tracing::debug!(email = %request.email, "POST /auth/register");
        let envelope: ApiEnvelope<serde_json::Value> = self
            .send(self.http.post(self.url("/auth/register")).json(request))
            .await?;
        envelope.into_message()
    }

    async fn upload_qr(&self, image: &ImageFile) -> GatewayResult<String> {
        tracing::debug!(file = %image.file_name, "POST /auth/add-qr");
        let form = multipart::Form::new().part("qrCode", Self::image_part(image)?);
        let envelope: ApiEnvelope<serde_json::Value> = self
            .send(self.http.post(self.url("/auth/add-qr")).multipart(form))
            .await?;
        envelope.into_message()
    }
}
