use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::ImageFile;

/// Per-gender seat cap enforced on the booking form.
pub const MAX_SEATS_EACH: u32 = 6;

/// Booking lifecycle as observed by this client. Lowercase on the wire.
///
/// `pending → confirmed | rejected` happen through explicit driver review;
/// `pending → completed` is a server-side transition we only ever read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Rejected => "rejected",
        }
    }
}

/// Seat counts split by gender, summed for totals and fare.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSplit {
    #[serde(default)]
    pub male: u32,
    #[serde(default)]
    pub female: u32,
}

impl SeatSplit {
    pub fn total(&self) -> u32 {
        self.male + self.female
    }

    pub fn fare_at(&self, rate: f64) -> f64 {
        f64::from(self.total()) * rate
    }
}

/// Two-decimal display of a fare amount.
pub fn format_fare(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Rider reference as populated into a booking's `userId` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiderRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A rider's request to occupy seats on a ride, with manual payment proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub ride_id: String,
    #[serde(rename = "userId")]
    pub rider: RiderRef,
    pub pickup: String,
    #[serde(rename = "drop")]
    pub drop_location: String,
    pub seats: SeatSplit,
    pub total_seats: u32,
    pub total_fare: f64,
    #[serde(default)]
    pub payment_screenshot_url: Option<String>,
    pub ride_status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Driver decision on a pending booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Confirm,
    Reject,
}

impl ReviewAction {
    /// Wire value for `PUT /book/confirm/{id}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Confirm => "confirm",
            ReviewAction::Reject => "reject",
        }
    }
}

/// A ride's bookings partitioned by status.
///
/// The four groups are disjoint and their union is the input list. The review
/// screen only exposes pending/confirmed/rejected as tabs; completed is still
/// tracked here.
#[derive(Debug, Clone, Default)]
pub struct BookingGroups {
    pub pending: Vec<Booking>,
    pub confirmed: Vec<Booking>,
    pub completed: Vec<Booking>,
    pub rejected: Vec<Booking>,
}

impl BookingGroups {
    pub fn partition(bookings: Vec<Booking>) -> Self {
        let mut groups = Self::default();
        for booking in bookings {
            match booking.ride_status {
                BookingStatus::Pending => groups.pending.push(booking),
                BookingStatus::Confirmed => groups.confirmed.push(booking),
                BookingStatus::Completed => groups.completed.push(booking),
                BookingStatus::Rejected => groups.rejected.push(booking),
            }
        }
        groups
    }

    pub fn by_status(&self, status: BookingStatus) -> &[Booking] {
        match status {
            BookingStatus::Pending => &self.pending,
            BookingStatus::Confirmed => &self.confirmed,
            BookingStatus::Completed => &self.completed,
            BookingStatus::Rejected => &self.rejected,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.confirmed.len() + self.completed.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fully validated booking ready for the multipart `POST /book`.
#[derive(Debug, Clone)]
pub struct BookingSubmission {
    pub ride_id: String,
    pub pickup: String,
    pub drop_location: String,
    pub seats: SeatSplit,
    pub total_seats: u32,
    pub total_fare: f64,
    pub screenshot: ImageFile,
}
