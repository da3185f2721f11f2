use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ride lifecycle as reported by the backend. Lowercase on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Active,
    Ongoing,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Active => "active",
            RideStatus::Ongoing => "ongoing",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub model: String,
    pub number: String,
}

/// Driver reference as populated into a ride's `driverId` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A driver-offered trip with fixed seats and fare.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    #[serde(rename = "_id")]
    pub id: String,
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    pub departure_time: String,
    pub arrival_time: String,
    pub fare: f64,
    pub seats_available: u32,
    pub vehicle: Vehicle,
    #[serde(rename = "driverId")]
    pub driver: DriverRef,
    pub status: RideStatus,
}

impl Ride {
    /// Localized `DD/MM/YYYY` rendering; storage stays ISO.
    pub fn display_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

/// Creation payload for `POST /rides`. Vehicle fields arrive nested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRide {
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    pub departure_time: String,
    pub arrival_time: String,
    pub fare: f64,
    pub seats_available: u32,
    pub vehicle: Vehicle,
    #[serde(rename = "driverId")]
    pub driver_id: String,
}
