use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::booking::{BookingSubmission, SeatSplit, MAX_SEATS_EACH};
use crate::media::ImageFile;
use crate::ride::{NewRide, Ride, Vehicle};

/// Outcome of validating one form: per-field messages plus whole-form
/// messages for cross-field rules. Field errors stay inline in the UI and are
/// never sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub field_errors: BTreeMap<&'static str, String>,
    pub form_errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.field_errors.is_empty() && self.form_errors.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.field_errors.get(name).map(String::as_str)
    }

    fn require_field(&mut self, name: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.field_errors.insert(name, message.to_string());
        }
    }

    fn single_field(name: &'static str, message: &str) -> Self {
        let mut report = Self::default();
        report.field_errors.insert(name, message.to_string());
        report
    }
}

pub const SEAT_MINIMUM_ERROR: &str = "At least 1 seat (male or female) is required";
pub const SEAT_MAXIMUM_ERROR: &str = "Max 6 seats allowed";
pub const SCREENSHOT_REQUIRED_ERROR: &str = "Payment screenshot is required";
pub const SCREENSHOT_NOT_IMAGE_ERROR: &str = "Payment screenshot must be an image";

/// Current field values of the booking form.
#[derive(Debug, Clone, Default)]
pub struct BookingFormValues {
    pub pickup: String,
    pub drop_location: String,
    pub male_seats: u32,
    pub female_seats: u32,
    pub screenshot: Option<ImageFile>,
}

impl BookingFormValues {
    pub fn seats(&self) -> SeatSplit {
        SeatSplit { male: self.male_seats, female: self.female_seats }
    }

    /// Validate and package the form for `POST /book` against the selected
    /// ride. Totals are derived here, never taken from the caller.
    pub fn to_submission(&self, ride: &Ride) -> Result<BookingSubmission, ValidationReport> {
        let report = validate_booking_form(self);
        if !report.is_ok() {
            return Err(report);
        }
        let screenshot = self
            .screenshot
            .clone()
            .ok_or_else(|| ValidationReport::single_field("paymentScreenshot", SCREENSHOT_REQUIRED_ERROR))?;

        let seats = self.seats();
        Ok(BookingSubmission {
            ride_id: ride.id.clone(),
            pickup: self.pickup.trim().to_string(),
            drop_location: self.drop_location.trim().to_string(),
            seats,
            total_seats: seats.total(),
            total_fare: seats.fare_at(ride.fare),
            screenshot,
        })
    }
}

pub fn validate_booking_form(values: &BookingFormValues) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.require_field("pickup", &values.pickup, "Pickup location is required");
    report.require_field("drop", &values.drop_location, "Drop location is required");

    if values.male_seats > MAX_SEATS_EACH {
        report.field_errors.insert("maleSeats", SEAT_MAXIMUM_ERROR.to_string());
    }
    if values.female_seats > MAX_SEATS_EACH {
        report.field_errors.insert("femaleSeats", SEAT_MAXIMUM_ERROR.to_string());
    }

    match &values.screenshot {
        None => {
            report
                .field_errors
                .insert("paymentScreenshot", SCREENSHOT_REQUIRED_ERROR.to_string());
        }
        Some(image) if !image.is_image() => {
            report
                .field_errors
                .insert("paymentScreenshot", SCREENSHOT_NOT_IMAGE_ERROR.to_string());
        }
        Some(_) => {}
    }

    // Cross-field rule: one combined error, distinct from the per-field ones.
    if values.seats().total() == 0 {
        report.form_errors.push(SEAT_MINIMUM_ERROR.to_string());
    }

    report
}

/// Current field values of the driver's ride-creation form. Numeric and date
/// fields arrive as raw input text; vehicle model/number stay flat here and
/// fold into a nested object at submission.
#[derive(Debug, Clone, Default)]
pub struct RideDraftValues {
    pub from: String,
    pub to: String,
    /// ISO `YYYY-MM-DD`, as produced by the calendar picker.
    pub date: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub fare: String,
    pub seats_available: String,
    pub vehicle_model: String,
    pub vehicle_number: String,
}

impl RideDraftValues {
    /// Validate and build the `POST /rides` payload, stamping the session
    /// driver's id and folding vehicle fields into the nested object.
    pub fn to_payload(&self, driver_id: &str) -> Result<NewRide, ValidationReport> {
        let report = validate_ride_draft(self);
        if !report.is_ok() {
            return Err(report);
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationReport::single_field("date", "Date must be a valid date"))?;
        let fare: f64 = self
            .fare
            .trim()
            .parse()
            .map_err(|_| ValidationReport::single_field("fare", "Fare must be a number"))?;
        let seats_available: u32 = self
            .seats_available
            .trim()
            .parse()
            .map_err(|_| ValidationReport::single_field("seatsAvailable", "Seats must be a number"))?;

        Ok(NewRide {
            from: self.from.trim().to_string(),
            to: self.to.trim().to_string(),
            date,
            departure_time: self.departure_time.trim().to_string(),
            arrival_time: self.arrival_time.trim().to_string(),
            fare,
            seats_available,
            vehicle: Vehicle {
                model: self.vehicle_model.trim().to_string(),
                number: self.vehicle_number.trim().to_string(),
            },
            driver_id: driver_id.to_string(),
        })
    }
}

pub fn validate_ride_draft(values: &RideDraftValues) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.require_field("from", &values.from, "From city is required");
    report.require_field("to", &values.to, "To city is required");
    report.require_field("date", &values.date, "Date is required");
    report.require_field("departureTime", &values.departure_time, "Departure time is required");
    report.require_field("arrivalTime", &values.arrival_time, "Arrival time is required");
    report.require_field("vehicleModel", &values.vehicle_model, "Vehicle model is required");
    report.require_field("vehicleNumber", &values.vehicle_number, "Vehicle number is required");

    if !values.date.trim().is_empty()
        && NaiveDate::parse_from_str(values.date.trim(), "%Y-%m-%d").is_err()
    {
        report.field_errors.insert("date", "Date must be a valid date".to_string());
    }

    if values.fare.trim().is_empty() {
        report.field_errors.insert("fare", "Fare is required".to_string());
    } else if values.fare.trim().parse::<f64>().is_err() {
        report.field_errors.insert("fare", "Fare must be a number".to_string());
    }

    if values.seats_available.trim().is_empty() {
        report
            .field_errors
            .insert("seatsAvailable", "Seats available is required".to_string());
    } else if values.seats_available.trim().parse::<u32>().is_err() {
        report
            .field_errors
            .insert("seatsAvailable", "Seats must be a number".to_string());
    }

    report
}

/// Login form fields.
#[derive(Debug, Clone, Default)]
pub struct LoginValues {
    pub email: String,
    pub password: String,
}

/// Registration form fields.
#[derive(Debug, Clone, Default)]
pub struct RegistrationValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

pub fn validate_login(values: &LoginValues) -> ValidationReport {
    let mut report = ValidationReport::default();
    if values.email.trim().is_empty() {
        report.field_errors.insert("email", "Email is required".to_string());
    } else if !looks_like_email(values.email.trim()) {
        report.field_errors.insert("email", "Invalid email address".to_string());
    }
    if values.password.is_empty() {
        report.field_errors.insert("password", "Password is required".to_string());
    } else if values.password.len() < 6 {
        report
            .field_errors
            .insert("password", "Password must be at least 6 characters".to_string());
    }
    report
}

pub fn validate_registration(values: &RegistrationValues) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.require_field("name", &values.name, "Name is required");

    if values.email.trim().is_empty() {
        report.field_errors.insert("email", "Email is required".to_string());
    } else if !looks_like_email(values.email.trim()) {
        report.field_errors.insert("email", "Invalid email address".to_string());
    }

    let phone = values.phone.trim();
    if phone.is_empty() {
        report.field_errors.insert("phone", "Phone is required".to_string());
    } else if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        report.field_errors.insert("phone", "Phone must be 10 digits".to_string());
    }

    if values.password.is_empty() {
        report.field_errors.insert("password", "Password is required".to_string());
    } else if values.password.len() < 6 {
        report
            .field_errors
            .insert("password", "Password must be at least 6 characters".to_string());
    }
    report
}
