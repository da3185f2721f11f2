use sawari_core::booking::{format_fare, MAX_SEATS_EACH};
use sawari_core::media::ImageFile;
use sawari_core::repository::BookingGateway;
use sawari_core::ride::Ride;
use sawari_core::validate::{validate_booking_form, BookingFormValues, ValidationReport};

use crate::notice::Notice;

/// The booking form for one selected ride.
///
/// Pickup/drop are prefilled from the ride's endpoints; totals are derived
/// from the seat split on every change. The form closes itself only on a
/// successful submission.
#[derive(Debug)]
pub struct BookingForm {
    pub ride: Ride,
    pub values: BookingFormValues,
    pub report: ValidationReport,
    submitting: bool,
    closed: bool,
    pub notice: Option<Notice>,
}

impl BookingForm {
    pub fn open(ride: Ride) -> Self {
        let values = BookingFormValues {
            pickup: ride.from.clone(),
            drop_location: ride.to.clone(),
            ..BookingFormValues::default()
        };
        Self {
            ride,
            values,
            report: ValidationReport::default(),
            submitting: false,
            closed: false,
            notice: None,
        }
    }

    pub fn set_pickup(&mut self, pickup: impl Into<String>) {
        self.values.pickup = pickup.into();
        self.revalidate();
    }

    pub fn set_drop(&mut self, drop_location: impl Into<String>) {
        self.values.drop_location = drop_location.into();
        self.revalidate();
    }

    /// Seat inputs clamp at the form's 0..=6 range like the number controls.
    pub fn set_male_seats(&mut self, seats: u32) {
        self.values.male_seats = seats.min(MAX_SEATS_EACH);
        self.revalidate();
    }

    pub fn set_female_seats(&mut self, seats: u32) {
        self.values.female_seats = seats.min(MAX_SEATS_EACH);
        self.revalidate();
    }

    pub fn stage_screenshot(&mut self, image: ImageFile) {
        self.values.screenshot = Some(image);
        self.revalidate();
    }

    pub fn remove_screenshot(&mut self) {
        self.values.screenshot = None;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.report = validate_booking_form(&self.values);
    }

    pub fn total_seats(&self) -> u32 {
        self.values.seats().total()
    }

    pub fn total_fare(&self) -> f64 {
        self.values.seats().fare_at(self.ride.fare)
    }

    /// Two-decimal fare shown next to the submit action.
    pub fn fare_display(&self) -> String {
        format_fare(self.total_fare())
    }

    /// Submission stays disabled while no seat is selected.
    pub fn can_submit(&self) -> bool {
        self.total_seats() > 0 && !self.submitting
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn cancel(&mut self) {
        self.closed = true;
    }

    /// Validate, package (image bytes included) and send the booking.
    /// Validation failures stay inline; request outcomes become notices.
    pub async fn submit(&mut self, gateway: &dyn BookingGateway) {
        if !self.can_submit() {
            self.revalidate();
            return;
        }

        let submission = match self.values.to_submission(&self.ride) {
            Ok(submission) => submission,
            Err(report) => {
                self.report = report;
                return;
            }
        };

        self.submitting = true;
        let result = gateway.create_booking(&submission).await;
        self.submitting = false;

        match result {
            Ok(message) => {
                self.notice = Some(Notice::success(message));
                self.closed = true;
            }
            Err(err) => {
                self.notice = Some(Notice::error(&err));
            }
        }
    }
}
