use sawari_core::booking::{Booking, BookingGroups, BookingStatus, ReviewAction};
use sawari_core::media::resolve_image_url;
use sawari_core::repository::BookingGateway;
use sawari_core::GatewayResult;

use crate::notice::Notice;

/// Tabs exposed by the review screen. Completed bookings are grouped but not
/// tab-exposed; the backend owns that transition and this screen never acts
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTab {
    Pending,
    Confirmed,
    Rejected,
}

pub const REVIEW_TABS: [ReviewTab; 3] = [ReviewTab::Pending, ReviewTab::Confirmed, ReviewTab::Rejected];

impl ReviewTab {
    pub fn status(&self) -> BookingStatus {
        match self {
            ReviewTab::Pending => BookingStatus::Pending,
            ReviewTab::Confirmed => BookingStatus::Confirmed,
            ReviewTab::Rejected => BookingStatus::Rejected,
        }
    }
}

/// The payment-proof surface opened from a booking card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSurface {
    pub booking_id: String,
    pub image_url: String,
}

/// Driver-side review of one ride's bookings, grouped by status.
#[derive(Debug)]
pub struct ReviewBoard {
    ride_id: String,
    image_base_url: String,
    groups: BookingGroups,
    pub tab: ReviewTab,
    surface: Option<ReviewSurface>,
    loading: bool,
    fetch_seq: u64,
    resolving: bool,
    pub notice: Option<Notice>,
}

impl ReviewBoard {
    pub fn new(ride_id: impl Into<String>, image_base_url: impl Into<String>) -> Self {
        Self {
            ride_id: ride_id.into(),
            image_base_url: image_base_url.into(),
            groups: BookingGroups::default(),
            tab: ReviewTab::Pending,
            surface: None,
            loading: false,
            fetch_seq: 0,
            resolving: false,
            notice: None,
        }
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.loading = true;
        self.fetch_seq
    }

    pub fn finish_refresh(&mut self, ticket: u64, result: GatewayResult<Vec<Booking>>) -> bool {
        if ticket != self.fetch_seq {
            tracing::debug!(ticket, current = self.fetch_seq, "dropping stale bookings fetch");
            return false;
        }
        self.loading = false;
        match result {
            Ok(bookings) => self.groups = BookingGroups::partition(bookings),
            Err(err) => self.notice = Some(Notice::error(&err)),
        }
        true
    }

    pub async fn refresh(&mut self, gateway: &dyn BookingGateway) {
        let ticket = self.begin_refresh();
        let result = gateway.bookings_for_ride(&self.ride_id).await;
        self.finish_refresh(ticket, result);
    }

    pub fn select_tab(&mut self, tab: ReviewTab) {
        self.tab = tab;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn groups(&self) -> &BookingGroups {
        &self.groups
    }

    /// Bookings shown under the active tab.
    pub fn visible(&self) -> &[Booking] {
        self.groups.by_status(self.tab.status())
    }

    pub fn surface(&self) -> Option<&ReviewSurface> {
        self.surface.as_ref()
    }

    /// Open the payment proof for a booking. Bookings without a screenshot
    /// expose no review action.
    pub fn open_review(&mut self, booking: &Booking) {
        if let Some(stored) = &booking.payment_screenshot_url {
            self.surface = Some(ReviewSurface {
                booking_id: booking.id.clone(),
                image_url: resolve_image_url(&self.image_base_url, stored),
            });
        }
    }

    pub fn close_review(&mut self) {
        self.surface = None;
    }

    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// Confirm or reject the booking under review. On success the group list
    /// refreshes and the surface closes; on failure it stays open.
    pub async fn resolve(&mut self, action: ReviewAction, gateway: &dyn BookingGateway) {
        if self.resolving {
            return;
        }
        let Some(surface) = self.surface.clone() else {
            return;
        };

        self.resolving = true;
        let result = gateway.review_booking(&surface.booking_id, action).await;
        self.resolving = false;

        match result {
            Ok(message) => {
                self.notice = Some(Notice::success(message));
                self.surface = None;
                self.refresh(gateway).await;
            }
            Err(err) => {
                self.notice = Some(Notice::error(&err));
            }
        }
    }
}
