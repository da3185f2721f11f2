use sawari_core::filter::RideFilter;
use sawari_core::repository::RideGateway;
use sawari_core::ride::{Ride, RideStatus};
use sawari_core::validate::{RideDraftValues, ValidationReport};
use sawari_core::GatewayResult;

use crate::notice::Notice;

/// Status tabs shown on the driver dashboard, in display order.
pub const DRIVER_TABS: [Option<RideStatus>; 4] = [
    None,
    Some(RideStatus::Ongoing),
    Some(RideStatus::Active),
    Some(RideStatus::Completed),
];

/// The driver's dashboard: own rides, status tabs, search, and the
/// ride-creation form. Fetches are latest-wins like the rider board.
#[derive(Debug)]
pub struct DriverBoard {
    driver_id: String,
    rides: Vec<Ride>,
    pub filter: RideFilter,
    loading: bool,
    fetch_seq: u64,
    pub draft: RideDraftValues,
    pub draft_report: ValidationReport,
    creating: bool,
    pub notice: Option<Notice>,
}

impl DriverBoard {
    pub fn new(driver_id: impl Into<String>) -> Self {
        Self {
            driver_id: driver_id.into(),
            rides: Vec::new(),
            filter: RideFilter::all(),
            loading: false,
            fetch_seq: 0,
            draft: RideDraftValues::default(),
            draft_report: ValidationReport::default(),
            creating: false,
            notice: None,
        }
    }

    pub fn begin_refresh(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.loading = true;
        self.fetch_seq
    }

    pub fn finish_refresh(&mut self, ticket: u64, result: GatewayResult<Vec<Ride>>) -> bool {
        if ticket != self.fetch_seq {
            tracing::debug!(ticket, current = self.fetch_seq, "dropping stale driver fetch");
            return false;
        }
        self.loading = false;
        match result {
            Ok(rides) => self.rides = rides,
            Err(err) => self.notice = Some(Notice::error(&err)),
        }
        true
    }

    pub async fn refresh(&mut self, gateway: &dyn RideGateway) {
        let ticket = self.begin_refresh();
        let result = gateway.rides_by_driver(&self.driver_id).await;
        self.finish_refresh(ticket, result);
    }

    pub fn select_tab(&mut self, status: Option<RideStatus>) {
        self.filter.status = status;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn visible(&self) -> Vec<&Ride> {
        self.filter.apply(&self.rides)
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    /// Submit the ride-creation form. On success the draft resets and the
    /// list refreshes; validation failures stay inline on the form.
    pub async fn submit_draft(&mut self, gateway: &dyn RideGateway) {
        if self.creating {
            return;
        }
        let payload = match self.draft.to_payload(&self.driver_id) {
            Ok(payload) => payload,
            Err(report) => {
                self.draft_report = report;
                return;
            }
        };

        self.creating = true;
        let result = gateway.create_ride(&payload).await;
        self.creating = false;

        match result {
            Ok(message) => {
                self.notice = Some(Notice::success(message));
                self.draft = RideDraftValues::default();
                self.draft_report = ValidationReport::default();
                self.refresh(gateway).await;
            }
            Err(err) => {
                self.notice = Some(Notice::error(&err));
            }
        }
    }
}
