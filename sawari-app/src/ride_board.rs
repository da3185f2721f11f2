use sawari_core::filter::RideFilter;
use sawari_core::repository::RideGateway;
use sawari_core::ride::{Ride, RideStatus};
use sawari_core::GatewayResult;

use crate::notice::Notice;

/// The rider's ride listing: fetched rides plus the active filter.
///
/// Fetches are latest-wins: every refresh takes a sequence number and a
/// completion carrying a stale number is dropped without touching state, so
/// fast filter changes or re-triggers cannot resurrect old results.
#[derive(Debug, Default)]
pub struct RideBoard {
    rides: Vec<Ride>,
    pub filter: RideFilter,
    loading: bool,
    fetch_seq: u64,
    pub notice: Option<Notice>,
}

impl RideBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch; the returned ticket must be handed back to
    /// [`finish_refresh`](Self::finish_refresh).
    pub fn begin_refresh(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.loading = true;
        self.fetch_seq
    }

    /// Complete a fetch. Returns `false` when the ticket is stale and the
    /// result was discarded.
    pub fn finish_refresh(&mut self, ticket: u64, result: GatewayResult<Vec<Ride>>) -> bool {
        if ticket != self.fetch_seq {
            tracing::debug!(ticket, current = self.fetch_seq, "dropping stale ride fetch");
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
        let result = gateway.list_rides().await;
        self.finish_refresh(ticket, result);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_status(&mut self, status: Option<RideStatus>) {
        self.filter.status = status;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Recomputed on every call; no caching between filter changes.
    pub fn visible(&self) -> Vec<&Ride> {
        self.filter.apply(&self.rides)
    }

    /// "No rides found." placeholder condition.
    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }
}
