use serde::{Deserialize, Serialize};

use crate::ride::{Ride, RideStatus};

/// Free-text + status filter over a ride list.
///
/// `status: None` means "all". Matching recomputes whenever the source list
/// or the filter changes; there is no pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RideFilter {
    pub status: Option<RideStatus>,
    pub search: String,
}

impl RideFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, ride: &Ride) -> bool {
        let matches_status = self.status.map_or(true, |status| ride.status == status);

        // Empty search matches everything; otherwise case-insensitive
        // substring over origin, destination and driver name.
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || ride.from.to_lowercase().contains(&needle)
            || ride.to.to_lowercase().contains(&needle)
            || ride.driver.name.to_lowercase().contains(&needle);

        matches_status && matches_search
    }

    pub fn apply<'a>(&self, rides: &'a [Ride]) -> Vec<&'a Ride> {
        rides.iter().filter(|ride| self.matches(ride)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ride::{DriverRef, Vehicle};
    use chrono::NaiveDate;

    fn ride(from: &str, to: &str, driver: &str, status: RideStatus) -> Ride {
        Ride {
            id: format!("{from}-{to}"),
            from: from.to_string(),
            to: to.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            departure_time: "06:30".to_string(),
            arrival_time: "10:00".to_string(),
            fare: 450.0,
            seats_available: 4,
            vehicle: Vehicle { model: "Swift".to_string(), number: "MH12AB1234".to_string() },
            driver: DriverRef { id: "d1".to_string(), name: driver.to_string(), phone: None },
            status,
        }
    }

    #[test]
    fn search_matches_destination_case_insensitively() {
        let rides = vec![ride("Pune", "Mumbai", "Raj", RideStatus::Active)];
        let filter = RideFilter { status: None, search: "mumbai".to_string() };
        assert_eq!(filter.apply(&rides).len(), 1);
    }

    #[test]
    fn empty_filter_is_identity() {
        let rides = vec![
            ride("Pune", "Mumbai", "Raj", RideStatus::Active),
            ride("Nashik", "Thane", "Meera", RideStatus::Completed),
            ride("Satara", "Pune", "Vikram", RideStatus::Ongoing),
        ];
        let filter = RideFilter::all();
        assert_eq!(filter.apply(&rides).len(), rides.len());
    }

    #[test]
    fn status_filter_excludes_other_statuses() {
        let rides = vec![
            ride("Pune", "Mumbai", "Raj", RideStatus::Active),
            ride("Nashik", "Thane", "Meera", RideStatus::Completed),
        ];
        let filter = RideFilter { status: Some(RideStatus::Active), search: String::new() };
        let visible = filter.apply(&rides);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].from, "Pune");
    }

    #[test]
    fn search_matches_driver_name() {
        let rides = vec![
            ride("Pune", "Mumbai", "Raj", RideStatus::Active),
            ride("Nashik", "Thane", "Meera", RideStatus::Active),
        ];
        let filter = RideFilter { status: None, search: "MEE".to_string() };
        let visible = filter.apply(&rides);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].driver.name, "Meera");
    }

    #[test]
    fn status_and_search_combine_conjunctively() {
        let rides = vec![
            ride("Pune", "Mumbai", "Raj", RideStatus::Active),
            ride("Pune", "Mumbai", "Meera", RideStatus::Completed),
        ];
        let filter = RideFilter { status: Some(RideStatus::Completed), search: "pune".to_string() };
        let visible = filter.apply(&rides);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].driver.name, "Meera");
    }

    #[test]
    fn no_match_yields_empty_not_error() {
        let rides: Vec<Ride> = Vec::new();
        let filter = RideFilter { status: None, search: "mumbai".to_string() };
        assert!(filter.apply(&rides).is_empty());
    }
}
