use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::AvailabilityEntry;

/// Project a doctor's availability records into the set of bookable calendar
/// dates. Pure and cheap; callers recompute it whenever the doctor record
/// changes instead of caching.
pub fn available_dates(entries: &[AvailabilityEntry]) -> HashSet<NaiveDate> {
    entries.iter().map(|entry| entry.date).collect()
}

/// Format a calendar date for the `appointment_date` query parameter.
/// Works on `NaiveDate`, so there is no UTC conversion that could shift the
/// day across timezones.
pub fn query_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, date: &str) -> AvailabilityEntry {
        AvailabilityEntry {
            id,
            date: date.parse().unwrap(),
            start_time: "09:00:00".to_string(),
            end_time: "13:00:00".to_string(),
        }
    }

    #[test]
    fn duplicate_dates_collapse_into_one_entry() {
        let entries = vec![
            entry(1, "2026-09-01"),
            entry(2, "2026-09-01"),
            entry(3, "2026-09-03"),
        ];

        let dates = available_dates(&entries);
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&"2026-09-01".parse().unwrap()));
        assert!(dates.contains(&"2026-09-03".parse().unwrap()));
    }

    #[test]
    fn no_entries_means_no_bookable_dates() {
        assert!(available_dates(&[]).is_empty());
    }

    #[test]
    fn query_date_uses_calendar_format() {
        let date: NaiveDate = "2026-09-01".parse().unwrap();
        assert_eq!(query_date(date), "2026-09-01");
    }
}
