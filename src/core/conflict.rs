use crate::domain::model::{Appointment, BookingSlot};
use chrono::Timelike;

/// 含端點的日期區間比較，等同半開區間 `[start, end + 1 天)` 但不會溢位
pub fn dates_overlap(candidate: &BookingSlot, stored: &BookingSlot) -> bool {
    candidate.start_date <= stored.end_date && candidate.end_date >= stored.start_date
}

/// 只比較時與分，秒數不列入
pub fn same_slot(candidate: &BookingSlot, stored: &BookingSlot) -> bool {
    candidate.time.hour() == stored.time.hour() && candidate.time.minute() == stored.time.minute()
}

pub fn collides(candidate: &BookingSlot, stored: &BookingSlot) -> bool {
    dates_overlap(candidate, stored) && same_slot(candidate, stored)
}

/// Returns the first stored appointment the candidate collides with.
pub fn find_conflict<'a>(
    candidate: &BookingSlot,
    existing: &'a [Appointment],
) -> Option<&'a Appointment> {
    existing
        .iter()
        .find(|appointment| collides(candidate, &BookingSlot::from(*appointment)))
}

pub fn has_conflict(candidate: &BookingSlot, existing: &[Appointment]) -> bool {
    find_conflict(candidate, existing).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AppointmentStatus;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn slot(start: &str, end: &str, hour: u32, minute: u32) -> BookingSlot {
        BookingSlot {
            start_date: date(start),
            end_date: date(end),
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
        }
    }

    fn stored(start: &str, end: &str, hour: u32, minute: u32) -> Appointment {
        let s = slot(start, end, hour, minute);
        Appointment {
            id: Uuid::new_v4(),
            customer_name: "Existing".to_string(),
            service: "port1".to_string(),
            start_date: s.start_date,
            end_date: s.end_date,
            time: s.time,
            profession: None,
            id_number: "X1".to_string(),
            email: None,
            phone: None,
            notes: None,
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_range_containing_candidate_conflicts() {
        let existing = vec![stored("2024-01-10", "2024-01-12", 9, 0)];
        assert!(has_conflict(&slot("2024-01-11", "2024-01-11", 9, 0), &existing));
    }

    #[test]
    fn test_single_day_against_itself_conflicts() {
        let existing = vec![stored("2024-01-10", "2024-01-10", 9, 0)];
        assert!(has_conflict(&slot("2024-01-10", "2024-01-10", 9, 0), &existing));
    }

    #[test]
    fn test_shared_boundary_date_conflicts() {
        let existing = vec![stored("2024-01-10", "2024-01-12", 9, 0)];
        assert!(has_conflict(&slot("2024-01-12", "2024-01-14", 9, 0), &existing));
        assert!(has_conflict(&slot("2024-01-08", "2024-01-10", 9, 0), &existing));
    }

    #[test]
    fn test_adjacent_ranges_do_not_conflict() {
        let existing = vec![stored("2024-01-10", "2024-01-12", 9, 0)];
        assert!(!has_conflict(&slot("2024-01-13", "2024-01-15", 9, 0), &existing));
        assert!(!has_conflict(&slot("2024-01-05", "2024-01-09", 9, 0), &existing));
    }

    #[test]
    fn test_different_time_does_not_conflict() {
        let existing = vec![stored("2024-01-10", "2024-01-12", 9, 0)];
        assert!(!has_conflict(&slot("2024-01-11", "2024-01-11", 9, 1), &existing));
        assert!(!has_conflict(&slot("2024-01-11", "2024-01-11", 10, 0), &existing));
    }

    #[test]
    fn test_seconds_are_ignored() {
        let existing = vec![stored("2024-01-10", "2024-01-10", 9, 0)];
        let mut candidate = slot("2024-01-10", "2024-01-10", 9, 0);
        candidate.time = NaiveTime::from_hms_opt(9, 0, 42).unwrap();
        assert!(has_conflict(&candidate, &existing));
    }

    #[test]
    fn test_find_conflict_returns_colliding_entry() {
        let existing = vec![
            stored("2024-02-01", "2024-02-01", 9, 0),
            stored("2024-01-10", "2024-01-12", 9, 0),
        ];
        let hit = find_conflict(&slot("2024-01-11", "2024-01-11", 9, 0), &existing).unwrap();
        assert_eq!(hit.id, existing[1].id);
    }

    #[test]
    fn test_last_representable_date_conflicts_with_itself() {
        let mut existing = vec![stored("2024-01-10", "2024-01-10", 9, 0)];
        existing[0].start_date = NaiveDate::MAX;
        existing[0].end_date = NaiveDate::MAX;

        let mut candidate = slot("2024-01-10", "2024-01-10", 9, 0);
        candidate.start_date = NaiveDate::MAX;
        candidate.end_date = NaiveDate::MAX;
        assert!(has_conflict(&candidate, &existing));

        candidate.start_date = NaiveDate::MAX.pred_opt().unwrap();
        candidate.end_date = candidate.start_date;
        assert!(!has_conflict(&candidate, &existing));
    }

    #[test]
    fn test_empty_store_never_conflicts() {
        assert!(!has_conflict(&slot("2024-01-10", "2024-01-10", 9, 0), &[]));
    }
}
