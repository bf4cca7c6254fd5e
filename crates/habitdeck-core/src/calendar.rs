//! Calendar-day comparisons.
//!
//! The streak machine cares about calendar days, not 24-hour windows:
//! 23:59 and 00:01 on consecutive dates are "yesterday" and "today".
//! Both the launch reconciliation and the save-time evaluation go through
//! the same `Calendar` so midnight semantics cannot drift between them.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};

/// Timezone-aware day arithmetic over UTC timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    /// Calendar in UTC.
    pub fn utc() -> Self {
        Self::with_offset_hours(0)
    }

    /// Calendar at a fixed offset from UTC. Out-of-range offsets fall back
    /// to UTC rather than failing.
    pub fn with_offset_hours(hours: i32) -> Self {
        let offset = hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or(FixedOffset::east_opt(0).unwrap());
        Self { offset }
    }

    /// The local calendar date of a UTC instant.
    fn local_date(&self, t: DateTime<Utc>) -> NaiveDate {
        t.with_timezone(&self.offset).date_naive()
    }

    /// True when both instants fall on the same local calendar day.
    pub fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local_date(a) == self.local_date(b)
    }

    /// True when `t` falls exactly one local calendar day before `today`.
    pub fn is_yesterday(&self, t: DateTime<Utc>, today: DateTime<Utc>) -> bool {
        self.local_date(t).checked_add_days(Days::new(1)) == Some(self.local_date(today))
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_same_day_across_hours() {
        let cal = Calendar::utc();
        assert!(cal.is_same_day(at(2025, 6, 1, 0, 1), at(2025, 6, 1, 23, 59)));
        assert!(!cal.is_same_day(at(2025, 6, 1, 23, 59), at(2025, 6, 2, 0, 1)));
    }

    #[test]
    fn test_yesterday_is_exactly_one_day() {
        let cal = Calendar::utc();
        let today = at(2025, 6, 2, 9, 0);
        assert!(cal.is_yesterday(at(2025, 6, 1, 23, 59), today));
        assert!(!cal.is_yesterday(at(2025, 5, 31, 12, 0), today));
        assert!(!cal.is_yesterday(at(2025, 6, 2, 0, 0), today));
        // Future relative to today is not yesterday either.
        assert!(!cal.is_yesterday(at(2025, 6, 3, 0, 0), today));
    }

    #[test]
    fn test_offset_moves_the_midnight_boundary() {
        // 23:30 UTC and 00:30 UTC next date: different UTC days,
        // same day at UTC-2.
        let cal = Calendar::with_offset_hours(-2);
        let a = at(2025, 6, 1, 23, 30);
        let b = at(2025, 6, 2, 0, 30);
        assert!(cal.is_same_day(a, b));
        assert!(!Calendar::utc().is_same_day(a, b));
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        assert_eq!(Calendar::with_offset_hours(99), Calendar::utc());
        assert_eq!(Calendar::with_offset_hours(-99), Calendar::utc());
        // Extreme values must not overflow the seconds conversion.
        assert_eq!(Calendar::with_offset_hours(1_000_000), Calendar::utc());
        assert_eq!(Calendar::with_offset_hours(i32::MAX), Calendar::utc());
        assert_eq!(Calendar::with_offset_hours(i32::MIN), Calendar::utc());
    }
}
