use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sale window of an edition. Opening and start coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    open: NaiveDateTime,
    end: NaiveDateTime,
    deadline: NaiveDateTime,
}

impl Schedule {
    /// Opens `now`, or on the `future` date (`YYYY-MM-DD`) at the current time of day. Ends a
    /// day later; the deadline is an hour after the end.
    pub fn resolve(now: DateTime<Utc>, future: Option<&str>) -> Result<Self> {
        let now = now.naive_utc();
        let open = match future {
            Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| Error::InvalidDate(date.to_string()))?
                .and_time(now.time()),
            None => now,
        };
        let end = open + Duration::days(1);
        let deadline = end + Duration::hours(1);
        Ok(Schedule {
            open,
            end,
            deadline,
        })
    }

    pub fn open_at(&self) -> String {
        self.open.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn end_at(&self) -> String {
        self.end.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn deadline(&self) -> String {
        self.deadline.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn defaults_to_now_plus_one_day() {
        let schedule = Schedule::resolve(noon(), None).unwrap();
        assert_eq!(schedule.open_at(), "2026-10-16 12:00:00");
        assert_eq!(schedule.end_at(), "2026-10-17 12:00:00");
        assert_eq!(schedule.deadline(), "2026-10-17 13:00:00");
    }

    #[test]
    fn future_date_keeps_time_of_day() {
        let schedule = Schedule::resolve(noon(), Some("2030-01-01")).unwrap();
        assert_eq!(schedule.open_at(), "2030-01-01 12:00:00");
        assert_eq!(schedule.end_at(), "2030-01-02 12:00:00");
        assert_eq!(schedule.deadline(), "2030-01-02 13:00:00");
    }

    #[test]
    fn deadline_rolls_over_midnight() {
        let late = Utc.with_ymd_and_hms(2030, 12, 31, 23, 30, 5).unwrap();
        let schedule = Schedule::resolve(late, None).unwrap();
        assert_eq!(schedule.end_at(), "2031-01-01 23:30:05");
        assert_eq!(schedule.deadline(), "2031-01-02 00:30:05");
    }

    #[test]
    fn bad_future_date_is_rejected() {
        let err = Schedule::resolve(noon(), Some("01/01/2030")).unwrap_err();
        assert!(matches!(err, Error::InvalidDate(_)));
    }
}
