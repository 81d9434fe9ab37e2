use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Session {session} falls outside the supported calendar range")]
    OutOfRange { session: usize },
}

/// Repeat interval between sessions of a recurring booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    Weekly,
    Biweekly,
    Monthly,
}

impl RecurrencePattern {
    /// Moves `date` forward by one interval. Monthly steps keep the day of
    /// month, clamped to the last day of shorter months.
    pub fn advance(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            RecurrencePattern::Weekly => date.checked_add_days(Days::new(7)),
            RecurrencePattern::Biweekly => date.checked_add_days(Days::new(14)),
            RecurrencePattern::Monthly => date.checked_add_months(Months::new(1)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Biweekly => "biweekly",
            RecurrencePattern::Monthly => "monthly",
        }
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrencePattern {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(RecurrencePattern::Weekly),
            "biweekly" => Ok(RecurrencePattern::Biweekly),
            "monthly" => Ok(RecurrencePattern::Monthly),
            other => Err(ScheduleError::InvalidArgument(format!(
                "unrecognized recurrence pattern '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSeriesRequest {
    pub start_date: NaiveDate,
    pub pattern: RecurrencePattern,
    pub session_count: u32,
}

impl BookingSeriesRequest {
    pub fn dates(&self) -> Result<Vec<NaiveDate>, ScheduleError> {
        generate_series_dates(self.start_date, self.pattern, self.session_count)
    }
}

/// Produces the appointment dates of a recurring series.
///
/// The first date is always `start_date`. Each following date is the previous
/// one advanced by `pattern`, so a month-end clamp carries into later months
/// (2024-01-31 monthly gives 01-31, 02-29, 03-29).
pub fn generate_series_dates(
    start_date: NaiveDate,
    pattern: RecurrencePattern,
    session_count: u32,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    if session_count < 1 {
        return Err(ScheduleError::InvalidArgument(
            "session count must be at least 1".into(),
        ));
    }

    let count = session_count as usize;
    let mut dates = Vec::with_capacity(count);
    let mut current = start_date;
    dates.push(current);

    for session in 2..=count {
        current = pattern
            .advance(current)
            .ok_or(ScheduleError::OutOfRange { session })?;
        dates.push(current);
    }

    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_length_and_first_date() {
        let start = date(2025, 3, 10);
        for pattern in [
            RecurrencePattern::Weekly,
            RecurrencePattern::Biweekly,
            RecurrencePattern::Monthly,
        ] {
            for n in 1..=12 {
                let dates = generate_series_dates(start, pattern, n).unwrap();
                assert_eq!(dates.len(), n as usize);
                assert_eq!(dates[0], start);
                assert!(dates.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_single_session() {
        let start = date(2025, 6, 1);
        let dates = generate_series_dates(start, RecurrencePattern::Monthly, 1).unwrap();
        assert_eq!(dates, vec![start]);
    }

    #[test]
    fn test_same_input_same_output() {
        let request = BookingSeriesRequest {
            start_date: date(2025, 1, 15),
            pattern: RecurrencePattern::Biweekly,
            session_count: 8,
        };
        assert_eq!(request.dates().unwrap(), request.dates().unwrap());
    }

    #[test]
    fn test_weekly_step() {
        let dates = generate_series_dates(date(2024, 12, 23), RecurrencePattern::Weekly, 6).unwrap();
        for pair in dates.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 7);
        }
        assert_eq!(dates[1], date(2024, 12, 30));
        assert_eq!(dates[2], date(2025, 1, 6));
    }

    #[test]
    fn test_biweekly_step() {
        let dates = generate_series_dates(date(2024, 2, 20), RecurrencePattern::Biweekly, 5).unwrap();
        for pair in dates.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 14);
        }
        assert_eq!(dates[1], date(2024, 3, 5));
    }

    #[test]
    fn test_monthly_month_end_clamp_carries_forward() {
        let dates = generate_series_dates(date(2024, 1, 31), RecurrencePattern::Monthly, 3).unwrap();
        assert_eq!(
            dates,
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 29)]
        );
    }

    #[test]
    fn test_monthly_keeps_day_of_month() {
        let dates = generate_series_dates(date(2025, 11, 15), RecurrencePattern::Monthly, 3).unwrap();
        assert_eq!(
            dates,
            vec![date(2025, 11, 15), date(2025, 12, 15), date(2026, 1, 15)]
        );
    }

    #[test]
    fn test_zero_sessions_rejected() {
        let err = generate_series_dates(date(2025, 1, 1), RecurrencePattern::Weekly, 0).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidArgument(_)));
    }

    #[test]
    fn test_out_of_range() {
        let err = generate_series_dates(NaiveDate::MAX, RecurrencePattern::Weekly, 2).unwrap_err();
        assert_eq!(err, ScheduleError::OutOfRange { session: 2 });
    }

    #[test]
    fn test_parse_pattern() {
        assert_eq!(
            "weekly".parse::<RecurrencePattern>().unwrap(),
            RecurrencePattern::Weekly
        );
        assert_eq!(
            " BiWeekly ".parse::<RecurrencePattern>().unwrap(),
            RecurrencePattern::Biweekly
        );
        assert_eq!(
            "monthly".parse::<RecurrencePattern>().unwrap(),
            RecurrencePattern::Monthly
        );
        let err = "yearly".parse::<RecurrencePattern>().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidArgument(_)));
    }

    #[test]
    fn test_pattern_display_matches_serde() {
        for pattern in [
            RecurrencePattern::Weekly,
            RecurrencePattern::Biweekly,
            RecurrencePattern::Monthly,
        ] {
            let json = serde_json::to_string(&pattern).unwrap();
            assert_eq!(json, format!("\"{pattern}\""));
        }
    }
}
