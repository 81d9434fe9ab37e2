use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("Session {session} ends outside the supported calendar range")]
    OutOfRange { session: usize },
}

#[derive(Clone, Debug)]
pub struct ICalExporter {
    clinic_name: String,
    timezone: Tz,
    default_start: NaiveTime,
    duration_min: u32,
}

impl ICalExporter {
    pub fn new(
        clinic_name: impl Into<String>,
        timezone: Tz,
        default_start: NaiveTime,
        duration_min: u32,
    ) -> Self {
        Self {
            clinic_name: clinic_name.into(),
            timezone,
            default_start,
            duration_min,
        }
    }

    pub fn default_start(&self) -> NaiveTime {
        self.default_start
    }

    /// Renders one event per session date, all starting at `start`.
    pub fn generate(
        &self,
        treatment: &str,
        sessions: &[NaiveDate],
        start: NaiveTime,
    ) -> Result<Vec<u8>, ExportError> {
        let mut calendar = Calendar::new();
        calendar.name(&format!("{} Appointments", self.clinic_name));
        calendar.timezone(self.timezone.name());

        let total = sessions.len();
        for (index, date) in sessions.iter().enumerate() {
            let begin = date.and_time(start);
            let end = begin
                .checked_add_signed(Duration::minutes(i64::from(self.duration_min)))
                .ok_or(ExportError::OutOfRange { session: index + 1 })?;

            let mut event = Event::new();
            event.summary(&format!("{}: {}", self.clinic_name, treatment));
            event.starts(CalendarDateTime::WithTimezone {
                date_time: begin,
                tzid: self.timezone.name().to_string(),
            });
            event.ends(CalendarDateTime::WithTimezone {
                date_time: end,
                tzid: self.timezone.name().to_string(),
            });
            event.location(&self.clinic_name);
            event.description(&format!("Session {} of {}", index + 1, total));
            event.uid(&format!(
                "{}-{}-{}-clinic-booking",
                begin.format("%Y%m%dT%H%M%S"),
                index + 1,
                treatment.replace(' ', "-")
            ));
            calendar.push(event);
        }

        Ok(calendar.to_string().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exporter() -> ICalExporter {
        ICalExporter::new(
            "Harbour Clinic",
            chrono_tz::Europe::London,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            45,
        )
    }

    #[test]
    fn test_generate_series() {
        let sessions = [
            NaiveDate::from_ymd_opt(2025, 11, 24).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
        ];
        let start = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        let body = String::from_utf8(exporter().generate("Facial", &sessions, start).unwrap()).unwrap();
        assert_eq!(body.matches("BEGIN:VEVENT").count(), 2);
        assert!(body.contains("Harbour Clinic: Facial"));
        assert!(body.contains("Session 2 of 2"));
        assert!(body.contains("Europe/London"));
        assert!(body.contains("20251124T143000"));
        assert!(body.contains("20251124T151500"));
    }

    #[test]
    fn test_generate_session_ending_past_max_date() {
        let start = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        let sessions = [NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), NaiveDate::MAX];
        let err = exporter().generate("Facial", &sessions, start).unwrap_err();
        assert_eq!(err, ExportError::OutOfRange { session: 2 });
    }
}
