use chrono::NaiveTime;

use crate::error::ApiError;

pub fn validate_sessions(value: u8, max: u8) -> Result<u8, ApiError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!(
            "sessions must be between 1 and {max}"
        )))
    }
}

pub fn parse_start_time(value: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ApiError::BadRequest("start_time must be formatted as HH:MM".into()))
}
