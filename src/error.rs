use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::ical::ExportError;
use crate::pricing::PricingError;
use crate::schedule::ScheduleError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unprocessable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg).into_response()
            }
        }
    }
}

impl From<ScheduleError> for ApiError {
    fn from(value: ScheduleError) -> Self {
        warn!(error = %value, "rejected series request");
        match value {
            ScheduleError::InvalidArgument(_) => ApiError::BadRequest(value.to_string()),
            ScheduleError::OutOfRange { .. } => ApiError::Unprocessable(value.to_string()),
        }
    }
}

impl From<PricingError> for ApiError {
    fn from(value: PricingError) -> Self {
        warn!(error = %value, "rejected pricing request");
        match value {
            PricingError::InvalidArgument(_) => ApiError::BadRequest(value.to_string()),
            PricingError::Overflow => ApiError::Unprocessable(value.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(value: ExportError) -> Self {
        warn!(error = %value, "rejected calendar export");
        ApiError::Unprocessable(value.to_string())
    }
}
