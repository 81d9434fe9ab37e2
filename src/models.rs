use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schedule::RecurrencePattern;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SeriesResponse {
    pub pattern: RecurrencePattern,
    pub session_count: u32,
    #[schema(value_type = Vec<String>, example = json!(["2024-01-31", "2024-02-29"]))]
    pub sessions: Vec<NaiveDate>,
    #[schema(value_type = String, format = "date", example = "2024-02-29")]
    pub recurrence_end: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, PartialEq, ToSchema)]
pub struct RecurrenceRequest {
    #[schema(example = "weekly")]
    pub pattern: String,
    pub sessions: u8,
}

/// Draft booking as captured by the booking form.
#[derive(Debug, Clone, Deserialize, PartialEq, ToSchema)]
pub struct BookingDraftRequest {
    pub client_id: String,
    pub treatment_id: String,
    #[schema(value_type = String, format = "date", example = "2025-11-24")]
    pub scheduled_date: NaiveDate,
    #[schema(example = "14:30")]
    pub start_time: Option<String>,
    #[schema(value_type = String, example = "100.00")]
    pub base_price: Decimal,
    pub recurrence: Option<RecurrenceRequest>,
    #[serde(default)]
    pub is_group_booking: bool,
    pub group_size: Option<u32>,
    pub notes: Option<String>,
}

/// Body for the booking service's `POST /api/bookings`.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub client_id: String,
    pub treatment_id: String,
    #[schema(value_type = String, format = "date-time", example = "2025-11-24T14:30:00")]
    pub scheduled_date: NaiveDateTime,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    #[schema(value_type = Option<String>, format = "date")]
    pub recurrence_end: Option<NaiveDate>,
    #[schema(value_type = Vec<String>)]
    pub session_dates: Vec<NaiveDate>,
    pub is_group_booking: bool,
    pub group_size: u32,
    #[schema(value_type = String, example = "340.00")]
    pub total_price: Decimal,
    pub notes: Option<String>,
}
