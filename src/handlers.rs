use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use tracing::debug;

use crate::{
    AppState,
    error::ApiError,
    models::{BookingDraftRequest, BookingPayload, SeriesResponse},
    pricing::{PriceBreakdown, PricingInput, compute_total_price, price_breakdown},
    schedule::{RecurrencePattern, generate_series_dates},
    validation::{parse_start_time, validate_sessions},
};

#[derive(Debug, serde::Deserialize)]
pub struct ScheduleQuery {
    pub start_date: NaiveDate,
    pub pattern: String,
    #[serde(default = "default_sessions")]
    pub sessions: u8,
    pub start_time: Option<String>,
    pub treatment: Option<String>,
}

fn default_sessions() -> u8 {
    1
}

fn build_series(
    state: &AppState,
    start_date: NaiveDate,
    pattern: &str,
    sessions: u8,
) -> Result<(RecurrencePattern, Vec<NaiveDate>), ApiError> {
    let sessions = validate_sessions(sessions, state.settings.max_sessions)?;
    let pattern: RecurrencePattern = pattern.parse()?;
    let dates = generate_series_dates(start_date, pattern, sessions.into())?;
    debug!(%start_date, %pattern, sessions, "generated booking series");
    Ok((pattern, dates))
}

#[utoipa::path(get, path = "/", tag = "booking")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Clinic Booking API",
        "endpoints": {
            "/schedule": "Get recurring session dates as JSON",
            "/schedule.ical": "Download recurring sessions as iCal file",
            "/quote": "Price a booking",
            "/bookings/draft": "Build a booking payload from a draft"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "booking")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "booking")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/schedule",
    params(
        ("start_date" = String, Query, description = "First session date (YYYY-MM-DD)"),
        ("pattern" = String, Query, description = "weekly, biweekly or monthly"),
        ("sessions" = u8, Query, description = "Number of sessions (1-max_sessions)")
    ),
    responses(
        (status = 200, description = "Session dates", body = SeriesResponse),
        (status = 400, description = "Invalid pattern or session count"),
        (status = 422, description = "Series leaves the supported calendar range")
    ),
    tag = "booking"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<ScheduleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (pattern, sessions) =
        build_series(&state, query.start_date, &query.pattern, query.sessions)?;
    let recurrence_end = sessions.last().copied().unwrap_or(query.start_date);

    Ok(Json(SeriesResponse {
        pattern,
        session_count: u32::from(query.sessions),
        sessions,
        recurrence_end,
    }))
}

#[utoipa::path(
    get,
    path = "/schedule.ical",
    params(
        ("start_date" = String, Query, description = "First session date (YYYY-MM-DD)"),
        ("pattern" = String, Query, description = "weekly, biweekly or monthly"),
        ("sessions" = u8, Query, description = "Number of sessions (1-max_sessions)"),
        ("start_time" = Option<String>, Query, description = "Session start time (HH:MM)"),
        ("treatment" = Option<String>, Query, description = "Treatment name shown in the event title")
    ),
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 400, description = "Invalid pattern, session count or start time"),
        (status = 422, description = "Series leaves the supported calendar range")
    ),
    tag = "booking"
)]
pub async fn get_schedule_ical(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<ScheduleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let start = match query.start_time.as_deref() {
        Some(value) => parse_start_time(value)?,
        None => state.exporter.default_start(),
    };
    let (_, sessions) = build_series(&state, query.start_date, &query.pattern, query.sessions)?;

    let treatment = query.treatment.as_deref().unwrap_or("Appointment");
    let body = state.exporter.generate(treatment, &sessions, start)?;
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=appointments.ics",
            ),
        ],
        body,
    ))
}

#[utoipa::path(
    post,
    path = "/quote",
    request_body = PricingInput,
    responses(
        (status = 200, description = "Price breakdown", body = PriceBreakdown),
        (status = 400, description = "Negative price, group size or session count below 1"),
        (status = 422, description = "Price out of range")
    ),
    tag = "booking"
)]
pub async fn post_quote(
    Json(input): Json<PricingInput>,
) -> Result<impl IntoResponse, ApiError> {
    let breakdown = price_breakdown(&input)?;
    debug!(total = %breakdown.total, multiplier = %breakdown.multiplier, "priced booking");
    Ok(Json(breakdown))
}

#[utoipa::path(
    post,
    path = "/bookings/draft",
    request_body = BookingDraftRequest,
    responses(
        (status = 200, description = "Payload for the booking service", body = BookingPayload),
        (status = 400, description = "Invalid draft")
    ),
    tag = "booking"
)]
pub async fn post_booking_draft(
    State(state): State<AppState>,
    Json(draft): Json<BookingDraftRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let start = match draft.start_time.as_deref() {
        Some(value) => parse_start_time(value)?,
        None => state.exporter.default_start(),
    };

    let (pattern, session_dates, number_of_sessions) = match &draft.recurrence {
        Some(recurrence) => {
            let (pattern, dates) = build_series(
                &state,
                draft.scheduled_date,
                &recurrence.pattern,
                recurrence.sessions,
            )?;
            (Some(pattern), dates, u32::from(recurrence.sessions))
        }
        None => (None, vec![draft.scheduled_date], 1),
    };

    let pricing = PricingInput {
        base_price: draft.base_price,
        is_group_booking: draft.is_group_booking,
        group_size: draft.group_size.unwrap_or(1),
        is_recurring: pattern.is_some(),
        number_of_sessions,
    };
    let total_price = compute_total_price(&pricing)?;

    let payload = BookingPayload {
        client_id: draft.client_id,
        treatment_id: draft.treatment_id,
        scheduled_date: draft.scheduled_date.and_time(start),
        is_recurring: pattern.is_some(),
        recurrence_pattern: pattern,
        recurrence_end: pattern.and(session_dates.last().copied()),
        is_group_booking: pricing.is_group_booking,
        group_size: pricing.group_size,
        total_price,
        notes: draft.notes,
        session_dates,
    };
    debug!(client_id = %payload.client_id, total = %payload.total_price, "built booking payload");
    Ok(Json(payload))
}
