use utoipa::OpenApi;

use crate::models::{BookingDraftRequest, BookingPayload, RecurrenceRequest, SeriesResponse};
use crate::pricing::{PriceBreakdown, PricingInput};
use crate::schedule::RecurrencePattern;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::get_schedule,
        crate::handlers::get_schedule_ical,
        crate::handlers::post_quote,
        crate::handlers::post_booking_draft
    ),
    components(schemas(
        RecurrencePattern,
        SeriesResponse,
        PricingInput,
        PriceBreakdown,
        RecurrenceRequest,
        BookingDraftRequest,
        BookingPayload
    )),
    tags(
        (name = "booking", description = "Recurring booking schedule and pricing")
    ),
)]
pub struct ApiDoc;
