use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Per-head factor applied to group bookings (15% off).
const GROUP_RATE: Decimal = Decimal::from_parts(85, 0, 0, false, 2);
/// Factor applied to long recurring series (10% off).
const RECURRING_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 1);
/// Minimum series length that earns the recurring discount.
pub const RECURRING_DISCOUNT_SESSIONS: u32 = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Price calculation overflowed")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PricingInput {
    #[schema(value_type = String, example = "100.00")]
    pub base_price: Decimal,
    #[serde(default)]
    pub is_group_booking: bool,
    #[serde(default = "default_one")]
    pub group_size: u32,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default = "default_one")]
    pub number_of_sessions: u32,
}

fn default_one() -> u32 {
    1
}

impl PricingInput {
    pub fn single(base_price: Decimal) -> Self {
        Self {
            base_price,
            is_group_booking: false,
            group_size: 1,
            is_recurring: false,
            number_of_sessions: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceBreakdown {
    #[schema(value_type = String, example = "100.00")]
    pub base_price: Decimal,
    #[schema(value_type = String, example = "3.40")]
    pub multiplier: Decimal,
    pub group_discount_applied: bool,
    pub recurring_discount_applied: bool,
    #[schema(value_type = String, example = "340.00")]
    pub total: Decimal,
}

/// Rounds to two decimals, halves away from zero, always keeping two places.
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

pub fn price_breakdown(input: &PricingInput) -> Result<PriceBreakdown, PricingError> {
    if input.base_price < Decimal::ZERO {
        return Err(PricingError::InvalidArgument(
            "base price must not be negative".into(),
        ));
    }
    if input.group_size < 1 {
        return Err(PricingError::InvalidArgument(
            "group size must be at least 1".into(),
        ));
    }
    if input.number_of_sessions < 1 {
        return Err(PricingError::InvalidArgument(
            "number of sessions must be at least 1".into(),
        ));
    }

    let mut multiplier = Decimal::ONE;
    let group_discount_applied = input.is_group_booking;
    if group_discount_applied {
        // Scales with headcount: the total covers every participant.
        let per_group = Decimal::from(input.group_size)
            .checked_mul(GROUP_RATE)
            .ok_or(PricingError::Overflow)?;
        multiplier = multiplier
            .checked_mul(per_group)
            .ok_or(PricingError::Overflow)?;
    }

    let recurring_discount_applied =
        input.is_recurring && input.number_of_sessions >= RECURRING_DISCOUNT_SESSIONS;
    if recurring_discount_applied {
        multiplier = multiplier
            .checked_mul(RECURRING_RATE)
            .ok_or(PricingError::Overflow)?;
    }

    let total = input
        .base_price
        .checked_mul(multiplier)
        .ok_or(PricingError::Overflow)?;

    Ok(PriceBreakdown {
        base_price: input.base_price,
        multiplier,
        group_discount_applied,
        recurring_discount_applied,
        total: round_currency(total),
    })
}

pub fn compute_total_price(input: &PricingInput) -> Result<Decimal, PricingError> {
    Ok(price_breakdown(input)?.total)
}
