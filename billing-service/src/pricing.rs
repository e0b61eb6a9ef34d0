//! Complexity-multiplier pricing for surgeries

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{BillingError, BillingResult};
use crate::models::{Complexity, Surgery};

/// Ceiling for base values and invoice amounts (one trillion).
pub const MAX_CURRENCY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

impl Complexity {
    /// Fixed price multiplier for the tier: 1.0, 1.3 or 1.8
    pub fn multiplier(self) -> Decimal {
        match self {
            Complexity::Low => Decimal::new(10, 1),
            Complexity::Medium => Decimal::new(13, 1),
            Complexity::High => Decimal::new(18, 1),
        }
    }
}

/// `base × multiplier(complexity)`, rounded half-up to cents.
///
/// # Errors
///
/// [`BillingError::Validation`] when the product does not fit a `Decimal`.
pub fn final_value(base_value: Decimal, complexity: Complexity) -> BillingResult<Decimal> {
    base_value
        .checked_mul(complexity.multiplier())
        .map(|value| {
            value
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
        })
        .ok_or_else(|| {
            BillingError::Validation(format!("baseValue {base_value} is too large to price"))
        })
}

/// Whether a stored surgery agrees with the pricing rule.
pub fn is_consistently_priced(surgery: &Surgery) -> bool {
    surgery.complexity_multiplier == surgery.complexity.multiplier()
        && final_value(surgery.base_value, surgery.complexity)
            .is_ok_and(|value| value == surgery.final_value)
}
