//! Linear decay model implementing the [`PriceModel`] trait.

use tulip_core::traits::PriceModel;
use tulip_core::types::{Amount, Timestamp};

/// Price at `now` of an auction that opened at `starts_at`.
///
/// `starting_price - discount_rate * (now - starts_at)`, floored at zero.
/// A `now` before `starts_at` counts as zero elapsed time.
pub fn current_price(
    starting_price: Amount,
    discount_rate: Amount,
    starts_at: Timestamp,
    now: Timestamp,
) -> Amount {
    let elapsed = now.saturating_sub(starts_at);
    // (2^64 - 1)^2 < 2^128, so the product fits.
    let discount = discount_rate as u128 * elapsed as u128;

    if discount < starting_price as u128 {
        // discount < starting_price <= u64::MAX, so the difference fits.
        starting_price - discount as u64
    } else {
        0
    }
}

/// The production price model: linear decay with a zero floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearDecay;

impl LinearDecay {
    pub fn new() -> Self {
        Self
    }
}

impl PriceModel for LinearDecay {
    fn current_price(
        &self,
        starting_price: Amount,
        discount_rate: Amount,
        starts_at: Timestamp,
        now: Timestamp,
    ) -> Amount {
        current_price(starting_price, discount_rate, starts_at, now)
    }
}
