//! Trait interfaces between Tulip crates.
//!
//! - [`PriceModel`]: price curve math (tulip-price implements)
//!
//! The host-facing collaborators live next to their in-memory
//! implementations: [`Clock`](crate::clock::Clock),
//! [`ValueTransfer`](crate::ledger::ValueTransfer) and
//! [`EventSink`](crate::events::EventSink).

use crate::types::{Amount, Auction, Timestamp};

/// Pure computation of an auction's current price.
///
/// Implementations must be deterministic, must never fail, and must return a
/// price that is non-increasing in `now` and never above `starting_price`.
pub trait PriceModel: Send + Sync {
    /// Price at `now` for an auction that opened at `starts_at`.
    fn current_price(
        &self,
        starting_price: Amount,
        discount_rate: Amount,
        starts_at: Timestamp,
        now: Timestamp,
    ) -> Amount;

    /// Price of a registered auction at `now`.
    ///
    /// Default implementation delegates to [`current_price`](Self::current_price).
    fn price_of(&self, auction: &Auction, now: Timestamp) -> Amount {
        self.current_price(
            auction.starting_price,
            auction.discount_rate,
            auction.starts_at,
            now,
        )
    }
}
