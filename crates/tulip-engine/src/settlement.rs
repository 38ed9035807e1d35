//! Purchase settlement: splitting a payment into fee, proceeds, and refund.
//!
//! Uses u128 intermediates for `price * fee_percent` so the split never wraps.

use serde::{Deserialize, Serialize};

use tulip_core::constants::PERCENT_PRECISION;
use tulip_core::error::AuctionError;
use tulip_core::ledger::Transfer;
use tulip_core::types::{Amount, AuctionId, Identity};

/// Outcome of a successful purchase.
///
/// Invariant: `proceeds + refund + fee == price + refund == payment`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub index: AuctionId,
    pub buyer: Identity,
    pub seller: Identity,
    /// Decayed price at the moment of purchase; becomes the auction's final price.
    pub price: Amount,
    /// Kept by the engine operator.
    pub fee: Amount,
    /// Paid to the seller.
    pub proceeds: Amount,
    /// Returned to the buyer.
    pub refund: Amount,
}

impl Settlement {
    /// Split `payment` for a purchase at `price`.
    ///
    /// # Errors
    ///
    /// - [`AuctionError::InsufficientFunds`] if `payment < price`
    pub fn compute(
        index: AuctionId,
        buyer: Identity,
        seller: Identity,
        price: Amount,
        payment: Amount,
        fee_percent: u64,
    ) -> Result<Self, AuctionError> {
        let refund = payment
            .checked_sub(price)
            .ok_or(AuctionError::InsufficientFunds { paid: payment, price })?;

        let fee = fee_of(price, fee_percent)?;
        let proceeds = price.checked_sub(fee).ok_or(AuctionError::ArithmeticOverflow)?;

        Ok(Self { index, buyer, seller, price, fee, proceeds, refund })
    }

    /// Total value the buyer attached.
    pub fn payment(&self) -> Amount {
        self.price + self.refund
    }

    /// Payout batch: the refund (only if non-zero), then the seller proceeds.
    pub fn transfers(&self) -> Vec<Transfer> {
        let mut batch = Vec::with_capacity(2);
        if self.refund > 0 {
            batch.push(Transfer::new(self.buyer, self.refund));
        }
        batch.push(Transfer::new(self.seller, self.proceeds));
        batch
    }
}

/// Operator fee on `price`: `price * fee_percent / 100`, rounded down.
pub fn fee_of(price: Amount, fee_percent: u64) -> Result<Amount, AuctionError> {
    let fee = price as u128 * fee_percent as u128 / PERCENT_PRECISION as u128;
    Amount::try_from(fee).map_err(|_| AuctionError::ArithmeticOverflow)
}
