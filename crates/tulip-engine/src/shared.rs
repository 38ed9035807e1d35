//! Thread-safe engine handle.
//!
//! [`SharedEngine`] puts an [`AuctionEngine`] behind a `parking_lot::Mutex`
//! so that calls from several threads are serialized: each one completes or
//! fails in full before the next observes the registry.

use std::sync::Arc;

use parking_lot::Mutex;

use tulip_core::clock::Clock;
use tulip_core::error::AuctionError;
use tulip_core::events::EventSink;
use tulip_core::ledger::ValueTransfer;
use tulip_core::traits::PriceModel;
use tulip_core::types::{Amount, Auction, AuctionId, AuctionStatus, Identity};
use tulip_price::LinearDecay;

use crate::engine::AuctionEngine;
use crate::settlement::Settlement;

/// Cloneable handle to a mutex-guarded engine.
pub struct SharedEngine<C, T, S, P = LinearDecay> {
    inner: Arc<Mutex<AuctionEngine<C, T, S, P>>>,
}

impl<C, T, S, P> Clone for SharedEngine<C, T, S, P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C, T, S, P> SharedEngine<C, T, S, P>
where
    C: Clock,
    T: ValueTransfer,
    S: EventSink,
    P: PriceModel,
{
    pub fn new(engine: AuctionEngine<C, T, S, P>) -> Self {
        Self { inner: Arc::new(Mutex::new(engine)) }
    }

    pub fn create_auction(
        &self,
        seller: Identity,
        starting_price: Amount,
        discount_rate: Amount,
        item: impl Into<String>,
        duration: u64,
    ) -> Result<AuctionId, AuctionError> {
        self.inner
            .lock()
            .create_auction(seller, starting_price, discount_rate, item, duration)
    }

    pub fn buy(
        &self,
        buyer: Identity,
        index: AuctionId,
        payment: Amount,
    ) -> Result<Settlement, AuctionError> {
        self.inner.lock().buy(buyer, index, payment)
    }

    pub fn price_for(&self, index: AuctionId) -> Result<Amount, AuctionError> {
        self.inner.lock().price_for(index)
    }

    /// Snapshot of an auction.
    pub fn auction(&self, index: AuctionId) -> Result<Auction, AuctionError> {
        self.inner.lock().auction(index).cloned()
    }

    pub fn status(&self, index: AuctionId) -> Result<AuctionStatus, AuctionError> {
        self.inner.lock().status(index)
    }

    pub fn auction_count(&self) -> usize {
        self.inner.lock().auction_count()
    }

    pub fn retained_fees(&self) -> u128 {
        self.inner.lock().retained_fees()
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut AuctionEngine<C, T, S, P>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
