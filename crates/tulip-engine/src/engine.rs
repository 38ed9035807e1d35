//! The auction engine: registry, lifecycle, and purchase settlement.
//!
//! The registry is an append-only `Vec<Auction>`; an auction's identity is
//! its index. Two operations write to it: [`AuctionEngine::create_auction`]
//! appends, [`AuctionEngine::buy`] flips one entry to stopped. Expiry is
//! never stored. It is derived from the clock whenever it matters.
//!
//! A purchase pays out before it commits. The refund and the seller proceeds
//! go to the [`ValueTransfer`] channel as one atomic batch; only when that
//! batch settles does the auction stop, the fee get retained, and the
//! `Ended` event fire. A rejected payout therefore leaves no trace.

use tracing::{debug, info, warn};

use tulip_core::clock::Clock;
use tulip_core::error::{AuctionError, ConfigError};
use tulip_core::events::{AuctionEvent, EventSink};
use tulip_core::ledger::ValueTransfer;
use tulip_core::traits::PriceModel;
use tulip_core::types::{Amount, Auction, AuctionId, AuctionStatus, Identity, Timestamp};
use tulip_price::LinearDecay;

use crate::config::EngineConfig;
use crate::settlement::Settlement;

/// Dutch auction engine.
///
/// Generic over its collaborators: the time source `C`, the payout channel
/// `T`, the notification sink `S`, and the price curve `P`.
///
/// Not thread-safe on its own: mutating calls take `&mut self`. Use
/// [`SharedEngine`](crate::shared::SharedEngine) to serialize calls from
/// several threads.
pub struct AuctionEngine<C, T, S, P = LinearDecay> {
    config: EngineConfig,
    /// Operator identity; owns the retained fees.
    owner: Identity,
    auctions: Vec<Auction>,
    /// Fees kept from completed sales.
    retained_fees: u128,
    clock: C,
    transfers: T,
    events: S,
    pricing: P,
}

impl<C, T, S> AuctionEngine<C, T, S, LinearDecay>
where
    C: Clock,
    T: ValueTransfer,
    S: EventSink,
{
    /// Create an engine with the linear decay price model.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`EngineConfig::validate`].
    pub fn new(
        config: EngineConfig,
        owner: Identity,
        clock: C,
        transfers: T,
        events: S,
    ) -> Result<Self, ConfigError> {
        Self::with_price_model(config, owner, clock, transfers, events, LinearDecay::new())
    }
}

impl<C, T, S, P> AuctionEngine<C, T, S, P>
where
    C: Clock,
    T: ValueTransfer,
    S: EventSink,
    P: PriceModel,
{
    /// Create an engine with a custom price model.
    pub fn with_price_model(
        config: EngineConfig,
        owner: Identity,
        clock: C,
        transfers: T,
        events: S,
        pricing: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            owner,
            auctions: Vec::new(),
            retained_fees: 0,
            clock,
            transfers,
            events,
            pricing,
        })
    }

    /// Validated configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Operator who deployed the engine and keeps the fees.
    pub fn owner(&self) -> Identity {
        self.owner
    }

    /// Total fees kept from completed sales.
    pub fn retained_fees(&self) -> u128 {
        self.retained_fees
    }

    /// Time source used for auction start times and price decay.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn transfers(&self) -> &T {
        &self.transfers
    }

    /// Mutable access to the payout channel, for host-side bookkeeping.
    pub fn transfers_mut(&mut self) -> &mut T {
        &mut self.transfers
    }

    pub fn events(&self) -> &S {
        &self.events
    }

    /// Number of auctions ever created.
    pub fn auction_count(&self) -> usize {
        self.auctions.len()
    }

    /// All auctions with their indices, in creation order.
    pub fn auctions(&self) -> impl Iterator<Item = (AuctionId, &Auction)> {
        self.auctions.iter().enumerate()
    }

    /// Look up an auction by index.
    ///
    /// # Errors
    ///
    /// - [`AuctionError::AuctionNotFound`] if `index` is out of range
    pub fn auction(&self, index: AuctionId) -> Result<&Auction, AuctionError> {
        self.auctions
            .get(index)
            .ok_or(AuctionError::AuctionNotFound(index))
    }

    /// Lifecycle state of an auction at the current time.
    pub fn status(&self, index: AuctionId) -> Result<AuctionStatus, AuctionError> {
        Ok(self.auction(index)?.status_at(self.clock.now()))
    }

    /// Current decayed price of an unsold auction.
    ///
    /// An expired auction still reports its (floored) price; only a sold
    /// auction has no price.
    ///
    /// # Errors
    ///
    /// - [`AuctionError::AuctionNotFound`] if `index` is out of range
    /// - [`AuctionError::AuctionStopped`] if the auction has been bought
    pub fn price_for(&self, index: AuctionId) -> Result<Amount, AuctionError> {
        let auction = self.auction(index)?;
        if auction.stopped {
            return Err(AuctionError::AuctionStopped(index));
        }
        Ok(self.pricing.price_of(auction, self.clock.now()))
    }

    /// Register a new auction sold by `seller`.
    ///
    /// A `duration` of zero is replaced by the configured default. The
    /// starting price must cover the full decay over the effective duration.
    ///
    /// Returns the new auction's index.
    ///
    /// # Errors
    ///
    /// - [`AuctionError::InvalidDiscountRate`] if `discount_rate` is zero
    /// - [`AuctionError::InvalidStartingPrice`] if
    ///   `starting_price < discount_rate * duration`
    /// - [`AuctionError::ArithmeticOverflow`] if the end time does not fit
    pub fn create_auction(
        &mut self,
        seller: Identity,
        starting_price: Amount,
        discount_rate: Amount,
        item: impl Into<String>,
        duration: u64,
    ) -> Result<AuctionId, AuctionError> {
        let duration = self.config.effective_duration(duration);

        if discount_rate == 0 {
            return Err(AuctionError::InvalidDiscountRate);
        }

        let required = discount_rate as u128 * duration as u128;
        if (starting_price as u128) < required {
            debug!(starting_price, required, "rejected auction: starting price too low");
            return Err(AuctionError::InvalidStartingPrice { starting_price, required });
        }

        let starts_at = self.clock.now();
        let ends_at = starts_at
            .checked_add(duration)
            .ok_or(AuctionError::ArithmeticOverflow)?;

        let item = item.into();
        let index = self.auctions.len();
        self.auctions.push(Auction {
            seller,
            starting_price,
            final_price: None,
            discount_rate,
            item: item.clone(),
            starts_at,
            ends_at,
            stopped: false,
        });

        info!(index, %seller, starting_price, discount_rate, duration, "created auction");
        self.events.emit(AuctionEvent::Created {
            index,
            item,
            starting_price,
            duration,
        });

        Ok(index)
    }

    /// Buy auction `index` for `buyer`, who attached `payment`.
    ///
    /// The sale happens at the current decayed price. Any overpayment is
    /// refunded to the buyer; the seller receives the price minus the fee.
    /// All effects happen together or not at all.
    ///
    /// # Errors
    ///
    /// - [`AuctionError::AuctionNotFound`] if `index` is out of range
    /// - [`AuctionError::AuctionStopped`] if the auction was already bought
    /// - [`AuctionError::AuctionEnded`] if the sale window has closed
    /// - [`AuctionError::InsufficientFunds`] if `payment` is below the price
    /// - [`AuctionError::TransferFailed`] if the refund or proceeds payout is
    ///   rejected; the auction stays buyable
    pub fn buy(
        &mut self,
        buyer: Identity,
        index: AuctionId,
        payment: Amount,
    ) -> Result<Settlement, AuctionError> {
        let now = self.clock.now();
        let settlement = self.quote(buyer, index, payment, now).inspect_err(|e| {
            debug!(index, %buyer, payment, "rejected purchase: {e}");
        })?;

        if let Err(source) = self.transfers.settle(&settlement.transfers()) {
            warn!(index, %buyer, "payout rejected, purchase reverted: {source}");
            return Err(AuctionError::TransferFailed { index, source });
        }

        self.commit(&settlement)?;

        info!(
            index,
            %buyer,
            price = settlement.price,
            fee = settlement.fee,
            refund = settlement.refund,
            "auction sold"
        );
        self.events.emit(AuctionEvent::Ended {
            index,
            final_price: settlement.price,
            buyer,
        });

        Ok(settlement)
    }

    /// Validate a purchase and compute its split without touching any state.
    fn quote(
        &self,
        buyer: Identity,
        index: AuctionId,
        payment: Amount,
        now: Timestamp,
    ) -> Result<Settlement, AuctionError> {
        let auction = self.auction(index)?;
        if auction.stopped {
            return Err(AuctionError::AuctionStopped(index));
        }
        if auction.is_expired_at(now) {
            return Err(AuctionError::AuctionEnded {
                index,
                ends_at: auction.ends_at,
                now,
            });
        }

        let price = self.pricing.price_of(auction, now);
        Settlement::compute(
            index,
            buyer,
            auction.seller,
            price,
            payment,
            self.config.fee_percent,
        )
    }

    /// Record a settled sale. Runs only after the payout batch succeeded.
    fn commit(&mut self, settlement: &Settlement) -> Result<(), AuctionError> {
        let auction = self
            .auctions
            .get_mut(settlement.index)
            .ok_or(AuctionError::AuctionNotFound(settlement.index))?;
        auction.final_price = Some(settlement.price);
        auction.stopped = true;
        self.retained_fees += settlement.fee as u128;
        Ok(())
    }
}
