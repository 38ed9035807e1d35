//! Core engine types: identities, amounts, and the auction record.
//!
//! All monetary values are in the currency's smallest unit and all
//! timestamps are Unix seconds, both as u64.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount of value in the smallest currency unit.
pub type Amount = u64;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Position of an auction in the registry. Assigned on creation, never reused.
pub type AuctionId = usize;

/// A 32-byte account identity (seller, buyer, or engine operator).
///
/// Opaque to the engine: identities are issued and authenticated by the host.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity(pub [u8; 32]);

impl Identity {
    /// The all-zero identity.
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// One sellable item with a decaying price and a single-purchase outcome.
///
/// Every field except `final_price` and `stopped` is fixed at creation.
/// Those two change together, exactly once, when the auction is bought.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Auction {
    /// Receives the sale proceeds minus the operator fee.
    pub seller: Identity,
    /// Price at `starts_at`.
    pub starting_price: Amount,
    /// Price paid, set on sale. `None` while the auction is unsold.
    pub final_price: Option<Amount>,
    /// Price decrease per elapsed second.
    pub discount_rate: Amount,
    /// Free-form label, meaningless to the engine.
    pub item: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    /// Set once by a successful purchase, never cleared.
    pub stopped: bool,
}

impl Auction {
    /// Length of the sale window in seconds. Zero if `ends_at` precedes
    /// `starts_at`, which only a hand-built record can have.
    pub fn duration(&self) -> u64 {
        self.ends_at.saturating_sub(self.starts_at)
    }

    /// Whether the sale window has closed at `now`. Past `ends_at`, not at it.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now > self.ends_at
    }

    /// Lifecycle state as seen at `now`. Expiry is never stored.
    pub fn status_at(&self, now: Timestamp) -> AuctionStatus {
        if self.stopped {
            AuctionStatus::Stopped
        } else if self.is_expired_at(now) {
            AuctionStatus::Expired
        } else {
            AuctionStatus::Active
        }
    }
}

/// Derived lifecycle state of an auction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuctionStatus {
    /// Open for purchase at the current decayed price.
    Active,
    /// Bought. Terminal.
    Stopped,
    /// Window elapsed without a purchase.
    Expired,
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Stopped => f.write_str("stopped"),
            Self::Expired => f.write_str("expired"),
        }
    }
}
