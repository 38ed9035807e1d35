//! # tulip-core
//! Foundation types and collaborator traits for the Tulip auction engine.
//!
//! - [`types`]: identities, amounts, the [`Auction`](types::Auction) record
//! - [`error`]: `AuctionError`, `TransferError`, `ConfigError`
//! - [`traits`]: the [`PriceModel`](traits::PriceModel) seam
//! - [`clock`]: system and manual time sources
//! - [`ledger`]: value-transfer channel and the in-memory ledger
//! - [`events`]: auction notifications and the in-memory event log

pub mod clock;
pub mod constants;
pub mod error;
pub mod events;
pub mod ledger;
pub mod traits;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{AuctionEvent, EventSink, MemoryEventLog};
pub use ledger::{MemoryLedger, Transfer, ValueTransfer};
pub use types::{Amount, Auction, AuctionId, AuctionStatus, Identity, Timestamp};
