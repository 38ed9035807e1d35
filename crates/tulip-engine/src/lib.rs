//! # tulip-engine: Auction registry and settlement.
//!
//! Composes the Tulip subsystems into an auction engine:
//! - [`engine::AuctionEngine`]: registry, lifecycle, purchase validation
//! - [`settlement`]: fee/proceeds/refund split and the payout batch
//! - [`shared::SharedEngine`]: serialized handle for multi-threaded hosts
//! - [`config::EngineConfig`]: fee rate and default duration

pub mod config;
pub mod engine;
pub mod settlement;
pub mod shared;

pub use config::EngineConfig;
pub use engine::AuctionEngine;
pub use settlement::Settlement;
pub use shared::SharedEngine;
