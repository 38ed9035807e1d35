//! Error types for the Tulip auction engine.
use thiserror::Error;

use crate::types::{Amount, AuctionId, Identity, Timestamp};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("recipient {recipient} rejected transfer of {amount}")] Rejected { recipient: Identity, amount: Amount },
    #[error("balance overflow crediting {recipient}")] BalanceOverflow { recipient: Identity },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuctionError {
    #[error("incorrect starting price: {starting_price} < {required}")] InvalidStartingPrice { starting_price: Amount, required: u128 },
    #[error("discount rate must be positive")] InvalidDiscountRate,
    #[error("auction not found: {0}")] AuctionNotFound(AuctionId),
    #[error("auction {0} stopped")] AuctionStopped(AuctionId),
    #[error("auction {index} ended at {ends_at}, now {now}")] AuctionEnded { index: AuctionId, ends_at: Timestamp, now: Timestamp },
    #[error("not enough funds: paid {paid}, price {price}")] InsufficientFunds { paid: Amount, price: Amount },
    #[error("settlement of auction {index} failed: {source}")] TransferFailed { index: AuctionId, source: TransferError },
    #[error("arithmetic overflow")] ArithmeticOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fee percent {0} exceeds 100")] FeeTooHigh(u64),
    #[error("default duration must be non-zero")] ZeroDefaultDuration,
}
