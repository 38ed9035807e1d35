//! # tulip-price: Linear price decay for Dutch auctions.
//!
//! All calculations use integer arithmetic only, with u128 intermediates so
//! `discount_rate * elapsed` can never wrap.
//!
//! The price falls by `discount_rate` every second after `starts_at` and
//! floors at zero. Nothing here reads a clock: callers supply `now`.

pub mod linear;

pub use linear::{LinearDecay, current_price};
