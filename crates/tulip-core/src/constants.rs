//! Engine constants. All monetary values in the currency's smallest unit,
//! all durations in seconds.

/// Duration applied when an auction is created with `duration == 0` (2 days).
pub const DEFAULT_DURATION_SECS: u64 = 2 * 24 * 60 * 60;

/// Share of every sale price retained by the engine operator, in percent.
pub const DEFAULT_FEE_PERCENT: u64 = 10;

/// Denominator for percentage arithmetic.
pub const PERCENT_PRECISION: u64 = 100;
