//! Shared test helpers for scenario and adversarial tests.

use tulip_core::clock::ManualClock;
use tulip_core::events::MemoryEventLog;
use tulip_core::ledger::MemoryLedger;
use tulip_core::types::{Identity, Timestamp};
use tulip_engine::{AuctionEngine, EngineConfig};

/// Engine wired to in-memory collaborators.
pub type TestEngine = AuctionEngine<ManualClock, MemoryLedger, MemoryEventLog>;

/// Clock reading every fixture starts at.
pub const GENESIS: Timestamp = 1_700_000_000;

/// 0.0001 of an 18-decimal currency unit.
pub const TENTH_MILLI: u64 = 100_000_000_000_000;

/// Identity from a seed byte.
pub fn ident(seed: u8) -> Identity {
    Identity([seed; 32])
}

pub fn owner() -> Identity {
    ident(0x01)
}

pub fn seller() -> Identity {
    ident(0x55)
}

pub fn buyer() -> Identity {
    ident(0xBB)
}

/// Engine with the default configuration, owned by [`owner`], at [`GENESIS`].
///
/// The returned clock shares its reading with the engine's.
pub fn engine() -> (TestEngine, ManualClock) {
    engine_with(EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> (TestEngine, ManualClock) {
    let clock = ManualClock::new(GENESIS);
    let engine = AuctionEngine::new(
        config,
        owner(),
        clock.clone(),
        MemoryLedger::new(),
        MemoryEventLog::new(),
    )
    .expect("valid test config");
    (engine, clock)
}

/// Install a log subscriber honouring `RUST_LOG` (default `warn`).
///
/// Safe to call from every test; only the first call takes effect.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
