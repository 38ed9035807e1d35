//! End-to-end auction scenarios.
//!
//! Each test drives a full engine wired to the in-memory ledger, event log,
//! and manual clock, and checks balances, registry state, and notifications.

use tulip_core::error::{AuctionError, TransferError};
use tulip_core::events::AuctionEvent;
use tulip_core::ledger::Transfer;
use tulip_core::types::AuctionStatus;
use tulip_engine::EngineConfig;
use tulip_tests::helpers::*;

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn buy_at_start_for_full_price() {
    init_tracing();
    let (mut e, _) = engine();
    let index = e.create_auction(seller(), 100, 1, "fake item", 60).unwrap();

    let s = e.buy(buyer(), index, 100).unwrap();

    assert_eq!(e.auction(index).unwrap().final_price, Some(100));
    assert_eq!(s.proceeds, 90);
    assert_eq!(s.refund, 0);
    assert_eq!(e.transfers().balance_of(&seller()), 90);
    assert_eq!(e.transfers().balance_of(&buyer()), 0);
}

#[test]
fn second_purchase_is_rejected_at_any_later_time() {
    init_tracing();
    let (mut e, clock) = engine();
    e.create_auction(seller(), 100, 1, "fake item", 60).unwrap();
    e.buy(buyer(), 0, 100).unwrap();

    for step in [0, 1, 30, 10_000] {
        clock.advance(step);
        assert_eq!(e.buy(ident(0xCC), 0, 1_000), Err(AuctionError::AuctionStopped(0)));
    }
    assert_eq!(e.auction(0).unwrap().final_price, Some(100));
}

#[test]
fn zero_duration_runs_two_days() {
    let (mut e, _) = engine();
    e.create_auction(seller(), TENTH_MILLI, 3, "fake item", 0).unwrap();
    let a = e.auction(0).unwrap();
    assert_eq!(a.ends_at - a.starts_at, 172_800);
    assert_eq!(a.ends_at, GENESIS + 172_800);
}

#[test]
fn starting_price_below_total_decay_is_rejected() {
    let (mut e, _) = engine();
    assert!(matches!(
        e.create_auction(seller(), 1, 3, "fake item", 60),
        Err(AuctionError::InvalidStartingPrice { starting_price: 1, .. })
    ));
    assert_eq!(e.auction_count(), 0);
    assert!(matches!(e.auction(0), Err(AuctionError::AuctionNotFound(0))));
}

#[test]
fn hundred_at_rate_three_for_a_minute_is_rejected() {
    let (mut e, _) = engine();
    assert_eq!(
        e.create_auction(seller(), 100, 3, "fake item", 60),
        Err(AuctionError::InvalidStartingPrice { starting_price: 100, required: 180 })
    );
    assert_eq!(e.auction_count(), 0);
    assert!(e.events().is_empty());
}

// ---------------------------------------------------------------------------
// Lifecycle with realistic amounts
// ---------------------------------------------------------------------------

#[test]
fn creates_auction_and_emits_event() {
    let (mut e, _) = engine();
    e.create_auction(seller(), TENTH_MILLI, 3, "fake item", 60).unwrap();

    let a = e.auction(0).unwrap();
    assert_eq!(a.item, "fake item");
    assert_eq!(a.ends_at, GENESIS + 60);
    assert_eq!(
        e.events().events(),
        &[AuctionEvent::Created {
            index: 0,
            item: "fake item".to_string(),
            starting_price: TENTH_MILLI,
            duration: 60,
        }]
    );
}

#[test]
fn seller_receives_price_minus_fee() {
    let (mut e, _) = engine();
    e.create_auction(seller(), TENTH_MILLI, 1_000_000_000_000, "fake item", 60).unwrap();

    e.buy(buyer(), 0, TENTH_MILLI).unwrap();

    let final_price = e.auction(0).unwrap().final_price.unwrap();
    assert_eq!(
        e.transfers().balance_of(&seller()),
        final_price - final_price * 10 / 100
    );
}

#[test]
fn buyer_refunded_after_one_second_of_decay() {
    let (mut e, clock) = engine();
    let rate = 1_000_000_000_000;
    e.create_auction(seller(), TENTH_MILLI, rate, "fake item", 60).unwrap();
    clock.advance(1);

    let s = e.buy(buyer(), 0, TENTH_MILLI).unwrap();

    assert_eq!(s.price, TENTH_MILLI - rate);
    assert_eq!(e.transfers().balance_of(&buyer()), rate);
    assert_eq!(
        e.transfers().history(),
        &[
            Transfer::new(buyer(), rate),
            Transfer::new(seller(), s.price - s.price / 10),
        ]
    );
}

#[test]
fn purchase_after_window_is_rejected() {
    let (mut e, clock) = engine();
    e.create_auction(seller(), TENTH_MILLI, 3, "fake item", 3).unwrap();
    clock.advance(4);

    assert!(matches!(
        e.buy(buyer(), 0, TENTH_MILLI),
        Err(AuctionError::AuctionEnded { index: 0, .. })
    ));
    assert_eq!(e.status(0).unwrap(), AuctionStatus::Expired);
    assert!(!e.auction(0).unwrap().stopped);
}

#[test]
fn underpayment_is_rejected() {
    let (mut e, _) = engine();
    e.create_auction(seller(), TENTH_MILLI, 3, "fake item", 60).unwrap();
    assert_eq!(
        e.buy(buyer(), 0, TENTH_MILLI / 10),
        Err(AuctionError::InsufficientFunds { paid: TENTH_MILLI / 10, price: TENTH_MILLI })
    );
}

#[test]
fn sale_emits_ended_event_with_buyer() {
    let (mut e, _) = engine();
    e.create_auction(seller(), TENTH_MILLI, 1_000_000_000_000, "fake item", 60).unwrap();
    e.buy(buyer(), 0, TENTH_MILLI).unwrap();

    let final_price = e.auction(0).unwrap().final_price.unwrap();
    assert_eq!(
        e.events().last(),
        Some(&AuctionEvent::Ended { index: 0, final_price, buyer: buyer() })
    );
}

#[test]
fn price_query_after_sale_is_rejected() {
    let (mut e, _) = engine();
    e.create_auction(seller(), TENTH_MILLI, 3, "fake item", 60).unwrap();
    e.buy(buyer(), 0, TENTH_MILLI).unwrap();
    assert_eq!(e.price_for(0), Err(AuctionError::AuctionStopped(0)));
}

#[test]
fn engine_owner_is_deployer() {
    let (e, _) = engine();
    assert_eq!(e.owner(), owner());
}

// ---------------------------------------------------------------------------
// Settlement atomicity
// ---------------------------------------------------------------------------

#[test]
fn rejected_payout_leaves_no_trace() {
    init_tracing();
    let (mut e, clock) = engine();
    e.create_auction(seller(), 1_000, 10, "vase", 60).unwrap();
    clock.advance(20);
    e.transfers_mut().reject_incoming(seller());

    let err = e.buy(buyer(), 0, 1_000).unwrap_err();

    assert_eq!(
        err,
        AuctionError::TransferFailed {
            index: 0,
            source: TransferError::Rejected { recipient: seller(), amount: 720 },
        }
    );
    let a = e.auction(0).unwrap();
    assert!(!a.stopped);
    assert_eq!(a.final_price, None);
    assert!(e.transfers().history().is_empty());
    assert_eq!(e.transfers().total_credited(), 0);
    assert_eq!(e.retained_fees(), 0);
    assert!(!e.events().events().iter().any(|ev| matches!(ev, AuctionEvent::Ended { .. })));
}

#[test]
fn another_buyer_can_purchase_after_failed_refund() {
    let (mut e, _) = engine();
    e.create_auction(seller(), 500, 1, "lamp", 60).unwrap();
    e.transfers_mut().reject_incoming(buyer());

    assert!(e.buy(buyer(), 0, 600).is_err());
    let s = e.buy(ident(0xCC), 0, 600).unwrap();

    assert_eq!(s.buyer, ident(0xCC));
    assert_eq!(e.transfers().balance_of(&ident(0xCC)), 100);
    assert_eq!(e.transfers().balance_of(&seller()), 450);
}

// ---------------------------------------------------------------------------
// Multiple auctions
// ---------------------------------------------------------------------------

#[test]
fn auctions_are_independent() {
    let (mut e, clock) = engine();
    e.create_auction(ident(0x10), 1_000, 10, "a", 60).unwrap();
    e.create_auction(ident(0x20), 2_000, 1, "b", 600).unwrap();
    e.create_auction(ident(0x30), 300, 5, "c", 60).unwrap();

    clock.advance(30);
    e.buy(buyer(), 1, 5_000).unwrap();
    clock.advance(31);

    assert_eq!(e.status(0).unwrap(), AuctionStatus::Expired);
    assert_eq!(e.status(1).unwrap(), AuctionStatus::Stopped);
    assert_eq!(e.status(2).unwrap(), AuctionStatus::Expired);
    assert_eq!(e.auction(1).unwrap().final_price, Some(1_970));
    assert_eq!(e.transfers().balance_of(&ident(0x20)), 1_773);
    assert_eq!(e.transfers().balance_of(&ident(0x10)), 0);
    assert_eq!(e.retained_fees(), 197);
}

#[test]
fn fees_accumulate_across_sales() {
    let (mut e, _) = engine_with(EngineConfig { fee_percent: 5, ..EngineConfig::default() });
    for i in 0..4 {
        e.create_auction(seller(), 1_000, 1, format!("lot {i}"), 60).unwrap();
        e.buy(buyer(), i, 1_000).unwrap();
    }
    assert_eq!(e.retained_fees(), 200);
    assert_eq!(e.transfers().balance_of(&seller()), 3_800);
}

#[test]
fn events_serialize_for_hosts() {
    let (mut e, _) = engine();
    e.create_auction(seller(), 100, 1, "chair", 60).unwrap();
    e.buy(buyer(), 0, 100).unwrap();

    let json = serde_json::to_value(e.events().events()).unwrap();
    assert_eq!(json[0]["kind"], "Created");
    assert_eq!(json[1]["kind"], "Ended");
    assert_eq!(json[1]["final_price"], 100);
}
