//! Property tests for the indicator engine and lifecycle invariants.
//!
//! Uses proptest to verify:
//! 1. Indicators are total — never NaN, never out of bounds, neutral on
//!    short series
//! 2. The squeeze is a strict conjunction of its two legs
//! 3. SL/TP are always oriented by direction with the configured multiples
//! 4. Arming is idempotent — an armed controller never re-arms or moves levels

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use voltscan_core::indicators::{atr, efficiency_ratio, rsi, volatility_z};
use voltscan_core::{
    is_squeeze, CycleEvent, Direction, IndicatorSnapshot, InstrumentController, StrategyConfig,
    TradeIntent,
};

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10.0..1000.0_f64, 0..max_len)
}

fn arb_snapshot() -> impl Strategy<Value = IndicatorSnapshot> {
    (
        0.0..50.0_f64,     // atr
        -5.0..5.0_f64,     // volatility_z
        0.0..1.0_f64,      // efficiency_ratio
        0.0..100.0_f64,    // rsi
        10.0..1000.0_f64,  // price
    )
        .prop_map(|(atr, volatility_z, efficiency_ratio, rsi, price)| IndicatorSnapshot {
            atr,
            volatility_z,
            efficiency_ratio,
            rsi,
            price,
        })
}

// ── 1. Indicators are total ──────────────────────────────────────────

proptest! {
    /// No input produces NaN or an out-of-range value from any indicator.
    #[test]
    fn indicators_are_always_finite_and_bounded(closes in arb_closes(300)) {
        let a = atr(&closes, 14);
        prop_assert!(a.is_finite() && a >= 0.0);

        let z = volatility_z(&closes, 20, 100);
        prop_assert!(z.is_finite());

        let er = efficiency_ratio(&closes, 10);
        prop_assert!(er.is_finite());
        prop_assert!((0.0..=1.0).contains(&er));

        let r = rsi(&closes, 14);
        prop_assert!(r.is_finite());
        prop_assert!((0.0..=100.0).contains(&r));
    }

    /// Below the minimum history, every indicator reports its neutral value.
    #[test]
    fn short_series_yield_neutral_values(closes in arb_closes(10)) {
        prop_assert_eq!(atr(&closes, 14), 0.0);
        prop_assert_eq!(volatility_z(&closes, 20, 100), 0.0);
        prop_assert_eq!(efficiency_ratio(&closes, 10), 0.0);
        prop_assert_eq!(rsi(&closes, 14), 50.0);
    }
}

// ── 2. Squeeze conjunction ───────────────────────────────────────────

proptest! {
    /// is_squeeze is true iff BOTH legs hold; flipping either alone kills it.
    #[test]
    fn squeeze_is_conjunction(snapshot in arb_snapshot()) {
        let cfg = StrategyConfig::default();
        let expected = snapshot.volatility_z < cfg.z_trigger
            && snapshot.efficiency_ratio > cfg.er_filter;
        prop_assert_eq!(is_squeeze(&snapshot, &cfg), expected);
    }
}

// ── 3. SL/TP orientation ─────────────────────────────────────────────

proptest! {
    /// A buy stops below entry and targets above; a sell mirrors it. The
    /// distances are exactly the configured ATR multiples.
    #[test]
    fn intent_levels_are_oriented(
        entry in 10.0..1000.0_f64,
        atr_val in 0.01..50.0_f64,
    ) {
        let buy = TradeIntent::new("X", Direction::Buy, entry, atr_val, 3.0, 9.0, 1.0);
        prop_assert!((buy.stop_loss - (entry - 3.0 * atr_val)).abs() < 1e-9);
        prop_assert!((buy.take_profit - (entry + 9.0 * atr_val)).abs() < 1e-9);

        let sell = TradeIntent::new("X", Direction::Sell, entry, atr_val, 3.0, 9.0, 1.0);
        prop_assert!((sell.stop_loss - (entry + 3.0 * atr_val)).abs() < 1e-9);
        prop_assert!((sell.take_profit - (entry - 9.0 * atr_val)).abs() < 1e-9);
    }
}

// ── 4. Arming idempotence ────────────────────────────────────────────

proptest! {
    /// However many squeeze snapshots follow, an armed controller keeps its
    /// original levels until expiry or breakout.
    #[test]
    fn armed_controller_never_rearms(prices in prop::collection::vec(50.0..150.0_f64, 1..20)) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut c = InstrumentController::new("X", StrategyConfig::default(), 1.0);

        let arm = c.on_cycle(
            IndicatorSnapshot {
                atr: 1.0,
                volatility_z: -3.0,
                efficiency_ratio: 0.9,
                rsi: 50.0,
                price: 100.0,
            },
            now,
        );
        let original = match arm {
            CycleEvent::Armed { ghost } => ghost,
            other => panic!("expected Armed, got {other:?}"),
        };

        for (i, price) in prices.into_iter().enumerate() {
            // Keep price inside the channel so only idempotence is exercised.
            let price = price.clamp(original.sell_level + 0.01, original.buy_level - 0.01);
            let event = c.on_cycle(
                IndicatorSnapshot {
                    atr: 5.0,
                    volatility_z: -3.0,
                    efficiency_ratio: 0.9,
                    rsi: 50.0,
                    price,
                },
                now + chrono::Duration::seconds(i as i64 + 1),
            );
            prop_assert!(matches!(event, CycleEvent::Idle { .. }), "expected Idle");
            prop_assert_eq!(c.view().ghost.unwrap(), original);
        }
    }
}
