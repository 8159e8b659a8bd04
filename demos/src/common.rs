use std::sync::Arc;

use rollover::{ContinuousSeries, DataConnector, Rollover, RollError};
use rollover_mock::MockConnector;

/// Return a connector for examples.
///
/// Every demo runs against the fixture-backed mock: IF and IC index futures for 2019
/// plus a curated IF chain table at version 1.
#[must_use]
pub fn get_connector() -> Arc<dyn DataConnector> {
    if std::env::var("ROLLOVER_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
    }
    Arc::new(MockConnector::new())
}

/// Engine over [`get_connector`] with default configuration.
///
/// # Errors
/// Propagates builder validation errors.
pub fn engine() -> Result<Rollover, RollError> {
    Rollover::builder().with_connector(get_connector()).build()
}

/// Print the rolls of `series` and a handful of bars around each of them.
pub fn print_rolls(series: &ContinuousSeries) {
    println!(
        "{} bars, {} rolls ({:?} / {:?})",
        series.bars.len(),
        series.rolls.len(),
        series.adjustment,
        series.direction
    );
    for roll in &series.rolls {
        println!(
            "  {} {} -> {}: {} vs {} (gap {})",
            roll.at.date_naive(),
            roll.outgoing,
            roll.incoming,
            roll.outgoing_close,
            roll.incoming_close,
            roll.gap
        );
        let around = series
            .bars
            .iter()
            .filter(|b| (b.ts - roll.at).num_days().abs() <= 3);
        for b in around {
            println!("      {} {:<7} {}", b.ts.date_naive(), b.contract.as_str(), b.close);
        }
    }
}
