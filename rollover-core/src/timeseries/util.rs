//! Shared helpers for bar sequence normalization and lookup.

use chrono::{DateTime, Utc};
use rollover_types::{Bar, SortOrder};

/// Return `bars` in ascending order with unique timestamps.
///
/// A store that honors the request order needs only the reversal for descending
/// responses; anything else is sorted, keeping the first bar seen per timestamp.
#[must_use]
pub fn sorted_unique(mut bars: Vec<Bar>, order: SortOrder) -> Vec<Bar> {
    if matches!(order, SortOrder::Descending) {
        bars.reverse();
    }
    if bars.windows(2).all(|w| w[0].ts < w[1].ts) {
        return bars;
    }
    bars.sort_by_key(|b| b.ts);
    bars.dedup_by_key(|b| b.ts);
    bars
}

/// Find the bar at exactly `ts` in an ascending slice.
#[must_use]
pub fn bar_at(bars: &[Bar], ts: DateTime<Utc>) -> Option<(usize, &Bar)> {
    bars.binary_search_by_key(&ts, |b| b.ts)
        .ok()
        .map(|i| (i, &bars[i]))
}

/// Last bar strictly before `before` that carries a close.
#[must_use]
pub fn last_priced_before(bars: &[Bar], before: DateTime<Utc>) -> Option<&Bar> {
    bars.iter()
        .rev()
        .skip_while(|b| b.ts >= before)
        .find(|b| b.close.is_some())
}
