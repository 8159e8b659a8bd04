use chrono::{Datelike, NaiveDate, Weekday};
use rollover_core::{Bar, Contract, Decimal};

use super::contracts::date;

/// Exchange holidays reported as empty bars.
const HOLIDAYS: &[&str] = &["2019-06-07", "2019-09-13"];

/// Daily bars of `c` from listing to last trading day, ascending.
///
/// Prices follow a shared trend with a fixed per-contract basis so every roll has a
/// known gap. Volume and open interest stay flat until the final week, then fade so the
/// next contract overtakes them inside the default calendar gate.
pub fn daily(c: &Contract) -> Vec<Bar> {
    let Some(start) = c.listed else {
        return Vec::new();
    };
    let basis = basis(c);
    let holidays: Vec<NaiveDate> = HOLIDAYS.iter().filter_map(|s| date(s)).collect();
    start
        .iter_days()
        .take_while(|d| *d <= c.last_traded)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .filter_map(|d| {
            let ts = d.and_hms_opt(0, 0, 0)?.and_utc();
            if holidays.contains(&d) {
                return Some(Bar {
                    ts,
                    open: None,
                    high: None,
                    low: None,
                    close: None,
                    volume: 0,
                    open_interest: 0,
                });
            }
            let close = trend(d) + basis;
            let days_left = (c.last_traded - d).num_days().max(0) as u64;
            let volume = activity(days_left);
            Some(Bar {
                ts,
                open: Some(close - Decimal::ONE),
                high: Some(close + Decimal::from(2)),
                low: Some(close - Decimal::from(3)),
                close: Some(close),
                volume,
                open_interest: volume * 4,
            })
        })
        .collect()
}

fn basis(c: &Contract) -> Decimal {
    // Each later expiry trades 20 points under its predecessor.
    let quarter = i64::from(c.last_traded.month0() / 3);
    Decimal::from(20 * (2 - quarter))
}

fn trend(d: NaiveDate) -> Decimal {
    let n = i64::from(d.ordinal0());
    let wiggle = (n * 7) % 11;
    Decimal::from(3600) + Decimal::new(4 * n + 2 * wiggle, 1)
}

const fn activity(days_left: u64) -> u64 {
    match days_left {
        0..=7 => 200 * days_left + 100,
        8..=100 => 3000,
        _ => 800,
    }
}

