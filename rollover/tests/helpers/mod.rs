// Shared fixtures for the engine tests.
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use rollover::{Bar, ChainEntry, Contract, ContractSymbol, Decimal, Rollover, RootSymbol};
use rollover_mock::{DynamicMockConnector, DynamicMockController};

/// Connector name used by every dynamic mock in these tests.
pub const MOCK: &str = "dyn";

/// Construct a UTC `DateTime` from components for readability in tests.
pub const fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
}

/// Midnight UTC of a calendar day.
pub const fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    dt(y, m, d, 0, 0, 0)
}

pub fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

/// Contract with multiplier 1 and no listing date.
pub fn contract(id: u64, symbol: &str, last_traded: DateTime<Utc>) -> Contract {
    let symbol = ContractSymbol::parse(symbol).expect("valid test symbol");
    Contract {
        id,
        root: symbol.root(),
        symbol,
        multiplier: Decimal::ONE,
        tick_size: Decimal::new(2, 1),
        listed: None,
        last_traded: last_traded.date_naive(),
    }
}

/// A priced bar with identical OHLC.
pub fn bar(ts: DateTime<Utc>, close: i64, volume: u64, open_interest: u64) -> Bar {
    let px = Some(dec(close));
    Bar {
        ts,
        open: px,
        high: px,
        low: px,
        close: px,
        volume,
        open_interest,
    }
}

/// A holiday bar: reported by the store, no prices, no volume.
pub const fn holiday(ts: DateTime<Utc>) -> Bar {
    Bar {
        ts,
        open: None,
        high: None,
        low: None,
        close: None,
        volume: 0,
        open_interest: 0,
    }
}

/// Weekdays in `[from, to]`.
pub fn weekdays(from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut out = Vec::new();
    let mut d = from;
    while d <= to {
        if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            out.push(d);
        }
        d += Duration::days(1);
    }
    out
}

/// Bars on every weekday in `[from, to]`; `f` maps the weekday index to (close, volume, oi).
pub fn series(
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    f: impl Fn(usize) -> (i64, u64, u64),
) -> Vec<Bar> {
    weekdays(from, to)
        .into_iter()
        .enumerate()
        .map(|(i, ts)| {
            let (c, v, oi) = f(i);
            bar(ts, c, v, oi)
        })
        .collect()
}

pub fn entry(symbol: &str, effective_from: DateTime<Utc>) -> ChainEntry {
    ChainEntry {
        contract: ContractSymbol::parse(symbol).expect("valid test symbol"),
        effective_from,
    }
}

pub fn root(s: &str) -> RootSymbol {
    RootSymbol::parse(s).expect("valid test root")
}

/// Engine over a fresh dynamic mock with default configuration.
pub fn engine() -> (Rollover, DynamicMockController) {
    let (conn, ctrl) = DynamicMockConnector::new_with_controller(MOCK);
    let r = Rollover::builder()
        .with_connector(conn)
        .build()
        .expect("engine builds");
    (r, ctrl)
}

/// Engine over a dynamic mock, customized through `f`.
pub fn engine_with(
    f: impl FnOnce(rollover::RolloverBuilder) -> rollover::RolloverBuilder,
) -> (Rollover, DynamicMockController) {
    let (conn, ctrl) = DynamicMockConnector::new_with_controller(MOCK);
    let r = f(Rollover::builder().with_connector(conn))
        .build()
        .expect("engine builds");
    (r, ctrl)
}

/// June/September IF pair used across the engine tests.
///
/// - IF1906 (id 1) trades 2019-06-10 ..= 2019-06-21 at 100 + i, volume 100, oi 1000.
/// - IF1909 (id 2) trades 2019-06-10 ..= 2019-06-28 at 102 + i, volume 40 until
///   2019-06-17 and 120 afterwards, oi 500.
///
/// With the default five-day gate the roll happens on 2019-06-18 with a gap of -2.
pub async fn seed_pair(ctrl: &DynamicMockController) {
    let june = contract(1, "IF1906", day(2019, 6, 21));
    let sept = contract(2, "IF1909", day(2019, 9, 20));
    ctrl.set_contract(june).await;
    ctrl.set_contract(sept).await;
    ctrl.set_bars(
        1,
        series(day(2019, 6, 10), day(2019, 6, 21), |i| (100 + i as i64, 100, 1000)),
    )
    .await;
    ctrl.set_bars(
        2,
        series(day(2019, 6, 10), day(2019, 6, 28), |i| {
            let vol = if i < 6 { 40 } else { 120 };
            (102 + i as i64, vol, 500)
        }),
    )
    .await;
}

/// Engine over an arbitrary connector with default configuration.
pub fn shared(conn: Arc<dyn rollover::DataConnector>) -> Rollover {
    Rollover::builder()
        .with_connector(conn)
        .build()
        .expect("engine builds")
}
