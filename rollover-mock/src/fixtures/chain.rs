use chrono::{DateTime, Utc};
use rollover_core::{ChainEntry, ContractSymbol, RootSymbol};

use super::contracts::date;

/// Curated IF roll schedule: each contract becomes current on the Monday of its
/// predecessor's expiry week.
const IF_V1: &[(&str, &str)] = &[
    ("IF1906", "2019-01-02"),
    ("IF1909", "2019-06-17"),
    ("IF1912", "2019-09-16"),
];

pub fn by_root(root: &RootSymbol, version: u32) -> Vec<ChainEntry> {
    match (root.as_str(), version) {
        ("IF", 1) => IF_V1.iter().filter_map(|row| entry(*row)).collect(),
        _ => Vec::new(),
    }
}

fn entry((sym, from): (&str, &str)) -> Option<ChainEntry> {
    let effective_from: DateTime<Utc> = date(from)?.and_hms_opt(0, 0, 0)?.and_utc();
    Some(ChainEntry {
        contract: ContractSymbol::parse(sym).ok()?,
        effective_from,
    })
}
