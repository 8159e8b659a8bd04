use chrono::{DateTime, Utc};

use crate::RollError;
use rollover_types::{ChainEntry, Contract, ContractSymbol, Instrument, RootSymbol};

/// An instrument after symbol parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInstrument {
    /// A root symbol to resolve through a chain table or discovery.
    Root(RootSymbol),
    /// A single literal contract.
    Contract(ContractSymbol),
    /// Two or more contracts sharing `root`, in caller order.
    Contracts(RootSymbol, Vec<ContractSymbol>),
}

/// Parse a build instrument into typed symbols.
///
/// A one-element contract list is treated as a single contract.
///
/// # Errors
/// - `UnsupportedInstrument` when a symbol parses as neither root nor contract, or a
///   list item is not a contract symbol.
/// - `AmbiguousChain` when list items span more than one root.
/// - `InvalidArg` for an empty list.
pub fn parse_instrument(instrument: &Instrument) -> Result<ParsedInstrument, RollError> {
    match instrument {
        Instrument::Root(s) => {
            if let Ok(c) = ContractSymbol::parse(s) {
                return Ok(ParsedInstrument::Contract(c));
            }
            RootSymbol::parse(s).map(ParsedInstrument::Root)
        }
        Instrument::Contracts(list) => {
            let symbols = list
                .iter()
                .map(|s| ContractSymbol::parse(s))
                .collect::<Result<Vec<_>, _>>()?;
            let root = single_root(&symbols)?;
            match <[ContractSymbol; 1]>::try_from(symbols) {
                Ok([one]) => Ok(ParsedInstrument::Contract(one)),
                Err(many) => Ok(ParsedInstrument::Contracts(root, many)),
            }
        }
    }
}

/// The one root shared by every symbol.
///
/// # Errors
/// `AmbiguousChain` listing the distinct roots in first-seen order, or `InvalidArg`
/// when `symbols` is empty.
pub fn single_root(symbols: &[ContractSymbol]) -> Result<RootSymbol, RollError> {
    let mut roots: Vec<RootSymbol> = Vec::new();
    for s in symbols {
        let r = s.root();
        if !roots.contains(&r) {
            roots.push(r);
        }
    }
    match roots.len() {
        0 => Err(RollError::InvalidArg("empty contract list".into())),
        1 => Ok(roots.swap_remove(0)),
        _ => Err(RollError::AmbiguousChain {
            roots: roots.into_iter().map(String::from).collect(),
        }),
    }
}

/// Sort a chain table and trim it to the entries relevant for `[from, to]`.
///
/// Keeps the latest entry strictly before `from` (it is current at `from`) and the
/// earliest entry strictly after `to` (it bounds the last segment); everything further
/// out is dropped.
#[must_use]
pub fn trim_chain(
    mut entries: Vec<ChainEntry>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<ChainEntry> {
    entries.sort_by_key(|e| e.effective_from);
    let end = to.map_or(entries.len(), |t| {
        let upto = entries.iter().take_while(|e| e.effective_from <= t).count();
        (upto + 1).min(entries.len())
    });
    entries.truncate(end);
    let start = from.map_or(0, |f| {
        entries
            .iter()
            .take_while(|e| e.effective_from < f)
            .count()
            .saturating_sub(1)
    });
    entries.drain(..start);
    entries
}

/// Filter and order contracts listed by the bar store for discovery.
///
/// Keeps contracts of `root` whose expiry month is in `included` (when given), whose
/// trading life overlaps `[from, to]`, ordered by `last_traded` then symbol.
#[must_use]
pub fn filter_discovered(
    contracts: Vec<Contract>,
    root: &RootSymbol,
    included: Option<&[u8]>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<Contract> {
    let mut out: Vec<Contract> = contracts
        .into_iter()
        .filter(|c| &c.root == root)
        .filter(|c| included.is_none_or(|months| months.contains(&c.symbol.month())))
        .filter(|c| from.is_none_or(|f| c.last_traded >= f.date_naive()))
        .filter(|c| {
            to.is_none_or(|t| c.listed.is_none_or(|listed| listed <= t.date_naive()))
        })
        .collect();
    out.sort_by(|a, b| {
        a.last_traded
            .cmp(&b.last_traded)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    out
}
