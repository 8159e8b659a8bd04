use async_trait::async_trait;

use crate::RollError;
use rollover_types::{Bar, BarRequest, ChainEntry, Contract, ContractSymbol, RootSymbol};

/// Focused role trait for connectors that serve contract metadata and bars.
#[async_trait]
pub trait BarStore: Send + Sync {
    /// Fetch metadata for one contract.
    ///
    /// Returns `NotFound` when the store has no such contract.
    async fn contract(&self, symbol: &ContractSymbol) -> Result<Contract, RollError>;

    /// List every contract of a root, in any order.
    async fn contracts(&self, root: &RootSymbol) -> Result<Vec<Contract>, RollError>;

    /// Fetch the bars of a contract inside `req`'s inclusive window.
    ///
    /// Bars must be unique by timestamp and ordered as `req.order` asks.
    async fn bars(&self, contract_id: u64, req: BarRequest) -> Result<Vec<Bar>, RollError>;
}

/// Focused role trait for connectors that serve curated chain tables.
#[async_trait]
pub trait ChainDirectory: Send + Sync {
    /// Fetch the chain table of `root` at `version`, in any order.
    ///
    /// An unknown root or version may be reported as `NotFound` or as an empty table.
    async fn chain(&self, root: &RootSymbol, version: u32) -> Result<Vec<ChainEntry>, RollError>;
}

/// Primary connector interface registered with the orchestrator.
///
/// A connector advertises each role it implements by returning a trait object from
/// the matching `as_*` accessor.
pub trait DataConnector: Send + Sync {
    /// A stable identifier used in errors and logs (e.g. "rollover-mock").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise bar store capability by returning a usable trait object reference.
    fn as_bar_store(&self) -> Option<&dyn BarStore> {
        None
    }

    /// Advertise chain directory capability by returning a usable trait object reference.
    fn as_chain_directory(&self) -> Option<&dyn ChainDirectory> {
        None
    }
}
