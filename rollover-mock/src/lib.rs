//! Mock rollover connectors for tests and examples.
//!
//! - [`MockConnector`] serves deterministic IF/IC index futures fixtures and a curated
//!   IF chain table at version 1.
//! - [`DynamicMockConnector`] defers every answer to a [`DynamicMockController`] so
//!   tests can script contracts, bars, chain tables and failures.
use async_trait::async_trait;
use rollover_core::connector::{BarStore, ChainDirectory, DataConnector};
use rollover_core::{
    Bar, BarRequest, ChainEntry, Contract, ContractSymbol, Frequency, RollError, RootSymbol,
    SortOrder,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Create the fixture-backed mock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> RollError {
        RollError::not_found(what.to_string())
    }

    // Root `ZZ` fails every call so examples can show upstream error tagging.
    fn maybe_fail(root: &str, capability: &'static str) -> Result<(), RollError> {
        if root == "ZZ" {
            return Err(RollError::connector(
                "rollover-mock",
                format!("forced failure: {capability}"),
            ));
        }
        Ok(())
    }
}

/// Keep the bars inside `req`'s window, in the requested order.
pub(crate) fn window(mut bars: Vec<Bar>, req: &BarRequest) -> Vec<Bar> {
    bars.retain(|b| req.contains(b.ts));
    if matches!(req.order, SortOrder::Descending) {
        bars.reverse();
    }
    bars
}

impl DataConnector for MockConnector {
    fn name(&self) -> &'static str {
        "rollover-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_bar_store(&self) -> Option<&dyn BarStore> {
        Some(self as &dyn BarStore)
    }
    fn as_chain_directory(&self) -> Option<&dyn ChainDirectory> {
        Some(self as &dyn ChainDirectory)
    }
}

#[async_trait]
impl BarStore for MockConnector {
    async fn contract(&self, symbol: &ContractSymbol) -> Result<Contract, RollError> {
        Self::maybe_fail(symbol.root().as_str(), "contract")?;
        fixtures::contracts::by_symbol(symbol)
            .ok_or_else(|| Self::not_found(&format!("contract {symbol}")))
    }

    async fn contracts(&self, root: &RootSymbol) -> Result<Vec<Contract>, RollError> {
        Self::maybe_fail(root.as_str(), "contracts")?;
        Ok(fixtures::contracts::by_root(root))
    }

    async fn bars(&self, contract_id: u64, req: BarRequest) -> Result<Vec<Bar>, RollError> {
        let c = fixtures::contracts::by_id(contract_id)
            .ok_or_else(|| Self::not_found(&format!("contract id {contract_id}")))?;
        if req.frequency != Frequency::Day {
            return Err(Self::not_found(&format!("minute bars for {}", c.symbol)));
        }
        Ok(window(fixtures::bars::daily(&c), &req))
    }
}

#[async_trait]
impl ChainDirectory for MockConnector {
    async fn chain(&self, root: &RootSymbol, version: u32) -> Result<Vec<ChainEntry>, RollError> {
        Self::maybe_fail(root.as_str(), "chain")?;
        Ok(fixtures::chain::by_root(root, version))
    }
}
