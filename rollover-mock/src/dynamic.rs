use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rollover_core::connector::{BarStore, ChainDirectory, DataConnector};
use rollover_core::{
    Bar, BarRequest, ChainEntry, Contract, ContractSymbol, RollError, RootSymbol,
};

use crate::window;

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(RollError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn resolve(self) -> Result<T, RollError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Fail(e) => Err(e),
            Self::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

#[derive(Default)]
struct InternalState {
    contract_rules: HashMap<ContractSymbol, MockBehavior<Contract>>,
    listing_rules: HashMap<RootSymbol, MockBehavior<Vec<Contract>>>,
    bar_rules: HashMap<u64, MockBehavior<Vec<Bar>>>,
    chain_rules: HashMap<(RootSymbol, u32), MockBehavior<Vec<ChainEntry>>>,
    bar_requests: Vec<(u64, BarRequest)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Register a contract; it is also listed for its root unless a listing rule is set.
    pub async fn set_contract(&self, contract: Contract) {
        let mut guard = self.state.lock().await;
        guard
            .contract_rules
            .insert(contract.symbol.clone(), MockBehavior::Return(contract));
    }

    /// Set the behavior for `contract` lookups of one symbol.
    pub async fn set_contract_behavior(
        &self,
        symbol: ContractSymbol,
        behavior: MockBehavior<Contract>,
    ) {
        let mut guard = self.state.lock().await;
        guard.contract_rules.insert(symbol, behavior);
    }

    /// Override the `contracts` listing of a root.
    pub async fn set_listing_behavior(
        &self,
        root: RootSymbol,
        behavior: MockBehavior<Vec<Contract>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.listing_rules.insert(root, behavior);
    }

    /// Serve `bars` for a contract id; requests are answered with the slice in their window.
    pub async fn set_bars(&self, contract_id: u64, bars: Vec<Bar>) {
        self.set_bars_behavior(contract_id, MockBehavior::Return(bars))
            .await;
    }

    /// Set the behavior for `bars` calls of one contract id.
    pub async fn set_bars_behavior(&self, contract_id: u64, behavior: MockBehavior<Vec<Bar>>) {
        let mut guard = self.state.lock().await;
        guard.bar_rules.insert(contract_id, behavior);
    }

    /// Serve a chain table for `root` at `version`.
    pub async fn set_chain(&self, root: RootSymbol, version: u32, entries: Vec<ChainEntry>) {
        self.set_chain_behavior(root, version, MockBehavior::Return(entries))
            .await;
    }

    /// Set the behavior for `chain` calls of `root` at `version`.
    pub async fn set_chain_behavior(
        &self,
        root: RootSymbol,
        version: u32,
        behavior: MockBehavior<Vec<ChainEntry>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.chain_rules.insert((root, version), behavior);
    }

    /// Return a copy of the bar request log, in call order.
    pub async fn bar_requests(&self) -> Vec<(u64, BarRequest)> {
        let guard = self.state.lock().await;
        guard.bar_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.contract_rules.clear();
        guard.listing_rules.clear();
        guard.bar_rules.clear();
        guard.chain_rules.clear();
        guard.bar_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    chain_directory: bool,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn DataConnector>, DynamicMockController) {
        Self::build(name, true)
    }

    /// Like [`Self::new_with_controller`], but the connector does not advertise a chain
    /// directory.
    #[must_use]
    pub fn bars_only_with_controller(
        name: &'static str,
    ) -> (Arc<dyn DataConnector>, DynamicMockController) {
        Self::build(name, false)
    }

    fn build(
        name: &'static str,
        chain_directory: bool,
    ) -> (Arc<dyn DataConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            chain_directory,
            state,
        });
        (me as Arc<dyn DataConnector>, controller)
    }
}

impl DataConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_bar_store(&self) -> Option<&dyn BarStore> {
        Some(self as &dyn BarStore)
    }

    fn as_chain_directory(&self) -> Option<&dyn ChainDirectory> {
        if self.chain_directory {
            Some(self as &dyn ChainDirectory)
        } else {
            None
        }
    }
}

#[async_trait]
impl BarStore for DynamicMockConnector {
    async fn contract(&self, symbol: &ContractSymbol) -> Result<Contract, RollError> {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let guard = self.state.lock().await;
            guard.contract_rules.get(symbol).cloned()
        };
        match behavior {
            Some(b) => b.resolve().await,
            None => Err(RollError::not_found(format!("contract {symbol}"))),
        }
    }

    async fn contracts(&self, root: &RootSymbol) -> Result<Vec<Contract>, RollError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.listing_rules.get(root).cloned().unwrap_or_else(|| {
                MockBehavior::Return(
                    guard
                        .contract_rules
                        .values()
                        .filter_map(|b| match b {
                            MockBehavior::Return(c) if &c.root == root => Some(c.clone()),
                            _ => None,
                        })
                        .collect(),
                )
            })
        };
        behavior.resolve().await
    }

    async fn bars(&self, contract_id: u64, req: BarRequest) -> Result<Vec<Bar>, RollError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.bar_requests.push((contract_id, req));
            guard.bar_rules.get(&contract_id).cloned()
        };
        match behavior {
            Some(b) => Ok(window(b.resolve().await?, &req)),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl ChainDirectory for DynamicMockConnector {
    async fn chain(&self, root: &RootSymbol, version: u32) -> Result<Vec<ChainEntry>, RollError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.chain_rules.get(&(root.clone(), version)).cloned()
        };
        match behavior {
            Some(b) => b.resolve().await,
            None => Err(RollError::not_found(format!("chain {root} v{version}"))),
        }
    }
}
