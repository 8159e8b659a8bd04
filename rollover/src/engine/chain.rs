use futures::future::try_join_all;
use rollover_core::connector::BarStore;
use rollover_core::{
    BuildRequest, ChainKind, ChainLink, Contract, ContractSymbol, ParsedInstrument, ResolvedChain,
    RollError, RootSymbol, filter_discovered, parse_instrument, single_root, trim_chain,
};

use crate::Rollover;
use crate::core::tag_err;

pub(super) async fn resolve(r: &Rollover, req: &BuildRequest) -> Result<ResolvedChain, RollError> {
    match parse_instrument(&req.instrument)? {
        ParsedInstrument::Contract(symbol) => {
            let (name, store) = r.bar_store()?;
            let root = symbol.root();
            let contract = fetch_contract(name, store, &root, &symbol).await?;
            Ok(ResolvedChain {
                root,
                kind: ChainKind::SingleContract,
                links: vec![link(contract)],
            })
        }
        ParsedInstrument::Contracts(root, symbols) => {
            let (name, store) = r.bar_store()?;
            let contracts =
                try_join_all(symbols.iter().map(|s| fetch_contract(name, store, &root, s)))
                    .await?;
            let kept = filter_discovered(contracts, &root, req.included.as_deref(), req.from, req.to);
            if kept.is_empty() {
                return Err(RollError::not_found(format!(
                    "contracts of {} inside the requested window",
                    req.instrument.label()
                )));
            }
            Ok(ResolvedChain {
                root,
                kind: ChainKind::ContractList,
                links: kept.into_iter().map(link).collect(),
            })
        }
        ParsedInstrument::Root(root) => {
            if let Some(version) = req.chain_version {
                if let Some(chain) = explicit(r, &root, version, req).await? {
                    return Ok(chain);
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    root = %root,
                    version,
                    "chain table empty; falling back to discovery"
                );
            }
            discover(r, root, req).await
        }
    }
}

async fn explicit(
    r: &Rollover,
    root: &RootSymbol,
    version: u32,
    req: &BuildRequest,
) -> Result<Option<ResolvedChain>, RollError> {
    let (dir_name, dir) = r.chain_directory()?;
    let entries = match dir.chain(root, version).await {
        Ok(entries) => entries,
        Err(RollError::NotFound { .. }) => Vec::new(),
        Err(e) => return Err(tag_err(dir_name, root.as_str(), None, None, e)),
    };
    let entries = trim_chain(entries, req.from, req.to);
    if entries.is_empty() {
        return Ok(None);
    }

    let symbols: Vec<ContractSymbol> = entries.iter().map(|e| e.contract.clone()).collect();
    let table_root = single_root(&symbols)?;
    if &table_root != root {
        return Err(RollError::AmbiguousChain {
            roots: vec![root.to_string(), table_root.to_string()],
        });
    }

    let (name, store) = r.bar_store()?;
    let contracts =
        try_join_all(symbols.iter().map(|s| fetch_contract(name, store, root, s))).await?;
    let links = contracts
        .into_iter()
        .zip(&entries)
        .map(|(contract, e)| ChainLink {
            contract,
            effective_from: Some(e.effective_from),
        })
        .collect();
    Ok(Some(ResolvedChain {
        root: root.clone(),
        kind: ChainKind::Explicit { version },
        links,
    }))
}

async fn discover(
    r: &Rollover,
    root: RootSymbol,
    req: &BuildRequest,
) -> Result<ResolvedChain, RollError> {
    let (name, store) = r.bar_store()?;
    let listed = store
        .contracts(&root)
        .await
        .map_err(|e| tag_err(name, root.as_str(), None, None, e))?;
    let kept = filter_discovered(listed, &root, req.included.as_deref(), req.from, req.to);
    if kept.is_empty() {
        return Err(RollError::not_found(format!("contracts for {root}")));
    }
    Ok(ResolvedChain {
        root,
        kind: ChainKind::Discovered,
        links: kept.into_iter().map(link).collect(),
    })
}

async fn fetch_contract(
    connector: &'static str,
    store: &dyn BarStore,
    root: &RootSymbol,
    symbol: &ContractSymbol,
) -> Result<Contract, RollError> {
    store
        .contract(symbol)
        .await
        .map_err(|e| tag_err(connector, root.as_str(), Some(symbol.as_str()), None, e))
}

fn link(contract: Contract) -> ChainLink {
    ChainLink {
        contract,
        effective_from: None,
    }
}
