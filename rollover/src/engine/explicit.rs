use chrono::{DateTime, Utc};
use rollover_core::timeseries::util::last_priced_before;
use rollover_core::{Bar, BarRequest, BuildRequest, ResolvedChain, RollError, RollPoint, Segment};

use super::fetch_bars;
use crate::Rollover;

fn later(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, y) => x.or(y),
    }
}

fn earlier(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, y) => x.or(y),
    }
}

/// Cut a curated chain into segments at its effective timestamps.
///
/// Each roll is anchored on the outgoing contract's last priced bar strictly before the
/// next entry takes effect; the incoming contract is fetched from that anchor and must
/// have a priced bar there. An entry effective after the window end only bounds the last
/// segment.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "rollover::engine::explicit",
        skip(r, chain, req),
        fields(root = %chain.root, entries = chain.links.len()),
    )
)]
pub(super) async fn segments(
    r: &Rollover,
    chain: &ResolvedChain,
    req: &BuildRequest,
) -> Result<Vec<Segment>, RollError> {
    let (name, store) = r.bar_store()?;
    let root = chain.root.as_str();
    let links = &chain.links;
    let active = links
        .iter()
        .take_while(|l| {
            req.to
                .is_none_or(|to| l.effective_from.is_none_or(|from| from <= to))
        })
        .count();

    let mut out: Vec<Segment> = Vec::new();
    // Outgoing bar at the pending roll anchor.
    let mut entry: Option<Bar> = None;
    for (i, link) in links.iter().take(active).enumerate() {
        let contract = &link.contract;
        let next_from = links.get(i + 1).and_then(|l| l.effective_from);
        let lower = match &entry {
            Some(b) => Some(b.ts),
            None => later(req.from, link.effective_from),
        };
        let upper = earlier(req.to, next_from);
        let mut bars = fetch_bars(
            name,
            store,
            root,
            contract,
            BarRequest::ascending(req.frequency, lower, upper),
        )
        .await?;
        if let Some(cut) = next_from {
            bars.retain(|b| b.ts < cut);
        }

        if let Some(anchor) = entry.take() {
            let point = bars
                .first()
                .and_then(|b| RollPoint::from_bars(&anchor, b))
                .ok_or_else(|| {
                    RollError::continuity(
                        root,
                        contract.symbol.as_str(),
                        anchor.ts,
                        format!("{} has no priced bar at the roll anchor", contract.symbol),
                    )
                })?;
            if let Some(prev) = out.last_mut() {
                #[cfg(feature = "tracing")]
                tracing::info!(
                    outgoing = %prev.contract.symbol,
                    incoming = %contract.symbol,
                    at = %point.at,
                    outgoing_close = %point.outgoing_close,
                    incoming_close = %point.incoming_close,
                    "roll"
                );
                prev.exit = Some(point);
            }
        }

        if i + 1 < active
            && let Some(cut) = next_from
        {
            match last_priced_before(&bars, cut).cloned() {
                Some(anchor) => {
                    bars.retain(|b| b.ts <= anchor.ts);
                    entry = Some(anchor);
                }
                None if out.is_empty() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(contract = %contract.symbol, "no priced bars before roll; skipping");
                    continue;
                }
                None => {
                    return Err(RollError::continuity(
                        root,
                        contract.symbol.as_str(),
                        cut,
                        format!("{} has no priced bar before its roll", contract.symbol),
                    ));
                }
            }
        } else if bars.is_empty() && out.is_empty() {
            continue;
        }

        out.push(Segment {
            contract: contract.clone(),
            bars,
            exit: None,
        });
    }
    Ok(out)
}
