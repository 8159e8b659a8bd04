use chrono::{TimeZone, Utc};
use rollover::{BuildRequest, DEFAULT_CHAIN_VERSION, Frequency, Instrument};
use rollover_demos::common::{engine, print_rolls};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rollover = engine()?;
    let req = BuildRequest::new(Instrument::root("IF"), Frequency::Day)
        .chain_version(DEFAULT_CHAIN_VERSION);

    let chain = rollover.resolve(&req).await?;
    println!("Chain table v{DEFAULT_CHAIN_VERSION}:");
    for link in &chain.links {
        if let Some(from) = link.effective_from {
            println!("  {} from {}", link.contract.symbol, from.date_naive());
        }
    }

    // Each roll is anchored on the last priced bar before the next entry.
    // 2019-09-13 is a holiday, so the September roll lands on the 12th.
    let series = rollover.build(req.clone()).await?;
    print_rolls(&series);

    // A window only pulls in the entries that matter for it.
    let summer = req.window(
        Utc.with_ymd_and_hms(2019, 7, 1, 0, 0, 0).single(),
        Utc.with_ymd_and_hms(2019, 10, 31, 0, 0, 0).single(),
    );
    let chain = rollover.resolve(&summer).await?;
    println!("\nJuly..October uses {}", chain.symbols().join(", "));

    // Unknown versions fall back to discovery.
    let fallback = rollover
        .resolve(&BuildRequest::new(Instrument::root("IF"), Frequency::Day).chain_version(9))
        .await?;
    println!("Version 9 resolves as {:?}", fallback.kind);

    Ok(())
}
