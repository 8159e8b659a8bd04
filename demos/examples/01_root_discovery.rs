use rollover::{BuildRequest, Frequency, Instrument};
use rollover_demos::common::{engine, print_rolls};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rollover = engine()?;

    // Which contracts would a discovered IF chain use?
    let req = BuildRequest::new(Instrument::root("IF"), Frequency::Day);
    let chain = rollover.resolve(&req).await?;
    println!("IF ({:?}): {}", chain.kind, chain.symbols().join(" -> "));

    // Only the June and December expiries.
    let half_year = rollover.resolve(&req.clone().included([6, 12])).await?;
    println!("IF June/December: {}", half_year.symbols().join(" -> "));

    // Build the backward-adjusted series; rolls fire once the calendar gate is open
    // and the next contract has caught up on liquidity.
    let series = rollover.build(req).await?;
    print_rolls(&series);

    println!("\nAttribution:");
    for (contract, span) in &series.attribution.spans {
        println!(
            "  {:<7} {} .. {}",
            contract.as_str(),
            span.start.date_naive(),
            span.end.date_naive()
        );
    }

    Ok(())
}
