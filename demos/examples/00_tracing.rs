use rollover::{BuildRequest, DEFAULT_CHAIN_VERSION, Frequency, Instrument};
use rollover_demos::common::engine;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,rollover=debug,rollover_core=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let rollover = engine()?;

    // Discovered chain: rolls are detected from volume and open interest.
    let _ = rollover
        .build(BuildRequest::new(Instrument::root("IF"), Frequency::Day))
        .await?;

    // Curated chain: rolls follow the table.
    let _ = rollover
        .build(
            BuildRequest::new(Instrument::root("IF"), Frequency::Day)
                .chain_version(DEFAULT_CHAIN_VERSION),
        )
        .await?;

    // Upstream failures are tagged with connector, root and contract.
    if let Err(e) = rollover
        .build(BuildRequest::new(Instrument::root("ZZ"), Frequency::Day))
        .await
    {
        tracing::warn!(error = %e, "expected failure");
    }

    Ok(())
}
