use rollover::{Adjustment, BuildRequest, Direction, Frequency, Instrument};
use rollover_demos::common::engine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rollover = engine()?;
    let base = BuildRequest::new(Instrument::root("IF"), Frequency::Day);

    let modes = [
        (Adjustment::None, Direction::Backward),
        (Adjustment::Additive, Direction::Backward),
        (Adjustment::Additive, Direction::Forward),
        (Adjustment::Multiplicative, Direction::Backward),
        (Adjustment::Multiplicative, Direction::Forward),
    ];

    println!(
        "{:<16} {:<9} {:>14} {:>14}",
        "adjustment", "direction", "first close", "last close"
    );
    for (adjustment, direction) in modes {
        let series = rollover
            .build(base.clone().adjustment(adjustment).direction(direction))
            .await?;
        let (Some(first), Some(last)) = (series.bars.first(), series.bars.last()) else {
            continue;
        };
        println!(
            "{:<16} {:<9} {:>14} {:>14}",
            format!("{adjustment:?}"),
            format!("{direction:?}"),
            first.close.round_dp(2).to_string(),
            last.close.round_dp(2).to_string()
        );
    }

    // Contract lists skip discovery and carry no root.
    let listed = rollover
        .build(BuildRequest::new(
            Instrument::contracts(["IF1912", "IF1909"]),
            Frequency::Day,
        ))
        .await?;
    println!(
        "\nIF1909+IF1912: {} bars, {} roll(s), root {:?}",
        listed.bars.len(),
        listed.rolls.len(),
        listed.root
    );

    Ok(())
}
