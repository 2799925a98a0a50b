//! Sample listing

use anyhow::{Context, Result};
use clap::Parser;

use super::{EndpointArgs, OutputFormat};

#[derive(Parser, Debug)]
pub struct SamplesArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

pub async fn run_samples(args: SamplesArgs, endpoint: &EndpointArgs) -> Result<()> {
    let (_, api) = endpoint.resolve()?;
    let samples = api.list_samples().await.context("Failed to fetch samples")?;

    if args.json || args.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    if samples.is_empty() {
        println!("(no samples)");
        return Ok(());
    }

    println!(
        "{:>4}  {:>5}  {:<20} {:<14} {:>8} {:>8}",
        "id", "owner", "label", "proposal", "inner", "outer"
    );
    for s in &samples {
        println!(
            "{:>4}  {:>5}  {:<20} {:<14} {:>8} {:>8}",
            s.id, s.owner_id, s.sample_label, s.proposal_number, s.inner_diameter, s.outer_diameter
        );
    }

    Ok(())
}
