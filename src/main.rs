use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use sro_tracker::{
    config::Config,
    fetcher::{DataFetcher, StdoutSink},
    input::read_identifiers,
    shipment::ShipmentClient,
};

#[derive(Parser, Debug)]
#[command(name = "sro-tracker", version, about = "Latest Correios SRO event for each shipment in a CSV file", long_about = None)]
struct Cli {
    /// Identifier CSV file, overrides INPUT_FILE
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Cli::parse();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let input_file = args.file.unwrap_or_else(|| config.input_file.clone());
    let identifiers = read_identifiers(&input_file)?;

    let data_fetcher = DataFetcher::new(
        Arc::new(ShipmentClient::new(&config)?),
        config.batch_size,
    );

    println!(
        "[{}] Tracking {} object(s) from {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        identifiers.len(),
        input_file.display()
    );
    println!("================================");

    let summary = data_fetcher.run(&identifiers, &mut StdoutSink).await?;

    println!("================================");
    println!(
        "[{}] {} event(s), {} failed batch(es)",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        summary.events(),
        summary.failed_batches()
    );

    Ok(())
}
