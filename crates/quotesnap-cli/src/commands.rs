use std::path::Path;
use std::time::Duration;

use quotesnap_core::{
    collect_report, default_tickers, TwelveDataClient, UtcDateTime, DEFAULT_OUTPUT_PATH,
};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::CliError;

/// Fetch every built-in ticker and write the snapshot. The credential is
/// resolved before any network activity; a fetch failure for any symbol
/// aborts before anything is written.
pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = Config::from_env()?;

    let client = TwelveDataClient::new(config.api_key)
        .with_timeout(Duration::from_millis(cli.timeout_ms));
    let tickers = default_tickers();

    log::info!("fetching {} symbols from twelvedata", tickers.len());
    let report = collect_report(&client, &tickers, UtcDateTime::now()).await?;

    let out_path = Path::new(DEFAULT_OUTPUT_PATH);
    report.write_to(out_path)?;

    println!("Wrote {}", out_path.display());
    Ok(())
}
