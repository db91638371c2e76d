use clap::Parser;

/// Snapshot Twelve Data quotes for the built-in ticker list.
///
/// Fetches the latest price for each symbol sequentially, retrying
/// transient upstream failures with linear backoff, and writes the
/// collected prices plus a UTC timestamp to `docs/assets/quotes.json`.
/// Requires the `TWELVEDATA_API_KEY` environment variable.
#[derive(Debug, Parser)]
#[command(
    name = "quotesnap",
    author,
    version,
    about = "Write a JSON snapshot of Twelve Data quotes"
)]
pub struct Cli {
    /// Per-request timeout budget in milliseconds.
    #[arg(long, default_value_t = 20_000)]
    pub timeout_ms: u64,
}
