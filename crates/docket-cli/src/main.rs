mod batch;
mod display;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use docket_fetch::{FetchConfig, Fetcher, config};
use tracing::{Level, warn};

/// Retrieve and parse docket information from the Federal Court electronic docket.
#[derive(Parser, Debug)]
#[command(name = "docket", version, about)]
struct Cli {
    /// Court numbers to retrieve (e.g. T-100-14)
    court_numbers: Vec<String>,

    /// Retrieve TYPE-BEGIN-YEAR through TYPE-END-YEAR; ignores positional court numbers
    #[arg(short, long, num_args = 4, value_names = ["TYPE", "BEGIN", "END", "YEAR"])]
    range: Option<Vec<String>>,

    /// Read court numbers from FILE, one per line; ignores --range and positionals
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output a JSON array instead of case cards
    #[arg(short, long)]
    json: bool,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Cases processed concurrently
    #[arg(long, default_value_t = 1)]
    jobs: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Attempts per page while the server reports no response
    #[arg(long, default_value_t = config::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Delay before the first retry in milliseconds; doubles per retry
    #[arg(long, default_value_t = 500)]
    backoff_ms: u64,

    /// Minimum milliseconds between requests to the docket server
    #[arg(long, default_value_t = 250)]
    pace_ms: u64,

    /// Recorded entries URL stub; the court number is appended
    #[arg(long, env = "DOCKET_RE_URL", default_value = config::RECORDED_ENTRIES_URL)]
    re_url: String,

    /// Additional information URL stub; the court number is appended
    #[arg(long, env = "DOCKET_AI_URL", default_value = config::ADDITIONAL_INFO_URL)]
    ai_url: String,
}

impl Cli {
    /// Court numbers to process: input file, else range, else positionals.
    fn case_ids(&self) -> anyhow::Result<Vec<String>> {
        if let Some(path) = &self.input {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            return batch::read_case_ids(BufReader::new(file))
                .with_context(|| format!("reading {}", path.display()));
        }
        if let Some(range) = &self.range {
            let [kind, begin, end, year] = range.as_slice() else {
                anyhow::bail!("--range takes TYPE BEGIN END YEAR");
            };
            let begin: u32 = begin.parse().with_context(|| format!("invalid BEGIN {begin:?}"))?;
            let end: u32 = end.parse().with_context(|| format!("invalid END {end:?}"))?;
            return Ok(batch::expand_range(kind, begin, end, year));
        }
        Ok(self.court_numbers.clone())
    }

    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            recorded_entries_url: self.re_url.clone(),
            additional_info_url: self.ai_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            max_attempts: self.max_attempts,
            retry_backoff: Duration::from_millis(self.backoff_ms),
            min_request_interval: Duration::from_millis(self.pace_ms),
            ..Default::default()
        }
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level())
        .init();
    tracing::info!("docket v{}", env!("CARGO_PKG_VERSION"));

    let case_ids = cli.case_ids()?;
    if case_ids.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let fetcher = Fetcher::new(cli.fetch_config()).context("building HTTP client")?;
    let report = batch::run_batch(&fetcher, case_ids, cli.jobs).await;
    if !report.failed.is_empty() {
        warn!(failed = report.failed.len(), "some cases could not be retrieved");
    }

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    if cli.json {
        display::write_json(&mut out, &report.records)?;
    } else {
        display::write_cards(&mut out, &report.records)?;
    }
    out.flush().context("writing output")?;

    Ok(())
}
