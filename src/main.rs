use clap::Parser;
use lido_fetch::error::Chain;
use lido_fetch::{logging, run_batch, FailurePolicy, FetchConfig};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

/// Download images given their LIDO metadata files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the metadata XML files for the dataset
    metadata_dir: PathBuf,

    /// Destination directory for the images
    output_dir: PathBuf,

    /// Number of simultaneous jobs
    #[arg(short, long, default_value_t = NonZeroUsize::MIN)]
    jobs: NonZeroUsize,

    /// Print failed metadata files and continue instead of aborting
    #[arg(long = "no_exception")]
    no_exception: bool,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for FetchConfig {
    fn from(args: Args) -> Self {
        FetchConfig {
            metadata_dir: args.metadata_dir,
            output_dir: args.output_dir,
            jobs: args.jobs,
            policy: if args.no_exception {
                FailurePolicy::Continue
            } else {
                FailurePolicy::FailFast
            },
            timeout: args.timeout.map(Duration::from_secs),
            show_progress: !args.no_progress,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config = FetchConfig::from(args);
    if let Err(e) = run_batch(&config).await {
        eprintln!("lido-fetch error: {}", Chain(&e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sequential_and_fail_fast() {
        let args = Args::try_parse_from(["lido-fetch", "meta", "out"]).unwrap();
        let config = FetchConfig::from(args);
        assert_eq!(config.jobs.get(), 1);
        assert_eq!(config.policy, FailurePolicy::FailFast);
        assert_eq!(config.timeout, None);
        assert!(config.show_progress);
    }

    #[test]
    fn parses_jobs_and_no_exception() {
        let args = Args::try_parse_from([
            "lido-fetch",
            "meta",
            "out",
            "-j",
            "8",
            "--no_exception",
            "--timeout",
            "30",
        ])
        .unwrap();
        let config = FetchConfig::from(args);
        assert_eq!(config.jobs.get(), 8);
        assert_eq!(config.policy, FailurePolicy::Continue);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_zero_jobs() {
        assert!(Args::try_parse_from(["lido-fetch", "meta", "out", "--jobs", "0"]).is_err());
    }

    #[test]
    fn requires_both_directories() {
        assert!(Args::try_parse_from(["lido-fetch", "meta"]).is_err());
    }
}
