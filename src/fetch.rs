use crate::error::{Chain, FetchError, RecordError};
use crate::lido;
use crate::utils::files::{ensure_output_dir, list_metadata_files, output_filename};
use crate::utils::http;
use futures::stream::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::ffi::OsStr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// What a batch does when one record fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort on the first failed record.
    #[default]
    FailFast,
    /// Print the failure and keep going.
    Continue,
}

/// Settings for one batch run, fixed once parsed.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub metadata_dir: PathBuf,
    pub output_dir: PathBuf,
    pub jobs: NonZeroUsize,
    pub policy: FailurePolicy,
    pub timeout: Option<Duration>,
    pub show_progress: bool,
}

impl FetchConfig {
    pub fn new(metadata_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            metadata_dir: metadata_dir.into(),
            output_dir: output_dir.into(),
            jobs: NonZeroUsize::MIN,
            policy: FailurePolicy::default(),
            timeout: None,
            show_progress: true,
        }
    }
}

/// Outcome of a batch that ran to the end.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of records attempted
    pub total: usize,
    /// Image files written, in completion order
    pub written: Vec<PathBuf>,
    /// Failures skipped under [`FailurePolicy::Continue`]
    pub failures: Vec<RecordError>,
}

/// Fetch the image referenced by one metadata record into the output directory.
pub async fn retrieve_image(
    client: &Client,
    config: &FetchConfig,
    record: &OsStr,
) -> Result<PathBuf, RecordError> {
    let name = record.to_string_lossy();
    let metadata_path = config.metadata_dir.join(record);
    let url = lido::read_image_url(&metadata_path)
        .await
        .map_err(|e| RecordError::new(&*name, e))?;

    let image_path = config.output_dir.join(output_filename(&name, &url));
    debug!("{} -> {} ({})", name, image_path.display(), url);

    http::download_to_file(client, &url, &image_path)
        .await
        .map_err(|e| RecordError::new(&*name, e))?;

    Ok(image_path)
}

/// Process every metadata record in `config.metadata_dir` with up to
/// `config.jobs` records in flight at once.
///
/// Under [`FailurePolicy::FailFast`] the first failure is returned and
/// records still in flight are dropped.
pub async fn run_batch(config: &FetchConfig) -> Result<BatchReport, FetchError> {
    ensure_output_dir(&config.output_dir).map_err(|source| FetchError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let records =
        list_metadata_files(&config.metadata_dir).map_err(|source| FetchError::MetadataDir {
            path: config.metadata_dir.clone(),
            source,
        })?;

    let client = http::build_client(config.timeout).map_err(FetchError::Client)?;

    let total = records.len();
    info!(
        "Found {} metadata files, retrieving with {} jobs",
        total, config.jobs
    );

    let pb = progress_bar(total, config.show_progress);
    let mut report = BatchReport {
        total,
        ..BatchReport::default()
    };

    let client = &client;
    let mut results = futures::stream::iter(records.iter())
        .map(|record| retrieve_image(client, config, record.as_os_str()))
        .buffer_unordered(config.jobs.get());

    while let Some(result) = results.next().await {
        pb.inc(1);
        match result {
            Ok(path) => report.written.push(path),
            Err(err) => match config.policy {
                FailurePolicy::FailFast => {
                    pb.abandon();
                    return Err(err.into());
                }
                FailurePolicy::Continue => {
                    pb.suspend(|| eprintln!("{}", Chain(&err)));
                    report.failures.push(err);
                }
            },
        }
    }

    pb.finish();
    info!(
        "Wrote {} of {} images ({} failed)",
        report.written.len(),
        total,
        report.failures.len()
    );

    Ok(report)
}

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template(
            "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message("Retrieving images");
    pb
}
