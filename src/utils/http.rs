use crate::error::RetrieveError;
use futures::stream::StreamExt;
use reqwest::{Client, Response};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// User agent sent with every image request
pub const USER_AGENT: &str = concat!("lido-fetch/", env!("CARGO_PKG_VERSION"));

/// Build the client shared by every record of a batch.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Download `url` into `path`, writing the body chunk by chunk as it arrives.
///
/// An existing file at `path` is truncated. If the transfer fails after the
/// file was created, the partial file is removed. Returns the number of
/// bytes written.
pub async fn download_to_file(
    client: &Client,
    url: &str,
    path: &Path,
) -> Result<u64, RetrieveError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(|source| network_error(url, source))?;

    let mut file = File::create(path)
        .await
        .map_err(|source| io_error(path, source))?;

    match write_body(response, &mut file, url, path).await {
        Ok(written) => {
            debug!("Wrote {} bytes to {}", written, path.display());
            Ok(written)
        }
        Err(e) => {
            drop(file);
            if let Err(cleanup_err) = tokio::fs::remove_file(path).await {
                warn!(
                    "Failed to remove partial file {}: {}",
                    path.display(),
                    cleanup_err
                );
            }
            Err(e)
        }
    }
}

async fn write_body(
    response: Response,
    file: &mut File,
    url: &str,
    path: &Path,
) -> Result<u64, RetrieveError> {
    let mut written = 0u64;
    let mut chunks = response.bytes_stream();

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(|source| network_error(url, source))?;
        file.write_all(&chunk)
            .await
            .map_err(|source| io_error(path, source))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|source| io_error(path, source))?;
    Ok(written)
}

fn network_error(url: &str, source: reqwest::Error) -> RetrieveError {
    RetrieveError::Network {
        url: url.to_string(),
        source,
    }
}

fn io_error(path: &Path, source: std::io::Error) -> RetrieveError {
    RetrieveError::Io {
        path: path.to_path_buf(),
        source,
    }
}
