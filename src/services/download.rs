//! Blocking download of a single release asset.
//!
//! One GET, response body streamed to disk in fixed-size chunks, existing
//! files overwritten. No retry, no checksum verification, no resume. The
//! progress callback carries real byte counts so observers can show true
//! download progress instead of a timer-driven animation.

use camino::Utf8Path;
use std::fs::File;
use std::io::{Read, Write};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("essential-installer/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(60);
const WRITE_TIMEOUT: Duration = Duration::from_secs(60);
const CHUNK_SIZE: usize = 8192;

/// Errors from a single fetch attempt
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or a non-2xx response from the server
    #[error("request failed: {0}")]
    Request(#[from] ureq::Error),

    /// The response body could not be read or written to disk
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Build the agent used for release downloads.
///
/// Timeouts keep a dead connection from hanging the install forever; the
/// workflow has no cancellation hook once the fetch starts.
pub fn build_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(CONNECT_TIMEOUT)
        .timeout_read(READ_TIMEOUT)
        .timeout_write(WRITE_TIMEOUT)
        .build()
}

/// Download `url` into `dest`, overwriting any existing file.
///
/// `on_progress` is invoked after every chunk with the total bytes written so
/// far and the `Content-Length` when the server provided one.
///
/// # Returns
/// The number of bytes written to `dest`
pub fn download_to_file(
    agent: &ureq::Agent,
    url: &str,
    dest: &Utf8Path,
    mut on_progress: impl FnMut(u64, Option<u64>),
) -> Result<u64, FetchError> {
    tracing::info!("Downloading {} -> {}", url, dest);

    let response = agent.get(url).set("User-Agent", USER_AGENT).call()?;

    let total_bytes = response
        .header("Content-Length")
        .and_then(|value| value.parse::<u64>().ok());

    let mut reader = response.into_reader();
    let mut file = File::create(dest).map_err(|source| FetchError::Write {
        path: dest.to_string(),
        source,
    })?;

    let mut written: u64 = 0;
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buffer).map_err(|source| FetchError::Write {
            path: dest.to_string(),
            source,
        })?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .map_err(|source| FetchError::Write {
                path: dest.to_string(),
                source,
            })?;
        written += read as u64;
        on_progress(written, total_bytes);
    }

    tracing::info!("Downloaded {} bytes to {}", written, dest);
    Ok(written)
}
