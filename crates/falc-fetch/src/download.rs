use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::{FetchError, Result};

const CHUNK_SIZE: usize = 64 * 1024;
const PROGRESS_STEP: u64 = 64 * 1024 * 1024;

/// Download `url` to `dest`, keeping an existing file unless `overwrite`.
///
/// Blocks until done; call from a blocking thread. The partial file is
/// removed when the transfer fails or `cancel` fires.
pub fn download(
    url: &str,
    dest: &Path,
    overwrite: bool,
    cancel: &CancellationToken,
) -> Result<PathBuf> {
    if !overwrite && dest.exists() {
        tracing::debug!("Keeping existing {}", dest.display());
        return Ok(dest.to_path_buf());
    }
    if cancel.is_cancelled() {
        return Err(FetchError::Cancelled);
    }

    tracing::info!("Downloading {} to {}", url, dest.display());

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .timeout(None::<Duration>)
        .build()?;
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let total = response.content_length();
    stream_to_file(response, dest, total, cancel)?;
    Ok(dest.to_path_buf())
}

/// [`download`] with up to `attempts` tries on network failures
pub fn download_with_retry(
    url: &str,
    dest: &Path,
    overwrite: bool,
    attempts: u32,
    cancel: &CancellationToken,
) -> Result<PathBuf> {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match download(url, dest, overwrite, cancel) {
            Err(err) if err.is_retryable() && attempt < attempts => {
                tracing::warn!("Download attempt {}/{} failed: {}", attempt, attempts, err);
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Copy `reader` into a new file at `dest`, removing it again on failure
pub fn stream_to_file<R: Read>(
    reader: R,
    dest: &Path,
    total: Option<u64>,
    cancel: &CancellationToken,
) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let result = File::create(dest)
        .map_err(FetchError::from)
        .and_then(|file| copy_chunks(reader, BufWriter::new(file), total, cancel));

    if let Err(err) = &result {
        tracing::warn!("Removing partial download {}: {}", dest.display(), err);
        if let Err(remove_err) = fs::remove_file(dest) {
            tracing::error!("Failed to remove {}: {}", dest.display(), remove_err);
        }
    }
    result
}

fn copy_chunks<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    total: Option<u64>,
    cancel: &CancellationToken,
) -> Result<u64> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;
    let mut next_report = PROGRESS_STEP;

    loop {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let n = reader.read(&mut buf).map_err(FetchError::Transfer)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
        written += n as u64;

        if written >= next_report {
            next_report += PROGRESS_STEP;
            match total {
                Some(total) if total > 0 => tracing::info!(
                    "... {}% - {} MB",
                    written * 100 / total,
                    written / (1024 * 1024)
                ),
                _ => tracing::info!("... {} MB", written / (1024 * 1024)),
            }
        }
    }

    writer.flush()?;
    tracing::info!("Downloaded {} bytes", written);
    Ok(written)
}
