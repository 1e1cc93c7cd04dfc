use crate::core::http::HttpClient;
use crate::error::{Result, SpargatError};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

pub const CHUNK_SIZE: usize = 1024;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub filename: String,
    pub path: PathBuf,
    pub bytes_written: u64,
    pub content_length: Option<u64>,
}

impl DownloadedFile {
    /// Size in megabytes, preferring the announced length.
    pub fn size_mb(&self) -> f64 {
        self.content_length.unwrap_or(self.bytes_written) as f64 / BYTES_PER_MB
    }
}

/// Last path segment of `url`, used as the local file name.
pub fn filename_from_url(url: &str) -> Result<String> {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            path.rsplit('/').next().map(str::to_string)
        }
    };

    match segment {
        Some(name) if !name.is_empty() && name != "." && name != ".." => Ok(name),
        _ => Err(SpargatError::InvalidUrl {
            url: url.to_string(),
        }),
    }
}

pub struct Downloader<'a> {
    client: &'a dyn HttpClient,
    output_dir: PathBuf,
    show_progress: bool,
}

impl<'a> Downloader<'a> {
    pub fn new(client: &'a dyn HttpClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            show_progress: true,
        }
    }

    pub fn show_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Stream `url` into `filename`, replacing any existing file.
    ///
    /// A partially written file stays on disk when the transfer fails.
    pub fn download_file(&self, url: &str, filename: &str) -> Result<DownloadedFile> {
        let response = self.client.get(url)?;
        if !response.is_ok() {
            return Err(SpargatError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        let content_length = response.content_length;
        let path = self.output_dir.join(filename);
        let mut file = File::create(&path)?;

        let progress = self.progress_bar(filename, content_length);
        let streamed = copy_in_chunks(response.body, &mut file, &progress);
        let bytes_written = match streamed {
            Ok(bytes) => bytes,
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };
        progress.finish();

        if let Some(expected) = content_length {
            if bytes_written < expected {
                return Err(SpargatError::IncompleteDownload {
                    expected,
                    received: bytes_written,
                });
            }
        }

        log::debug!("wrote {bytes_written} bytes to {}", path.display());

        Ok(DownloadedFile {
            filename: filename.to_string(),
            path,
            bytes_written,
            content_length,
        })
    }

    fn progress_bar(&self, filename: &str, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = match total {
            Some(total) if total > 0 => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{msg} [{bar:40.green}] {bytes}/{total_bytes} {bytes_per_sec} {eta}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
                );
                bar
            }
            _ => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::with_template("{spinner:.green} {msg} {bytes} {bytes_per_sec}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner
            }
        };
        progress.set_message(filename.to_string());
        progress
    }
}

fn copy_in_chunks(mut body: impl Read, file: &mut File, progress: &ProgressBar) -> Result<u64> {
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut written = 0u64;

    loop {
        let read = match body.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        file.write_all(&chunk[..read])?;
        written += read as u64;
        progress.inc(read as u64);
    }

    file.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::http::testing::{FakeClient, Route};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(filename_from_url("https://x/a.zip").unwrap(), "a.zip");
        assert_eq!(
            filename_from_url("https://cdn.test/maps/icons/m1.png?v=3#top").unwrap(),
            "m1.png"
        );
        assert_eq!(filename_from_url("maps/b.zip").unwrap(), "b.zip");
    }

    #[test]
    fn test_filename_from_url_without_segment_fails() {
        assert!(matches!(
            filename_from_url("https://cdn.test/maps/"),
            Err(SpargatError::InvalidUrl { .. })
        ));
        assert!(filename_from_url("https://cdn.test").is_err());
    }

    #[test]
    fn test_download_writes_all_chunks() {
        let dir = TempDir::new().unwrap();
        let body = payload(CHUNK_SIZE * 3 + 17);
        let client = FakeClient::new().with_body("https://x/a.zip", body.clone());
        let downloader = Downloader::new(&client, dir.path()).show_progress(false);

        let file = downloader.download_file("https://x/a.zip", "a.zip").unwrap();

        assert_eq!(file.filename, "a.zip");
        assert_eq!(file.bytes_written, body.len() as u64);
        assert_eq!(file.content_length, Some(body.len() as u64));
        assert_eq!(std::fs::read(dir.path().join("a.zip")).unwrap(), body);
    }

    #[test]
    fn test_download_without_content_length() {
        let dir = TempDir::new().unwrap();
        let client = FakeClient::new().with_route(
            "https://x/icon.png",
            Route::Ok {
                status: 200,
                body: payload(2048),
                content_length: None,
            },
        );
        let downloader = Downloader::new(&client, dir.path()).show_progress(false);

        let file = downloader.download_file("https://x/icon.png", "icon.png").unwrap();

        assert_eq!(file.content_length, None);
        assert_eq!(file.bytes_written, 2048);
        assert!((file.size_mb() - 2048.0 / BYTES_PER_MB).abs() < f64::EPSILON);
    }

    #[test]
    fn test_download_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.zip"), payload(10_000)).unwrap();
        let client = FakeClient::new().with_body("https://x/a.zip", "fresh");
        let downloader = Downloader::new(&client, dir.path()).show_progress(false);

        downloader.download_file("https://x/a.zip", "a.zip").unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.zip")).unwrap(), b"fresh");
    }

    #[test]
    fn test_non_200_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let client = FakeClient::new().with_status("https://x/gone.zip", 404);
        let downloader = Downloader::new(&client, dir.path()).show_progress(false);

        let result = downloader.download_file("https://x/gone.zip", "gone.zip");

        assert!(matches!(
            result,
            Err(SpargatError::UnexpectedStatus { status: 404, .. })
        ));
        assert!(!dir.path().join("gone.zip").exists());
    }

    #[test]
    fn test_mid_stream_failure_leaves_partial_file() {
        let dir = TempDir::new().unwrap();
        let sent = payload(CHUNK_SIZE * 2);
        let client = FakeClient::new().with_route(
            "https://x/big.zip",
            Route::BrokenStream {
                sent: sent.clone(),
                content_length: 1_000_000,
            },
        );
        let downloader = Downloader::new(&client, dir.path()).show_progress(false);

        let result = downloader.download_file("https://x/big.zip", "big.zip");

        assert!(matches!(result, Err(SpargatError::Io(_))));
        assert_eq!(std::fs::read(dir.path().join("big.zip")).unwrap(), sent);
    }

    #[test]
    fn test_short_body_is_incomplete() {
        let dir = TempDir::new().unwrap();
        let client = FakeClient::new().with_route(
            "https://x/short.zip",
            Route::Ok {
                status: 200,
                body: payload(100),
                content_length: Some(500),
            },
        );
        let downloader = Downloader::new(&client, dir.path()).show_progress(false);

        let result = downloader.download_file("https://x/short.zip", "short.zip");

        assert!(matches!(
            result,
            Err(SpargatError::IncompleteDownload {
                expected: 500,
                received: 100
            })
        ));
    }

    #[test]
    fn test_size_mb_prefers_content_length() {
        let file = DownloadedFile {
            filename: "a.zip".to_string(),
            path: PathBuf::from("a.zip"),
            bytes_written: 10,
            content_length: Some(3 * 1024 * 1024),
        };
        assert_eq!(format!("{:.2}", file.size_mb()), "3.00");
    }
}
