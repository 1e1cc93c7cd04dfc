use crate::core::download::{filename_from_url, Downloader};
use crate::core::index::MapIndex;
use crate::error::SpargatError;
use crate::utils::term;

/// Download every archive and icon referenced by `index`, in index order.
///
/// Each URL succeeds or fails on its own. Returns the file names that were
/// downloaded, in the order they were requested.
pub fn process_maps(index: &MapIndex, downloader: &Downloader) -> Vec<String> {
    let mut downloaded = Vec::new();

    for entry in index.entries() {
        log::debug!("processing map {}", entry.map_id);

        for (kind, url) in entry.downloads() {
            let filename = match filename_from_url(url) {
                Ok(name) => name,
                Err(e) => {
                    term::failure(&format!("Skipping {kind} of map {}: {e}", entry.map_id));
                    continue;
                }
            };

            match downloader.download_file(url, &filename) {
                Ok(file) => {
                    term::success(&format!(
                        "Downloaded: {} - {:.2} MB",
                        file.filename,
                        file.size_mb()
                    ));
                    downloaded.push(file.filename);
                }
                Err(SpargatError::UnexpectedStatus { status, .. }) => {
                    log::debug!("{url} answered with status {status}");
                    term::failure(&format!("Error downloading {filename} from {url}"));
                }
                Err(e) => {
                    term::failure(&format!("Download error for {filename}: {e}"));
                }
            }
        }
    }

    downloaded
}
