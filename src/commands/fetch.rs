use crate::core::{
    config::Config,
    download::Downloader,
    http::HttpClient,
    index::{CachedIndex, IndexSource, RemoteIndex},
    manifest, processor,
};
use crate::error::Result;
use crate::utils::term;
use std::path::PathBuf;

/// What a run did, for callers that want more than the console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    /// The index could not be obtained, nothing was downloaded.
    NoIndex,
    Completed {
        entries: usize,
        downloaded: Vec<String>,
        manifest: Option<PathBuf>,
    },
}

/// Obtain the map index, download everything it references and record the result.
pub fn run(config: &Config, client: &dyn HttpClient) -> Result<RunSummary> {
    config.prepare_output_dir()?;

    let remote = RemoteIndex::new(client, config.index_url.clone());
    let source: Box<dyn IndexSource + '_> = if config.cache_index {
        Box::new(CachedIndex::new(config.index_path(), remote))
    } else {
        Box::new(remote)
    };

    let index = match source.load()? {
        Some(index) => index,
        None => {
            term::failure("Failed to obtain the map index, nothing to download.");
            return Ok(RunSummary::NoIndex);
        }
    };

    println!("Found {} maps in the index", index.len());

    let downloader = Downloader::new(client, &config.output_dir).show_progress(config.progress);
    let downloaded = processor::process_maps(&index, &downloader);

    let mut manifest_path = None;
    if config.write_manifest {
        if downloaded.is_empty() {
            println!("No files were downloaded.");
        } else {
            let path = config.manifest_path();
            manifest::write_manifest(&path, &downloaded)?;
            term::success(&format!(
                "Saved {} downloaded file names to {}",
                downloaded.len(),
                path.display()
            ));
            manifest_path = Some(path);
        }
    }

    Ok(RunSummary::Completed {
        entries: index.len(),
        downloaded,
        manifest: manifest_path,
    })
}
