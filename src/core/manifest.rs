use crate::error::Result;
use crate::utils::fs;
use std::path::Path;

/// Record the downloaded file names, replacing the previous manifest.
pub fn write_manifest(path: &Path, filenames: &[String]) -> Result<()> {
    fs::write_json_pretty(path, filenames)?;
    log::info!(
        "wrote {} file names to {}",
        filenames.len(),
        path.display()
    );
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Vec<String>> {
    fs::read_json(path)
}
