use crate::error::{Result, SpargatError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

const JSON_INDENT: &[u8] = b"    ";

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(e, path))?;
    }
    Ok(())
}

/// Serialize `value` as JSON indented by four spaces, replacing any existing file.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir_exists(parent)?;
        }
    }

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    std::fs::write(path, buffer).map_err(|e| map_io_error(e, path))?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| map_io_error(e, path))?;
    Ok(serde_json::from_str(&content)?)
}

fn map_io_error(error: std::io::Error, path: &Path) -> SpargatError {
    match error.kind() {
        std::io::ErrorKind::PermissionDenied => SpargatError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => SpargatError::from(error),
    }
}
