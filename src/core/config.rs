use crate::error::{Result, SpargatError};
use crate::utils::fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_INDEX_URL: &str = "https://static.resquared.studio/maps/map_index.json";
pub const DEFAULT_INDEX_FILE: &str = "map_index.json";
pub const DEFAULT_MANIFEST_FILE: &str = "local_map_index.json";

const LOCAL_CONFIG_FILE: &str = "spargat.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub index_url: String,
    pub output_dir: PathBuf,
    pub index_file: String,
    pub manifest_file: String,
    /// Reuse `index_file` when it exists instead of fetching the index.
    pub cache_index: bool,
    pub write_manifest: bool,
    pub progress: bool,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            index_url: DEFAULT_INDEX_URL.to_string(),
            output_dir: PathBuf::from("."),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            cache_index: true,
            write_manifest: true,
            progress: true,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from `explicit` if given, otherwise from the first
    /// config file found in the working directory or the user config dir.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SpargatError::config_error(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        match discover_config_path() {
            Some(path) => Self::from_file(&path),
            None => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        log::debug!("loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.index_url.trim().is_empty() {
            return Err(SpargatError::config_error("index_url must not be empty"));
        }
        if self.index_file.trim().is_empty() || self.manifest_file.trim().is_empty() {
            return Err(SpargatError::config_error(
                "index_file and manifest_file must not be empty",
            ));
        }
        if self.index_file == self.manifest_file {
            return Err(SpargatError::config_error(
                "index_file and manifest_file must be different files",
            ));
        }
        Ok(())
    }

    /// Create the output directory if it does not exist yet.
    pub fn prepare_output_dir(&self) -> Result<()> {
        fs::ensure_dir_exists(&self.output_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(&self.index_file)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_file)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn discover_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("spargat").join("config.toml"))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_enable_cache_and_manifest() {
        let config = Config::default();
        assert_eq!(config.index_url, DEFAULT_INDEX_URL);
        assert!(config.cache_index);
        assert!(config.write_manifest);
        assert_eq!(config.index_path(), PathBuf::from("./map_index.json"));
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("./local_map_index.json")
        );
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let content = r#"
output_dir = "maps"
cache_index = false
timeout_secs = 15
"#;

        let config = Config::parse(content).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("maps"));
        assert!(!config.cache_index);
        assert!(config.write_manifest);
        assert_eq!(config.index_url, DEFAULT_INDEX_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_parse_rejects_same_index_and_manifest_file() {
        let content = r#"
index_file = "maps.json"
manifest_file = "maps.json"
"#;

        let result = Config::parse(content);
        assert!(matches!(result, Err(SpargatError::ConfigError { .. })));
    }

    #[test]
    fn test_parse_rejects_unknown_types() {
        let result = Config::parse("cache_index = \"yes\"");
        assert!(matches!(result, Err(SpargatError::Toml(_))));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = Config::load(Some(missing.as_path()));
        assert!(matches!(result, Err(SpargatError::ConfigError { .. })));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spargat.toml");
        std::fs::write(&path, "index_url = \"https://example.com/index.json\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.index_url, "https://example.com/index.json");
    }

    #[test]
    fn test_prepare_output_dir_creates_directory() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            output_dir: dir.path().join("downloads"),
            ..Config::default()
        };

        config.prepare_output_dir().unwrap();
        assert!(config.output_dir.is_dir());
    }
}
