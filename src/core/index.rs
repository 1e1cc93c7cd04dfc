use crate::core::http::HttpClient;
use crate::error::{Result, SpargatError};
use crate::utils::{fs, term};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

const UNKNOWN_MAP_ID: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Archive,
    Icon,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Archive => write!(f, "archive"),
            AssetKind::Icon => write!(f, "icon"),
        }
    }
}

/// One record of the map index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub map_id: String,
    pub map_zip_url: String,
    pub map_icon: String,
}

impl MapEntry {
    /// Read an entry leniently: missing or non-string fields become empty.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let map_id = value
            .get("mapId")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_MAP_ID)
            .to_string();

        MapEntry {
            map_id,
            map_zip_url: field("mapZipUrl"),
            map_icon: field("mapIcon"),
        }
    }

    /// Non-empty URLs of this entry, archive first.
    pub fn downloads(&self) -> impl Iterator<Item = (AssetKind, &str)> {
        [
            (AssetKind::Archive, self.map_zip_url.as_str()),
            (AssetKind::Icon, self.map_icon.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
    }
}

/// Parsed map index together with the document it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MapIndex {
    document: Value,
    entries: Vec<MapEntry>,
}

impl MapIndex {
    pub fn from_value(document: Value) -> Result<Self> {
        let items = document
            .as_array()
            .ok_or_else(|| SpargatError::invalid_index("expected a JSON array of map entries"))?;

        let entries = items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                if !item.is_object() {
                    log::warn!("map index entry {position} is not an object, treating it as empty");
                }
                MapEntry::from_value(item)
            })
            .collect();

        Ok(Self { document, entries })
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_value(fs::read_json(path)?)
    }

    /// Write the original document, field order untouched.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write_json_pretty(path, &self.document)
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where the map index comes from.
///
/// `Ok(None)` means the index could not be obtained and there is nothing to
/// process. `Err` is reserved for local failures such as an unwritable cache.
pub trait IndexSource {
    fn load(&self) -> Result<Option<MapIndex>>;
}

/// Fetches the index over HTTP, optionally persisting it afterwards.
pub struct RemoteIndex<'a> {
    client: &'a dyn HttpClient,
    url: String,
    persist_to: Option<PathBuf>,
}

impl<'a> RemoteIndex<'a> {
    pub fn new(client: &'a dyn HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            persist_to: None,
        }
    }

    pub fn persist_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_to = Some(path.into());
        self
    }

    fn fetch(&self) -> Result<MapIndex> {
        let response = self.client.get(&self.url)?;
        if !response.is_ok() {
            return Err(SpargatError::UnexpectedStatus {
                url: self.url.clone(),
                status: response.status,
            });
        }

        MapIndex::parse(&response.text()?)
    }
}

impl IndexSource for RemoteIndex<'_> {
    fn load(&self) -> Result<Option<MapIndex>> {
        println!("Fetching map index from {}", self.url);

        let index = match self.fetch() {
            Ok(index) => index,
            Err(SpargatError::UnexpectedStatus { status, .. }) => {
                term::failure(&format!(
                    "Error fetching map data, status code: {status}"
                ));
                return Ok(None);
            }
            Err(e) => {
                term::failure(&format!("Error fetching data: {e}"));
                return Ok(None);
            }
        };

        log::info!("fetched map index with {} entries", index.len());

        if let Some(path) = &self.persist_to {
            index.save(path)?;
            log::info!("saved map index to {}", path.display());
        }

        Ok(Some(index))
    }
}

/// Uses a local copy of the index when one exists, otherwise the remote source.
pub struct CachedIndex<'a> {
    path: PathBuf,
    remote: RemoteIndex<'a>,
}

impl<'a> CachedIndex<'a> {
    /// The remote index is persisted to `path` after a successful fetch.
    pub fn new(path: impl Into<PathBuf>, remote: RemoteIndex<'a>) -> Self {
        let path = path.into();
        let remote = remote.persist_to(path.clone());
        Self { path, remote }
    }
}

impl IndexSource for CachedIndex<'_> {
    fn load(&self) -> Result<Option<MapIndex>> {
        if !self.path.exists() {
            log::debug!("no local index at {}", self.path.display());
            return self.remote.load();
        }

        println!("Loading map index from {}", self.path.display());
        let index = MapIndex::load(&self.path).map_err(|e| {
            SpargatError::invalid_index(format!(
                "local index {} is unreadable ({e}); delete it to fetch a fresh copy",
                self.path.display()
            ))
        })?;

        Ok(Some(index))
    }
}
