//! Where boundary documents come from.
//!
//! The loader only needs "give me the text of dataset X". Implementations:
//! - [`HttpSource`]: remote GeoJSON over HTTP(S)
//! - [`FileSource`]: local GeoJSON files
//! - [`StaticSource`]: in-memory documents (tests, offline replays)

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BoundaryDataset {
    /// Whole-world country polygons.
    Countries,
    /// First-level subdivisions for every country.
    Admin1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceErrorKind {
    Network,
    Status(u16),
    Io,
    Decode,
}

/// Error type for boundary fetches. `Clone` so one failed in-flight fetch
/// can be reported to every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    pub kind: SourceErrorKind,
    pub message: String,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SourceErrorKind::Status(code) => write!(f, "HTTP {code}: {}", self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for SourceError {}

impl SourceError {
    pub fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Source of raw boundary documents.
///
/// Methods return boxed futures for dyn-compatibility.
pub trait BoundarySource: Send + Sync {
    fn fetch(&self, dataset: BoundaryDataset) -> BoxFuture<'_, Result<String, SourceError>>;
}

/// Locations and join settings for the two boundary documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub countries_url: String,
    pub admin1_url: String,
    /// Admin-1 property holding the parent country's ISO alpha-2 code.
    pub join_property: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            countries_url: "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_admin_0_countries.geojson".to_string(),
            admin1_url: "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_10m_admin_1_states_provinces.geojson".to_string(),
            join_property: "iso_a2".to_string(),
        }
    }
}

impl LoaderConfig {
    fn location(&self, dataset: BoundaryDataset) -> &str {
        match dataset {
            BoundaryDataset::Countries => &self.countries_url,
            BoundaryDataset::Admin1 => &self.admin1_url,
        }
    }

    pub fn is_remote(&self) -> bool {
        is_http(&self.countries_url) && is_http(&self.admin1_url)
    }
}

fn is_http(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// HTTP(S) boundary source.
pub struct HttpSource {
    config: LoaderConfig,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: LoaderConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

impl BoundarySource for HttpSource {
    fn fetch(&self, dataset: BoundaryDataset) -> BoxFuture<'_, Result<String, SourceError>> {
        let url = self.config.location(dataset).to_string();
        let client = self.client.clone();

        Box::pin(async move {
            let resp = client.get(&url).send().await.map_err(|e| {
                SourceError::new(SourceErrorKind::Network, format!("GET {url}: {e}"))
            })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(SourceError::new(
                    SourceErrorKind::Status(status.as_u16()),
                    format!("GET {url}"),
                ));
            }
            resp.text().await.map_err(|e| {
                SourceError::new(SourceErrorKind::Network, format!("read body of {url}: {e}"))
            })
        })
    }
}

/// Local-file boundary source.
pub struct FileSource {
    countries: PathBuf,
    admin1: PathBuf,
}

impl FileSource {
    pub fn new(countries: impl Into<PathBuf>, admin1: impl Into<PathBuf>) -> Self {
        Self {
            countries: countries.into(),
            admin1: admin1.into(),
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(&config.countries_url, &config.admin1_url)
    }
}

impl BoundarySource for FileSource {
    fn fetch(&self, dataset: BoundaryDataset) -> BoxFuture<'_, Result<String, SourceError>> {
        let path = match dataset {
            BoundaryDataset::Countries => self.countries.clone(),
            BoundaryDataset::Admin1 => self.admin1.clone(),
        };
        Box::pin(async move {
            tokio::fs::read_to_string(&path).await.map_err(|e| {
                SourceError::new(SourceErrorKind::Io, format!("read {}: {e}", path.display()))
            })
        })
    }
}

/// In-memory documents. A missing document fails like a 404.
#[derive(Debug, Default)]
pub struct StaticSource {
    countries: Option<String>,
    admin1: Option<String>,
    country_fetches: AtomicUsize,
    admin1_fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new(countries: Option<String>, admin1: Option<String>) -> Self {
        Self {
            countries,
            admin1,
            ..Self::default()
        }
    }

    /// Number of fetches issued for `dataset` so far.
    pub fn fetch_count(&self, dataset: BoundaryDataset) -> usize {
        match dataset {
            BoundaryDataset::Countries => self.country_fetches.load(Ordering::SeqCst),
            BoundaryDataset::Admin1 => self.admin1_fetches.load(Ordering::SeqCst),
        }
    }
}

impl BoundarySource for StaticSource {
    fn fetch(&self, dataset: BoundaryDataset) -> BoxFuture<'_, Result<String, SourceError>> {
        let doc = match dataset {
            BoundaryDataset::Countries => {
                self.country_fetches.fetch_add(1, Ordering::SeqCst);
                self.countries.clone()
            }
            BoundaryDataset::Admin1 => {
                self.admin1_fetches.fetch_add(1, Ordering::SeqCst);
                self.admin1.clone()
            }
        };
        Box::pin(async move {
            doc.ok_or_else(|| SourceError::new(SourceErrorKind::Status(404), format!("{dataset:?}")))
        })
    }
}
