use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One crisis-intensity record, keyed by its `country` display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisRecord {
    pub country: String,
    /// Severity index, higher is worse.
    #[serde(default)]
    pub severity: f64,
    #[serde(default)]
    pub people_in_need: u64,
    #[serde(default)]
    pub funding_required_usd: f64,
    #[serde(default)]
    pub funding_received_usd: f64,
    #[serde(default)]
    pub summary: String,
}

impl CrisisRecord {
    /// Unfunded share of the requirement in `[0, 1]`; `None` without a requirement.
    pub fn funding_gap_ratio(&self) -> Option<f64> {
        if !(self.funding_required_usd.is_finite() && self.funding_required_usd > 0.0) {
            return None;
        }
        let received = self.funding_received_usd.max(0.0);
        Some(((self.funding_required_usd - received) / self.funding_required_usd).clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Corrupt(msg) => write!(f, "crisis catalog corrupt: {msg}"),
            CatalogError::Io(msg) => write!(f, "crisis catalog read error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Boundary-dataset names paired with the common names crisis records use.
pub const DEFAULT_NAME_PAIRS: &[(&str, &str)] = &[
    ("Democratic Republic of the Congo", "DR Congo"),
    ("Dem. Rep. Congo", "DR Congo"),
    ("Congo, Dem. Rep.", "DR Congo"),
    ("Republic of the Congo", "Congo"),
    ("Congo, Rep.", "Congo"),
    ("Central African Rep.", "Central African Republic"),
    ("S. Sudan", "South Sudan"),
    ("Côte d'Ivoire", "Ivory Coast"),
    ("Cote d'Ivoire", "Ivory Coast"),
    ("Burma", "Myanmar"),
    ("Syrian Arab Republic", "Syria"),
    ("Yemen, Rep.", "Yemen"),
    ("Palestine", "Occupied Palestinian Territory"),
    ("W. Sahara", "Western Sahara"),
    ("Eq. Guinea", "Equatorial Guinea"),
    ("Bosnia and Herz.", "Bosnia and Herzegovina"),
    ("Dominican Rep.", "Dominican Republic"),
    ("Venezuela, RB", "Venezuela"),
    ("Lao PDR", "Laos"),
    ("Iran, Islamic Rep.", "Iran"),
    ("Russian Federation", "Russia"),
    ("United Republic of Tanzania", "Tanzania"),
    ("eSwatini", "Eswatini"),
    ("Swaziland", "Eswatini"),
];

/// Case- and whitespace-insensitive lookup key.
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bidirectional dataset-name / common-name table.
///
/// Several dataset spellings may map to one common name, so the reverse
/// direction yields a list.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    to_common: BTreeMap<String, String>,
    to_dataset: BTreeMap<String, Vec<String>>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (dataset, common) in DEFAULT_NAME_PAIRS {
            table.insert(dataset, common);
        }
        table
    }

    pub fn insert(&mut self, dataset_name: &str, common_name: &str) {
        let dataset_name = dataset_name.trim();
        let common_name = common_name.trim();
        self.to_common
            .insert(name_key(dataset_name), common_name.to_string());
        let spellings = self.to_dataset.entry(name_key(common_name)).or_default();
        if !spellings.iter().any(|s| name_key(s) == name_key(dataset_name)) {
            spellings.push(dataset_name.to_string());
        }
    }

    pub fn common_name(&self, dataset_name: &str) -> Option<&str> {
        self.to_common.get(&name_key(dataset_name)).map(String::as_str)
    }

    pub fn dataset_names(&self, common_name: &str) -> &[String] {
        self.to_dataset
            .get(&name_key(common_name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.to_common.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_common.is_empty()
    }
}

/// Outcome of resolving a boundary feature's raw name.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub display_name: String,
    pub record: Option<CrisisRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct CrisisCatalog {
    records: BTreeMap<String, CrisisRecord>,
    names: NameTable,
}

impl CrisisCatalog {
    pub fn new(names: NameTable) -> Self {
        Self {
            records: BTreeMap::new(),
            names,
        }
    }

    /// Parses a JSON array of records, using the default name table.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CrisisRecord> =
            serde_json::from_str(json).map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        let mut catalog = Self::new(NameTable::with_defaults());
        for record in records {
            catalog.insert(record);
        }
        debug!(records = catalog.len(), "crisis catalog loaded");
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Later records for the same country replace earlier ones.
    pub fn insert(&mut self, record: CrisisRecord) {
        self.records.insert(name_key(&record.country), record);
    }

    pub fn get(&self, country: &str) -> Option<&CrisisRecord> {
        self.records.get(&name_key(country))
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn records(&self) -> impl Iterator<Item = &CrisisRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tries the raw name, then raw→common, then every dataset spelling of
    /// that common name.
    ///
    /// The display name prefers the common name when the table knows one.
    pub fn resolve(&self, raw_name: &str) -> Resolution {
        let raw = raw_name.trim();
        let common = self.names.common_name(raw);
        let display_name = common.unwrap_or(raw).to_string();

        let record = self
            .get(raw)
            .or_else(|| common.and_then(|c| self.get(c)))
            .or_else(|| {
                // Sibling spellings share the common name; fall back to the raw name
                // when it is itself the common one.
                self.names
                    .dataset_names(common.unwrap_or(raw))
                    .iter()
                    .find_map(|spelling| self.get(spelling))
            })
            .cloned();

        Resolution {
            display_name,
            record,
        }
    }
}
