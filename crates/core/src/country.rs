//! Country display names from a static, file-resident reference dataset.
//!
//! The dataset maps a country identifier to the list of localized entries
//! for that country:
//!
//! ```json
//! { "VN": [ { "locale": "vi", "name": "Việt Nam", "countryCode": "VN" },
//!           { "locale": "en", "name": "Vietnam",  "countryCode": "VN" } ] }
//! ```
//!
//! The file is read on every lookup. There is no cache, so edits to the file
//! are visible on the next call. Lookups never touch the record store.
//!
//! Ids are matched case-insensitively, so a dataset holding two ids that
//! differ only by case is rejected when loaded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Locale used when a caller does not ask for one.
pub const DEFAULT_LOCALE: &str = "vi";

/// Resolved country shown next to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub id: String,
    pub name: String,
    pub code: String,
}

/// One localized entry in the reference dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryEntry {
    pub locale: String,
    pub name: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
}

/// Parsed form of the reference dataset.
pub type CountryDataset = HashMap<String, Vec<CountryEntry>>;

#[derive(Debug, thiserror::Error)]
pub enum CountryLookupError {
    #[error("failed to read country dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse country dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("country dataset {path} has ids {first:?} and {second:?} differing only by case")]
    AmbiguousId {
        path: PathBuf,
        first: String,
        second: String,
    },
}

/// Handle to the reference dataset. Constructed once at startup and shared.
#[derive(Debug, Clone)]
pub struct CountryLookup {
    path: PathBuf,
    default_locale: String,
}

impl CountryLookup {
    pub fn new(path: impl Into<PathBuf>, default_locale: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_locale: default_locale.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Re-read the dataset from disk.
    pub async fn load(&self) -> Result<CountryDataset, CountryLookupError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| CountryLookupError::Io {
                path: self.path.clone(),
                source,
            })?;
        let dataset: CountryDataset =
            serde_json::from_slice(&bytes).map_err(|source| CountryLookupError::Parse {
                path: self.path.clone(),
                source,
            })?;

        if let Some((first, second)) = case_collision(&dataset) {
            return Err(CountryLookupError::AmbiguousId {
                path: self.path.clone(),
                first,
                second,
            });
        }
        Ok(dataset)
    }

    /// Find the entry for `country_id` in `locale`.
    ///
    /// Returns `Ok(None)` when the id is unknown or has no entry for the locale.
    pub async fn lookup(
        &self,
        country_id: &str,
        locale: &str,
    ) -> Result<Option<Country>, CountryLookupError> {
        let dataset = self.load().await?;
        Ok(find_country(&dataset, country_id, locale))
    }
}

/// First pair of ids (in sorted order) that are equal ignoring ASCII case.
fn case_collision(dataset: &CountryDataset) -> Option<(String, String)> {
    let mut keys: Vec<&String> = dataset.keys().collect();
    keys.sort_by_cached_key(|key| (key.to_ascii_lowercase(), key.to_string()));
    keys.windows(2)
        .find(|pair| pair[0].eq_ignore_ascii_case(pair[1]))
        .map(|pair| (pair[0].clone(), pair[1].clone()))
}

/// Match an id (exact key first, then case-insensitively) and a locale.
fn find_country(dataset: &CountryDataset, country_id: &str, locale: &str) -> Option<Country> {
    let country_id = country_id.trim();
    let (key, entries) = dataset.get_key_value(country_id).or_else(|| {
        dataset
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(country_id))
    })?;

    entries
        .iter()
        .find(|entry| entry.locale == locale)
        .map(|entry| Country {
            id: key.clone(),
            name: entry.name.clone(),
            code: entry.country_code.clone(),
        })
}
