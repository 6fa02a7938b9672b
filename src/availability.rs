//! Stock availability and the filter narrowing a catalog to usable parts.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::PartDefinition;
use crate::errors::StockStoreError;

/// Mapping from part name to whether the part is in stock.
///
/// Names that are not present are treated as in stock.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityMap(HashMap<String, bool>);

impl AvailabilityMap {
    /// Create an empty map, meaning every part is in stock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map listing every catalog part explicitly as in stock.
    #[must_use]
    pub fn all_in_stock(catalog: &[PartDefinition]) -> Self {
        Self(
            catalog
                .iter()
                .map(|part| (part.name.clone(), true))
                .collect(),
        )
    }

    /// Whether the named part may be used.
    ///
    /// # Examples
    /// ```
    /// use trusscalc::AvailabilityMap;
    ///
    /// let mut stock = AvailabilityMap::new();
    /// assert!(stock.is_available("FD34-400"));
    /// stock.set("FD34-400", false);
    /// assert!(!stock.is_available("FD34-400"));
    /// ```
    #[must_use]
    pub fn is_available(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(true)
    }

    /// Record the stock state of a part.
    pub fn set(&mut self, name: impl Into<String>, available: bool) {
        self.0.insert(name.into(), available);
    }
}

impl FromIterator<(String, bool)> for AvailabilityMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Return the catalog entries that are in stock, preserving catalog order.
#[must_use]
pub fn filter_available<'a>(
    catalog: &'a [PartDefinition],
    availability: &AvailabilityMap,
) -> Vec<&'a PartDefinition> {
    catalog
        .iter()
        .filter(|part| availability.is_available(&part.name))
        .collect()
}

/// Source of the availability map read at the start of each computation.
pub trait StockStore {
    /// Load the current availability map.
    ///
    /// # Errors
    ///
    /// Returns [`StockStoreError`] when the backing storage cannot be read.
    fn load_availability(&self) -> Result<AvailabilityMap, StockStoreError>;

    /// Persist an availability map.
    ///
    /// # Errors
    ///
    /// Returns [`StockStoreError`] when the backing storage cannot be written.
    fn save_availability(&self, availability: &AvailabilityMap) -> Result<(), StockStoreError>;
}

/// Stock store backed by a JSON object of `name: bool` pairs on disk.
#[derive(Clone, Debug)]
pub struct JsonStockStore {
    /// Location of the JSON file.
    path: PathBuf,
}

impl JsonStockStore {
    /// Create a store reading and writing `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StockStore for JsonStockStore {
    fn load_availability(&self) -> Result<AvailabilityMap, StockStoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "no stock file, every part in stock");
                return Ok(AvailabilityMap::new());
            }
            Err(source) => {
                return Err(StockStoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| StockStoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save_availability(&self, availability: &AvailabilityMap) -> Result<(), StockStoreError> {
        let text =
            serde_json::to_string_pretty(availability).map_err(|source| {
                StockStoreError::Malformed {
                    path: self.path.clone(),
                    source,
                }
            })?;
        fs::write(&self.path, text).map_err(|source| StockStoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
