//! In-memory station directory.
//!
//! Serves records loaded from a JSON file (or built in code) without any
//! backend. Useful for offline development, demos and tests.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{PollingStation, PostalCode};

use super::StationDirectory;
use super::error::DirectoryError;
use super::row::decode_rows;

/// Station directory holding all records in memory.
///
/// Records are kept sorted by primary key; records without a key keep
/// their relative input order after all keyed records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    stations: Arc<Vec<PollingStation>>,
}

impl InMemoryDirectory {
    /// Create a directory from already-built records.
    pub fn new(mut stations: Vec<PollingStation>) -> Self {
        stations.sort_by_key(|s| (s.id.is_none(), s.id));
        Self {
            stations: Arc::new(stations),
        }
    }

    /// Load records from a JSON array of station rows.
    ///
    /// Elements that are not valid rows are skipped.
    pub fn from_json_str(json: &str) -> Result<Self, DirectoryError> {
        Ok(Self::new(decode_rows(json)?.stations))
    }

    /// Load records from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DirectoryError::Load {
            message: format!("{}: {}", path.display(), e),
        })?;

        Self::from_json_str(&json).map_err(|e| DirectoryError::Load {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of records that carry coordinates.
    pub fn eligible_count(&self) -> usize {
        self.stations.iter().filter(|s| s.is_eligible()).count()
    }

    fn filter(&self, pred: impl Fn(&PollingStation) -> bool) -> Vec<PollingStation> {
        self.stations.iter().filter(|s| pred(s)).cloned().collect()
    }
}

impl StationDirectory for InMemoryDirectory {
    async fn find_by_postal_code(
        &self,
        code: &PostalCode,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        Ok(self.filter(|s| s.postal_code == code.as_str()))
    }

    async fn find_by_settlement_contains(
        &self,
        text: &str,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        let needle = text.to_lowercase();
        Ok(self.filter(|s| s.settlement.to_lowercase().contains(&needle)))
    }

    async fn find_by_address_contains(
        &self,
        text: &str,
    ) -> Result<Vec<PollingStation>, DirectoryError> {
        let needle = text.to_lowercase();
        Ok(self.filter(|s| s.address.to_lowercase().contains(&needle)))
    }
}
