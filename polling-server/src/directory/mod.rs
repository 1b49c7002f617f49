//! Polling station directory.
//!
//! The resolver reads station records through the [`StationDirectory`]
//! port. This module provides the port and three adapters:
//!
//! - [`SupabaseDirectory`] queries the hosted PostgREST `polling_stations`
//!   table over HTTP
//! - [`InMemoryDirectory`] serves records loaded from a JSON file, for
//!   offline use and tests
//! - [`CachedDirectory`] wraps any directory with a TTL cache
//!
//! Every query returns records in a stable order (primary key ascending),
//! so "first eligible record" is reproducible.

mod cache;
mod client;
mod error;
mod memory;
mod row;

use std::future::Future;

pub use cache::{CacheConfig, CachedDirectory};
pub use client::{DirectoryConfig, SupabaseDirectory};
pub use error::DirectoryError;
pub use memory::InMemoryDirectory;
pub use row::StationRow;

use crate::domain::{PollingStation, PostalCode};

/// Read-only query capability over a polling station dataset.
pub trait StationDirectory: Send + Sync {
    /// Stations whose postal code equals `code` exactly.
    fn find_by_postal_code(
        &self,
        code: &PostalCode,
    ) -> impl Future<Output = Result<Vec<PollingStation>, DirectoryError>> + Send;

    /// Stations whose settlement contains `text`, ignoring case.
    fn find_by_settlement_contains(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<PollingStation>, DirectoryError>> + Send;

    /// Stations whose address contains `text`, ignoring case.
    fn find_by_address_contains(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<PollingStation>, DirectoryError>> + Send;
}
