//! Tiered polling station lookup.
//!
//! Tiers are tried strictly in order and the first decisive one wins:
//!
//! 1. **Postal code**: if the input holds a whole 4-digit token, look it
//!    up exactly. A successful query with no rows is a confirmed absence
//!    and ends the search with `NotFound`; later tiers are not consulted.
//!    Rows that all lack coordinates are not decisive and fall through.
//! 2. **Settlement**: case-insensitive substring of the trimmed input.
//! 3. **Address**: the same text against street addresses.
//!
//! A directory failure at any tier ends the search with `QueryFailed`.

use tracing::{Instrument, debug, info, info_span, warn};

use crate::directory::{DirectoryError, StationDirectory};
use crate::domain::{PollingStation, PostalCode};

use super::outcome::{MatchedBy, SearchOutcome};

/// Intermediate result of the tier walk.
enum TierResult {
    Match(PollingStation, MatchedBy),
    ConfirmedAbsent,
    Exhausted,
}

/// Resolves free-form address input to a polling station.
///
/// Holds no mutable state: one resolver can serve any number of concurrent
/// callers. Dropping a `resolve` future cancels the in-flight directory
/// query and yields no outcome.
#[derive(Debug, Clone)]
pub struct Resolver<D> {
    directory: D,
}

impl<D: StationDirectory> Resolver<D> {
    /// Create a resolver reading from `directory`.
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// The directory this resolver queries.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Resolve `input` to at most one polling station.
    pub async fn resolve(&self, input: &str) -> SearchOutcome {
        // Voter addresses stay out of info-level output.
        let span = info_span!("resolve", input_len = input.len());

        async {
            debug!(input, "resolving");
            let outcome = match self.walk_tiers(input).await {
                Ok(TierResult::Match(station, matched_by)) => SearchOutcome::Found {
                    station,
                    matched_by,
                },
                Ok(TierResult::ConfirmedAbsent) | Ok(TierResult::Exhausted) => {
                    SearchOutcome::NotFound
                }
                Err(e) => {
                    warn!(error = %e, "station directory query failed");
                    return SearchOutcome::QueryFailed(e);
                }
            };

            match &outcome {
                SearchOutcome::Found {
                    station,
                    matched_by,
                } => info!(
                    matched_by = matched_by.as_str(),
                    station_number = %station.station_number,
                    locality = station.locality_label(),
                    "polling station found"
                ),
                _ => info!("no polling station found"),
            }

            outcome
        }
        .instrument(span)
        .await
    }

    async fn walk_tiers(&self, input: &str) -> Result<TierResult, DirectoryError> {
        if let Some(code) = PostalCode::find_in(input) {
            debug!(postal_code = %code, "trying postal code tier");
            let rows = self.directory.find_by_postal_code(&code).await?;

            if rows.is_empty() {
                debug!(postal_code = %code, "postal code not in directory");
                return Ok(TierResult::ConfirmedAbsent);
            }

            if let Some(station) = first_eligible(rows) {
                return Ok(TierResult::Match(station, MatchedBy::PostalCode));
            }

            debug!(postal_code = %code, "no postal code match has coordinates");
        }

        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(TierResult::Exhausted);
        }

        debug!("trying settlement tier");
        let rows = self.directory.find_by_settlement_contains(&needle).await?;
        if let Some(station) = first_eligible(rows) {
            return Ok(TierResult::Match(station, MatchedBy::Settlement));
        }

        debug!("trying address tier");
        let rows = self.directory.find_by_address_contains(&needle).await?;
        if let Some(station) = first_eligible(rows) {
            return Ok(TierResult::Match(station, MatchedBy::Address));
        }

        Ok(TierResult::Exhausted)
    }
}

/// First record, in directory order, that can be displayed.
fn first_eligible(rows: Vec<PollingStation>) -> Option<PollingStation> {
    rows.into_iter().find(PollingStation::is_eligible)
}
