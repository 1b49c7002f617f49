//! Resolution outcome types.

use crate::directory::DirectoryError;
use crate::domain::PollingStation;

/// Which tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchedBy {
    /// Exact postal code match.
    PostalCode,
    /// Case-insensitive settlement substring match.
    Settlement,
    /// Case-insensitive address substring match.
    Address,
}

impl MatchedBy {
    /// Stable identifier used in API responses and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedBy::PostalCode => "postal_code",
            MatchedBy::Settlement => "settlement",
            MatchedBy::Address => "address",
        }
    }
}

/// Result of a single resolve call.
#[derive(Debug)]
pub enum SearchOutcome {
    /// An eligible station was found.
    Found {
        station: PollingStation,
        matched_by: MatchedBy,
    },

    /// No tier produced an eligible station.
    NotFound,

    /// The directory could not be queried. Distinct from `NotFound`:
    /// refining the input will not help.
    QueryFailed(DirectoryError),
}

impl SearchOutcome {
    /// The matched station, if any.
    pub fn station(&self) -> Option<&PollingStation> {
        match self {
            SearchOutcome::Found { station, .. } => Some(station),
            _ => None,
        }
    }

    /// The tier that matched, if any.
    pub fn matched_by(&self) -> Option<MatchedBy> {
        match self {
            SearchOutcome::Found { matched_by, .. } => Some(*matched_by),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SearchOutcome::NotFound)
    }

    pub fn is_query_failed(&self) -> bool {
        matches!(self, SearchOutcome::QueryFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_by_identifiers() {
        assert_eq!(MatchedBy::PostalCode.as_str(), "postal_code");
        assert_eq!(MatchedBy::Settlement.as_str(), "settlement");
        assert_eq!(MatchedBy::Address.as_str(), "address");
    }

    #[test]
    fn accessors_on_non_found() {
        let outcome = SearchOutcome::NotFound;
        assert!(outcome.station().is_none());
        assert!(outcome.matched_by().is_none());
        assert!(outcome.is_not_found());
        assert!(!outcome.is_found());

        let outcome = SearchOutcome::QueryFailed(DirectoryError::RateLimited);
        assert!(outcome.is_query_failed());
        assert!(outcome.station().is_none());
    }
}
