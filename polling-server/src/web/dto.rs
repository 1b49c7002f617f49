//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::PollingStation;
use crate::resolver::SearchOutcome;

/// Request to find a polling station.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-form address text
    pub q: Option<String>,
}

/// A polling station in search results.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StationResult {
    /// 4-digit postal code
    pub postal_code: String,

    /// Locality name
    pub settlement: String,

    /// Street address
    pub address: String,

    /// Identifier shown to the voter
    pub station_number: String,

    /// Administrative label
    pub district: Option<String>,

    /// Latitude
    pub lat: f64,

    /// Longitude
    pub lng: f64,
}

/// Response for a station search, tagged by `status`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResponse {
    /// A station was found
    Found {
        matched_by: String,
        station: StationResult,
    },

    /// No station matches the input
    NotFound,

    /// The directory could not be queried
    QueryFailed { error: String },
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StationResult {
    /// Create from a domain station. Returns `None` if it has no coordinates.
    pub fn from_station(station: &PollingStation) -> Option<Self> {
        let coords = station.coordinates?;

        Some(Self {
            postal_code: station.postal_code.clone(),
            settlement: station.settlement.clone(),
            address: station.address.clone(),
            station_number: station.station_number.clone(),
            district: station.district.clone(),
            lat: coords.lat(),
            lng: coords.lng(),
        })
    }
}

impl SearchResponse {
    /// Create from a resolver outcome.
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found {
                station,
                matched_by,
            } => match StationResult::from_station(station) {
                Some(station) => SearchResponse::Found {
                    matched_by: matched_by.as_str().to_string(),
                    station,
                },
                None => SearchResponse::NotFound,
            },
            SearchOutcome::NotFound => SearchResponse::NotFound,
            SearchOutcome::QueryFailed(e) => SearchResponse::QueryFailed {
                error: e.to_string(),
            },
        }
    }
}
