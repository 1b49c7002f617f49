//! Wire representation of a `polling_stations` row.
//!
//! The same shape is returned by the hosted PostgREST table and used by
//! the JSON data files loaded into [`InMemoryDirectory`](super::InMemoryDirectory).

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Coordinates, PollingStation};

use super::error::DirectoryError;

/// A row of the `polling_stations` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(deserialize_with = "string_or_number")]
    pub postal_code: String,
    pub settlement: String,
    pub address: String,
    #[serde(deserialize_with = "string_or_number")]
    pub station_number: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl From<StationRow> for PollingStation {
    fn from(row: StationRow) -> Self {
        let coordinates = match (row.lat, row.lng) {
            (Some(lat), Some(lng)) => match Coordinates::new(lat, lng) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::debug!(id = ?row.id, error = %e, "ignoring invalid coordinates");
                    None
                }
            },
            _ => None,
        };

        PollingStation {
            id: row.id,
            postal_code: row.postal_code,
            settlement: row.settlement,
            address: row.address,
            station_number: row.station_number,
            district: row.district.filter(|d| !d.trim().is_empty()),
            coordinates,
        }
    }
}

/// Rows decoded from one JSON response body.
#[derive(Debug, Default)]
pub(super) struct DecodedRows {
    /// Number of array elements in the body, usable or not.
    pub received: usize,
    /// Records from the elements that decoded.
    pub stations: Vec<PollingStation>,
}

/// Decode a JSON array of station rows.
///
/// The body must be an array. An element that is not a valid row (a
/// missing or null required column, a wrong type) is skipped, so one bad
/// record cannot fail a whole query.
pub(super) fn decode_rows(json: &str) -> Result<DecodedRows, DirectoryError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| DirectoryError::Json {
            message: e.to_string(),
        })?;

    let received = values.len();
    let stations = values
        .into_iter()
        .filter_map(|value| match StationRow::deserialize(value) {
            Ok(row) => Some(PollingStation::from(row)),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed station row");
                None
            }
        })
        .collect();

    Ok(DecodedRows { received, stations })
}

/// Numeric columns (postal code, station number) are sometimes typed as
/// integers in the table; accept either representation.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}
