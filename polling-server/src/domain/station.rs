//! Polling station records.

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinates {
    lat: f64,
    lng: f64,
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]; both are
/// finite. Any `Coordinates` value is valid by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair, validating both components.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// A polling station as stored in the station directory.
///
/// Records are read-only to this crate. A record without `coordinates`
/// can still be listed by a directory, but it is never returned as a match.
#[derive(Debug, Clone, PartialEq)]
pub struct PollingStation {
    /// Directory primary key, when the source has one.
    pub id: Option<i64>,

    /// 4-digit postal code, possibly shared by several stations.
    pub postal_code: String,

    /// Locality name (e.g. "Budapest").
    pub settlement: String,

    /// Street address of the station.
    pub address: String,

    /// Identifier shown to the voter.
    pub station_number: String,

    /// Administrative label (e.g. "V. kerület").
    pub district: Option<String>,

    /// Location of the station, required for display.
    pub coordinates: Option<Coordinates>,
}

impl PollingStation {
    /// Whether this record may be returned as a match.
    pub fn is_eligible(&self) -> bool {
        self.coordinates.is_some()
    }

    /// District if present, otherwise the settlement.
    pub fn locality_label(&self) -> &str {
        self.district.as_deref().unwrap_or(&self.settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(coordinates: Option<Coordinates>, district: Option<&str>) -> PollingStation {
        PollingStation {
            id: Some(1),
            postal_code: "1052".to_string(),
            settlement: "Budapest".to_string(),
            address: "Petőfi utca 10.".to_string(),
            station_number: "001".to_string(),
            district: district.map(str::to_string),
            coordinates,
        }
    }

    #[test]
    fn valid_coordinates() {
        let c = Coordinates::new(47.4979, 19.0402).unwrap();
        assert_eq!(c.lat(), 47.4979);
        assert_eq!(c.lng(), 19.0402);

        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn reject_out_of_range() {
        assert!(Coordinates::new(90.1, 19.0).is_err());
        assert!(Coordinates::new(-90.1, 19.0).is_err());
        assert!(Coordinates::new(47.0, 180.5).is_err());
        assert!(Coordinates::new(47.0, -181.0).is_err());
    }

    #[test]
    fn reject_non_finite() {
        assert!(Coordinates::new(f64::NAN, 19.0).is_err());
        assert!(Coordinates::new(47.0, f64::INFINITY).is_err());
    }

    #[test]
    fn error_display() {
        let err = Coordinates::new(100.0, 19.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinates (100, 19): latitude must be within [-90, 90]"
        );
    }

    #[test]
    fn eligibility_requires_coordinates() {
        let with = station(Some(Coordinates::new(47.5, 19.05).unwrap()), None);
        let without = station(None, None);
        assert!(with.is_eligible());
        assert!(!without.is_eligible());
    }

    #[test]
    fn locality_label_prefers_district() {
        assert_eq!(station(None, Some("V. kerület")).locality_label(), "V. kerület");
        assert_eq!(station(None, None).locality_label(), "Budapest");
    }
}
