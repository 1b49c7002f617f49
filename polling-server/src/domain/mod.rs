//! Domain types for the polling station finder.
//!
//! Postal codes and coordinates are validated when constructed.

mod postal_code;
mod station;

pub use postal_code::{InvalidPostalCode, PostalCode};
pub use station::{Coordinates, InvalidCoordinates, PollingStation};
