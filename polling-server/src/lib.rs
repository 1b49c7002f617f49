//! Polling station finder.
//!
//! Resolves free-form, partial address input ("1052 Budapest, Petőfi utca
//! 10.", "Kaposvár", "Kossuth tér") to the voter's polling station, and
//! serves the result as JSON for a presentation layer.

pub mod config;
pub mod directory;
pub mod domain;
pub mod resolver;
pub mod telemetry;
pub mod web;
