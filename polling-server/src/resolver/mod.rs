//! Polling station resolution.
//!
//! Maps free-form address input to at most one polling station by trying
//! progressively looser matching tiers: postal code, then settlement name,
//! then street address.

mod outcome;
mod search;


pub use outcome::{MatchedBy, SearchOutcome};
pub use search::Resolver;
