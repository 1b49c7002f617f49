//! Web layer for the polling station finder.
//!
//! Exposes the resolver as a JSON endpoint for the presentation layer.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
