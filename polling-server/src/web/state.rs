//! Application state for the web layer.

use std::sync::Arc;

use crate::resolver::Resolver;

/// Shared application state.
///
/// Generic over the station directory so tests can serve the router from
/// an in-memory dataset.
pub struct AppState<D> {
    /// Polling station resolver
    pub resolver: Arc<Resolver<D>>,
}

impl<D> AppState<D> {
    /// Create a new app state.
    pub fn new(resolver: Resolver<D>) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

impl<D> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}
