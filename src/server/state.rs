//! Server shared state
//!
//! Holds configuration and the resolver every request drives.

use crate::config::Config;
use crate::error::Result;
use crate::geocode::{get_backend, Backend, GeocodeProvider};
use crate::resolver::Resolver;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// The single resolver all taps go through
    pub resolver: Resolver<Backend>,

    started: Instant,
}

impl AppState {
    /// Create application state with the backend named in `defaults.backend`
    pub fn new(config: Config) -> Result<Self> {
        let backend = get_backend(&config.defaults.backend, &config)?;
        Ok(Self::with_backend(config, backend))
    }

    /// Create application state around an already built backend
    pub fn with_backend(config: Config, backend: Backend) -> Self {
        let resolver = Resolver::with_max_results(backend, config.defaults.max_results);
        Self {
            config,
            resolver,
            started: Instant::now(),
        }
    }

    /// Name of the backend taps are resolved with
    pub fn backend_name(&self) -> &'static str {
        self.resolver.provider().name()
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
