//! geopin: tap a coordinate, get back addresses
//!
//! A library and CLI tool that reverse geocodes a map coordinate into a list
//! of candidate addresses and reports the lookup as an observable state:
//! `Idle`, then `Loading`, then `Success` or `Failed`.
//!
//! ## Features
//!
//! - Remote backend for the Google reverse geocoding API
//! - On-device backend behind the `DeviceGeocoder` trait, with an offline
//!   gazetteer implementation
//! - A resolver where newer taps supersede older ones
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use geopin::geocode::gazetteer::Gazetteer;
//! use geopin::geocode::local::{DeviceAddress, LocalBackend};
//! use geopin::{Coordinates, Resolver};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> geopin::Result<()> {
//! let station = DeviceAddress {
//!     address_lines: vec!["Suwon Station".to_string()],
//!     latitude: 37.2659,
//!     longitude: 127.0001,
//!     ..Default::default()
//! };
//! let backend = LocalBackend::new(Gazetteer::new(vec![station], 500.0));
//!
//! let resolver = Resolver::new(backend);
//! let mut updates = resolver.subscribe();
//! resolver.on_tap_coordinate(Coordinates::new(37.2660, 127.0002))?;
//!
//! if let Some(state) = updates.next_terminal().await {
//!     for record in state.records().unwrap_or_default() {
//!         println!("{} at {}", record.title(), record.location());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geocode;
pub mod resolver;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geocode::{AddressRecord, GeocodeProvider};
pub use resolver::{ResolutionState, Resolver};
