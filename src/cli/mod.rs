//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod backends;
pub mod config;
pub mod resolve;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Reverse geocoder: turn a tapped coordinate into candidate addresses
#[derive(Parser)]
#[command(name = "geopin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a coordinate to addresses
    Resolve(resolve::ResolveArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// List geocoding backends
    Backends(backends::BackendsArgs),
}

/// Install the tracing subscriber on stderr
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => resolve::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Backends(args) => backends::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "geopin", "resolve", "--lat", "37.2586646", "--lng", "127.0563327", "-b", "local",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.lat, Some(37.2586646));
                assert_eq!(args.lng, Some(127.0563327));
                assert_eq!(args.backend.as_deref(), Some("local"));
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["geopin", "resolve", "--lat=-33.8688", "--lng=151.2093"]).unwrap();

        match cli.command {
            Commands::Resolve(args) => assert_eq!(args.lat, Some(-33.8688)),
            _ => panic!("expected resolve"),
        }
    }
}
