//! Resolve command handler
//!
//! Reverse geocodes one coordinate and prints the outcome.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geocode::{available_backends, get_backend, GeocodeProvider};
use crate::resolver::{ResolutionState, Resolver};
use clap::Args;
use tracing::debug;

/// Resolve command arguments
#[derive(Args)]
pub struct ResolveArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Geocoding backend
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Maximum number of candidate addresses
    #[arg(long, short = 'n')]
    pub max_results: Option<usize>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Response language (remote backend)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available backends
    #[arg(short = 'B', long = "list-backends")]
    pub list_backends: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the resolve command
pub async fn run(args: ResolveArgs) -> Result<()> {
    if args.list_backends {
        list_backends();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    super::init_logging("warn");

    let mut config = Config::load()?;

    let coordinate = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
        _ => {
            eprintln!("Error: No location specified. Use --lat and --lng");
            std::process::exit(1);
        }
    };
    coordinate.validate()?;

    if let Some(language) = args.language {
        config.remote.language = language;
    }
    let backend_name = args.backend.unwrap_or(config.defaults.backend.clone());
    let max_results = args.max_results.unwrap_or(config.defaults.max_results);
    let format = args.format.unwrap_or(config.defaults.format.clone());

    // Fail on a bad format before spending a lookup on it
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let backend = get_backend(&backend_name, &config)?;
    debug!(backend = backend.name(), max_results, "Backend ready");

    let resolver = Resolver::with_max_results(backend, max_results);
    let mut updates = resolver.subscribe();
    resolver.on_tap_coordinate(coordinate)?;

    let state = loop {
        match updates.recv().await {
            Some(ResolutionState::Loading) => {
                eprintln!("Resolving {} with {}...", coordinate, backend_name);
            }
            Some(state) if state.is_terminal() => break state,
            Some(_) => {}
            None => return Err(Error::Server("Resolver stopped unexpectedly".to_string())),
        }
    };

    if let ResolutionState::Failed { reason } = &state {
        eprintln!("{}", reason);
        std::process::exit(1);
    }

    let output = formatter.format(coordinate, &state, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Print available backends
fn list_backends() {
    println!("Available backends:");
    for backend in available_backends() {
        println!("  {:6} - {}", backend.name, backend.description);
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
