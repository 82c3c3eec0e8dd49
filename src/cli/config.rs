//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::constants::api::API_KEY_ENV;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "remote.language")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[defaults]");
    println!("backend = \"{}\"", config.defaults.backend);
    println!("max_results = {}", config.defaults.max_results);
    println!("format = \"{}\"", config.defaults.format);
    println!();

    println!("[remote]");
    println!("base_url = \"{}\"", config.remote.base_url);
    println!("language = \"{}\"", config.remote.language);
    println!("timeout_secs = {}", config.remote.timeout_secs);
    println!("detail = \"{}\"", config.remote.detail);
    println!();

    println!("[local]");
    println!("gazetteer = \"{}\"", config.local.gazetteer);
    println!("max_distance_m = {}", config.local.max_distance_m);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = \"{}\"", name, template);
    }
    println!();

    println!("[api_keys]");
    let from_env = std::env::var(API_KEY_ENV).is_ok_and(|key| !key.is_empty());
    if from_env {
        println!("google = \"***\" # from {}", API_KEY_ENV);
    } else if config.api_keys.google.is_empty() {
        println!("google = \"\" # not configured");
    } else {
        println!("google = \"***\" # configured");
    }
}
