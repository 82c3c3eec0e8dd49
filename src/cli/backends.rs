//! Backends command handler
//!
//! Lists geocoding backends and, optionally, what a running server uses.

use crate::config::Config;
use crate::error::Result;
use crate::geocode::available_backends;
use clap::Args;

/// Backends command arguments
#[derive(Args)]
pub struct BackendsArgs {
    /// Also check whether the server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the backends command
pub async fn run(args: BackendsArgs) -> Result<()> {
    let config = Config::load()?;

    println!("geopin v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Backends:");
    for backend in available_backends() {
        let marker = if backend.name == config.defaults.backend {
            "*"
        } else {
            " "
        };
        println!("{} {:6} - {}", marker, backend.name, backend.description);
    }
    println!();

    let key_status = if config.api_key().is_some() {
        "configured"
    } else {
        "not configured"
    };
    println!("Google API key: {}", key_status);

    if args.server {
        println!();
        check_server_status(&config).await;
    }

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(status) = response.json::<serde_json::Value>().await {
                    if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                        println!("  Version: {}", version);
                    }
                    if let Some(backend) = status.get("backend").and_then(|v| v.as_str()) {
                        println!("  Backend: {}", backend);
                    }
                    if let Some(state) = status.get("state").and_then(|v| v.as_str()) {
                        println!("  State:   {}", state);
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
}
