//! sdp-api - command-line access to the ServiceDesk Plus v3 API
//!
//! Sends a single raw request and prints the JSON response, or checks
//! connectivity when run without arguments.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `SDP_BASE_URL`: Base URL of your ServiceDesk Plus instance
//! - `SDP_API_KEY`: Technician API key for authentication
//! - `SDP_TIMEOUT_SECS`: Optional transport timeout (default 30)
//!
//! # Usage
//!
//! ```bash
//! # Connection test
//! ./sdp-api
//!
//! # GET requests/42
//! ./sdp-api GET requests/42
//!
//! # PUT with input_data
//! ./sdp-api PUT requests/42/assign '{"request": {"group": {"name": "Ops"}}}'
//! ```

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use sdp_api::{Config, SdpClient};

const USAGE: &str = "usage: sdp-api [<GET|POST|PUT|DELETE> <endpoint> [input_data JSON]]";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout carries the JSON response; logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sdp_api=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!("Configuration loaded, base_url: {}", config.base_url);

    let client = SdpClient::new(&config).context("Failed to create SDP client")?;

    match args.as_slice() {
        [] => {
            tracing::info!("Testing connection to ServiceDesk Plus...");
            client
                .test_connection()
                .await
                .context("Connection test failed")?;
            println!("ok");
        }
        [method, endpoint, rest @ ..] if rest.len() <= 1 => {
            let payload = rest
                .first()
                .map(|raw| serde_json::from_str::<serde_json::Value>(raw))
                .transpose()
                .context("input_data is not valid JSON")?;

            let response = client
                .send_raw(endpoint, method, payload.as_ref())
                .await
                .map_err(|e| {
                    let message = e.sanitized_display(client.api_key_for_sanitization());
                    tracing::error!(error = %message, "Request failed");
                    anyhow::anyhow!(message)
                })?;

            println!(
                "{}",
                serde_json::to_string_pretty(&response).context("Failed to format response")?
            );
        }
        _ => bail!(USAGE),
    }

    Ok(())
}
