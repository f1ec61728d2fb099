//! Entry point for the `laos` command.

use laos_cli::command::{self, USAGE};
use laos_cli::error::CliError;
use laos_client::{ClientConfig, HttpSession, Routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let invocation = match command::parse(std::env::args().skip(1)) {
        Ok(inv) => inv,
        Err(CliError::Usage(msg)) => {
            eprintln!("error: {msg}\n\n{USAGE}");
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let config = match ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };
    config.log_startup();

    let session = HttpSession::from_config(&config);
    let routes = Routes::with_resolver(session, config.project_id.clone());

    match command::run(&routes, invocation).await {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to render response");
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "request failed");
            std::process::exit(1);
        }
    }
}
