pub mod adoption;
pub mod api;
pub mod auth;
pub mod authorization;
pub mod booking;
pub mod cache;
pub mod config;
pub mod core_state;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod inference;
pub mod models;
pub mod prediction;
pub mod router;
pub mod session;
pub mod shell;
pub mod views;

#[cfg(test)]
mod test_support;

use std::io;

use tracing_subscriber::EnvFilter;

pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let client_config = config::ClientConfig::from_env();
    let mut state = match core_state::CoreState::from_config(&client_config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP clients");
            return;
        }
    };

    let stdin = io::stdin();
    let mut shell = shell::Shell::new(stdin.lock(), io::stdout());
    if let Err(e) = shell.run(&mut state) {
        tracing::error!(error = %e, "Terminal I/O failed");
    }
}
