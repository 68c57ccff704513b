//! Tally Dashboard Server
//!
//! Serves the interactive sales dashboard, the metrics API and the CSV
//! exports over HTTP. Every request reads the store afresh.

use std::process;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info};

use tally_app::{context::AppContext, observability::init_logging};

use crate::{config::DashboardConfig, router::app_router, state::State};

mod config;
mod errors;
mod extensions;
mod handlers;
mod healthcheck;
mod router;
mod shutdown;
mod state;
mod templates;
#[cfg(test)]
mod test_helpers;

/// Tally dashboard entry point
#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = DashboardConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = init_logging(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    if config.analysis.top == 0 {
        error!("--top must be at least 1");

        process::exit(1);
    }

    let app = match AppContext::from_database_url(&config.database.database_url) {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let templates = match templates::environment() {
        Ok(templates) => templates,
        Err(template_error) => {
            error!("failed to load templates: {template_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting dashboard on http://{addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::shared(app, config.analysis.top, templates)))
        .push(app_router());

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
