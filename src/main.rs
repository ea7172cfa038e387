// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use realtime_token_relay::{api::router, config::Config, state::AppState, telemetry};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() {
    // A missing .env file is normal outside local development.
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(config.log_format, config.debug);

    if !config.api_key_configured() {
        tracing::warn!("OPENAI_API_KEY environment variable not set; /api/token will fail");
    }

    let addr = config.bind_address();
    tracing::info!(
        port = config.port,
        debug = config.debug,
        api_key_configured = config.api_key_configured(),
        model = %config.session.model,
        voice = %config.session.voice,
        "Starting server"
    );

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialise upstream client");
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    tracing::info!(address = %addr, "Listening (docs at /docs)");

    if let Err(e) = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "HTTP server failed");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
