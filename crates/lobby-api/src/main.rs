//! Lobby CLI and REST API entry point.
//!
//! Binary name: `lobby`
//!
//! Parses CLI arguments, loads configuration, opens the database and wires
//! services, then runs the requested command or serves the HTTP API
//! alongside the presence sweep.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    lobby_observe::tracing_setup::init_tracing(cli.log_directive(), cli.otel)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize tracing")?;

    let config = lobby_infra::config::load_config(&cli.config).await;
    let config = cli.apply_overrides(config);

    let state = AppState::init(config).await?;

    let result = run(&cli, state).await;
    lobby_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: &Cli, state: AppState) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Serve { .. } => serve(state, cli.quiet).await?,
        Commands::Participants => {
            cli::participant::list_participants(&state, cli.json).await?;
        }
        Commands::Messages { viewer, limit } => {
            cli::message::list_messages(&state, viewer, *limit, cli.json).await?;
        }
        Commands::Sweep => {
            cli::sweep::run_sweep(&state, cli.json).await?;
        }
    }
    Ok(())
}

async fn serve(state: AppState, quiet: bool) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    if !quiet {
        println!(
            "  {} Lobby listening on {}",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan()
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let cancel = CancellationToken::new();
    let sweep = state.sweep_scheduler().spawn(cancel.clone());

    let router = http::router::build_router(state);
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    cancel.cancel();
    if let Err(e) = sweep.await {
        tracing::warn!(error = %e, "sweep task ended abnormally");
    }

    served.context("HTTP server error")?;

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
