//! Chatlog CLI and HTTP API entry point.
//!
//! Binary name: `chatlog`
//!
//! Parses CLI arguments, loads configuration, initializes the database and
//! services, then dispatches to a command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatlog_infra::config::{load_global_config, resolve_data_dir};
use chatlog_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions need neither config nor state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatlog", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = load_global_config(&data_dir).await;

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,chatlog_api=info",
        1 => "info,chatlog_core=debug,chatlog_infra=debug,chatlog_api=debug",
        _ => "trace",
    };
    init_tracing(filter, config.telemetry.otel_stdout)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let state = AppState::init(&data_dir, &config).await?;

    let result = run(cli, state, &config).await;
    shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    state: AppState,
    config: &chatlog_types::config::GlobalConfig,
) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, "HTTP API listening");
            if !cli.quiet {
                println!(
                    "  {} Chatlog API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Conversations => {
            cli::conversation::list_conversations(&state, cli.json).await?;
        }

        Commands::Messages { conversation_id } => {
            cli::conversation::show_messages(&state, &conversation_id, cli.json).await?;
        }

        Commands::Send { text, conversation } => {
            cli::conversation::send(&state, &text, conversation.as_deref(), cli.json, cli.quiet)
                .await?;
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
