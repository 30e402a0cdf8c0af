use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use loan_approval_server::config::{install_dir, Cli, Config};
use loan_approval_server::model::load_model;
use loan_approval_server::server::api::{build_router, AppState};
use loan_approval_server::service::PredictionService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging.
    let filter = if cli.verbose {
        "loan_approval_server=debug,tower_http=debug"
    } else {
        "loan_approval_server=info,tower_http=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }

    info!("loan-approval-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration.
    let base_dir = install_dir(&cli)?;
    let config = Config::load(&cli.config)?
        .merge_cli(&cli)
        .resolve_paths(&base_dir);

    info!(
        base_dir = %base_dir.display(),
        model = %config.model.model_path.display(),
        static_dir = %config.server.static_dir.display(),
        allowed_origin = config.server.allowed_origin,
        strict_client_errors = config.server.strict_client_errors,
        "Configuration loaded"
    );

    // A server without a model is never valid: fail before binding.
    let model = load_model(&config.model.model_path).with_context(|| {
        format!(
            "cannot start without a model (looked in {})",
            config.model.model_path.display()
        )
    })?;
    let service = PredictionService::new(Arc::new(model));

    // Build application state.
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(service, config.clone())?);

    // Build the HTTP router.
    let app = build_router(state).context("invalid allowed_origin")?;

    // Start the server.
    let listen_addr = config.server.listen.clone();
    info!(addr = listen_addr, "Starting server");

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Listening on {listen_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
