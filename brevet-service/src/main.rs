use anyhow::Context;
use brevet_core::config::CoreConfig;
use brevet_core::logging;
use brevet_service::{ServiceApiBuilder, ServiceConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let core = CoreConfig::from_env().context("failed to load brevet configuration")?;

    if let Err(err) = logging::init_tracing(core.log_level()) {
        eprintln!("⚠️ failed to initialise tracing: {err}");
    }

    let config = ServiceConfig::from(&core);
    let app = ServiceApiBuilder::new(&config).into_router();

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .context("failed to bind TCP listener")?;
    let actual_addr = listener
        .local_addr()
        .context("failed to read socket address")?;
    info!(%actual_addr, node = %core.node_name, "starting brevet-service");

    if let Err(err) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(?err, "brevet-service terminated with error");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sigterm) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
