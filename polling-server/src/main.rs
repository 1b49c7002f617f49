use std::process::ExitCode;

use polling_server::config::{DirectorySource, ServerConfig};
use polling_server::directory::{
    CachedDirectory, InMemoryDirectory, StationDirectory, SupabaseDirectory,
};
use polling_server::resolver::Resolver;
use polling_server::telemetry;
use polling_server::web::{AppState, create_router};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init(&config.log_filter) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), BoxError> {
    match config.source.clone() {
        DirectorySource::File(path) => {
            let directory = InMemoryDirectory::from_json_file(&path)?;
            tracing::info!(
                path = %path.display(),
                stations = directory.len(),
                with_coordinates = directory.eligible_count(),
                "loaded polling stations"
            );
            serve(&config, directory).await
        }
        DirectorySource::Supabase(directory_config) => {
            tracing::info!(
                url = %directory_config.base_url,
                table = %directory_config.table,
                "using Supabase station directory"
            );
            serve(&config, SupabaseDirectory::new(directory_config)?).await
        }
    }
}

async fn serve<D>(config: &ServerConfig, directory: D) -> Result<(), BoxError>
where
    D: StationDirectory + 'static,
{
    let directory = CachedDirectory::new(directory, &config.cache);
    let state = AppState::new(Resolver::new(directory));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "polling station finder listening");
    tracing::info!("  GET /health             - Health check");
    tracing::info!("  GET /api/search?q=...   - Find a polling station");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
