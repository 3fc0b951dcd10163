use std::sync::{Arc, Mutex};

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use rowsift::error::{Result, RowsiftError};
use rowsift::server;
use rowsift::session::Session;
use rowsift::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let settings = Settings::load()?;
    info!(
        address = %settings.server.address,
        port = settings.server.port,
        preview_rows = settings.preview_rows,
        "startup"
    );

    let session = Arc::new(Mutex::new(Session::new()));
    let app = server::router(Arc::clone(&session), settings.preview_rows);

    let listener = tokio::net::TcpListener::bind((
        settings.server.address.as_str(),
        settings.server.port,
    ))
    .await
    .map_err(|e| RowsiftError::Server(format!("cannot bind: {e}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| RowsiftError::Server(e.to_string()))?;
    Ok(())
}
