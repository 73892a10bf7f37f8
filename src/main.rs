use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pubtrack::{router, AppState, Settings};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env();
    let bind_addr = settings.bind_addr.clone();
    info!(institution = %settings.institution, "loaded settings");

    let app = router(AppState::new(settings));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Server is running on http://{}", bind_addr);
    axum::serve(listener, app).await
}
