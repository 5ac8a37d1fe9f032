use std::sync::Arc;

use tracing::{info, warn};

use sculptor::assistant::{Assistant, GeminiClient};
use sculptor::catalog::seed_catalog;
use sculptor::config::Settings;
use sculptor::server::{AppState, app};
use sculptor::studio::Studio;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let settings = Settings::from_env()?;

    let client = GeminiClient::new(settings.api_key.clone(), settings.model.clone());
    if !client.has_key() {
        warn!("no GEMINI_API_KEY or API_KEY set; chat requests will get the fallback reply");
    }
    let assistant = Assistant::new(client).with_timeout(settings.timeout);

    let state = Arc::new(AppState {
        studio: Studio::new(assistant, seed_catalog()),
        preview_size: settings.preview_size,
        frontend: settings.frontend.clone(),
    });

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    info!(
        addr = %settings.addr,
        model = %settings.model,
        frontend = %settings.frontend.display(),
        "sculptor server listening"
    );
    axum::serve(listener, app(state)).await?;
    Ok(())
}
