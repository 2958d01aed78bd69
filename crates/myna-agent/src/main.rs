mod configuration;
mod health;
mod pipeline;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use configuration::Settings;
use myna::room::livekit::LiveKitRoom;
use myna::room::RoomHandle;
use myna::session::{run_session, SessionOptions};
use pipeline::LoggingPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new()?;

    // The probe responder shares nothing with the agent besides process
    // lifetime.
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await?;
    info!("health check server listening on port {}", settings.port);
    let health_server = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, health::router()).await {
            error!(error = %err, "health server exited");
        }
    });

    let room: Arc<dyn RoomHandle> = Arc::new(LiveKitRoom::new(
        &settings.livekit_config(),
        &settings.livekit_room,
    ));
    let pipeline = LoggingPipeline::new();
    let options = SessionOptions {
        model: settings.myna_model.clone(),
        prompt_path: PathBuf::from(&settings.myna_prompt),
    };

    run_session(room, &pipeline, &options).await;

    // Keep answering liveness probes for the rest of the process lifetime.
    health_server.await?;
    Ok(())
}
