use std::sync::Arc;

use costguard_providers::{ComputeProvider, HttpCompute, HttpNotifier, Notifier};
use costguard_service::app::{create_cors, create_router, AppState};
use costguard_service::config::GuardConfig;
use costguard_service::handler::ShutdownNotifier;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = GuardConfig::from_env()?;

    let notifier: Arc<dyn Notifier> = Arc::new(HttpNotifier::new(config.notify_token.clone()));
    let compute: Arc<dyn ComputeProvider> = Arc::new(HttpCompute::new(
        config.compute_api_base.clone(),
        config.compute_api_token.clone(),
    ));
    let shutdown = ShutdownNotifier::new(
        notifier,
        compute,
        config.instance_id.clone(),
        config.notification_channel.clone(),
    );

    let state = Arc::new(AppState::new(shutdown));
    let app = create_router(state).layer(create_cors());

    info!(
        "costguard listening on {} (instance {})",
        config.bind_addr, config.instance_id
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
