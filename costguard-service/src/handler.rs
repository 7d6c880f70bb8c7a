use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use costguard_providers::{ComputeProvider, Notifier};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::app::AppState;

pub const STOP_WARNING_SUBJECT: &str = "EC2 Stop Warning. Free-tier Alert!";

/// Terminal outcome of one invocation. The operation never fails as a
/// function; both outcomes are values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationOutcome {
    pub status_code: u16,
    pub body: String,
}

/// The one operation this service exposes: warn the operator, then ask the
/// compute provider to stop the configured instance.
pub struct ShutdownNotifier {
    notifier: Arc<dyn Notifier>,
    compute: Arc<dyn ComputeProvider>,
    instance_id: String,
    channel: String,
}

impl ShutdownNotifier {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        compute: Arc<dyn ComputeProvider>,
        instance_id: String,
        channel: String,
    ) -> Self {
        Self {
            notifier,
            compute,
            instance_id,
            channel,
        }
    }

    /// Publish the stop warning, then request the stop.
    ///
    /// The warning goes out first so the operator hears about it even if the
    /// stop request fails. No retry and no compensation: a sent warning
    /// followed by a failed stop leaves the instance running.
    pub async fn handle(&self) -> InvocationOutcome {
        let invocation_id = Uuid::new_v4();
        info!(
            "[{}] invocation received for instance {}",
            invocation_id, self.instance_id
        );

        match self.run().await {
            Ok(()) => {
                let body = format!(
                    "Notification sent and instance {} stopped to avoid extra charges.",
                    self.instance_id
                );
                info!("[{}] {}", invocation_id, body);
                InvocationOutcome {
                    status_code: 200,
                    body,
                }
            }
            Err(e) => {
                let body = format!("Error stopping instance {}: {}", self.instance_id, e);
                error!("[{}] {}", invocation_id, body);
                InvocationOutcome {
                    status_code: 500,
                    body,
                }
            }
        }
    }

    async fn run(&self) -> anyhow::Result<()> {
        let message = format!(
            "Stopping instance {} to avoid extra charges.",
            self.instance_id
        );

        self.notifier
            .publish(&self.channel, STOP_WARNING_SUBJECT, &message)
            .await?;

        self.compute
            .stop_instances(std::slice::from_ref(&self.instance_id))
            .await?;

        Ok(())
    }
}

/// `POST /invoke` - the trigger payload is accepted and ignored.
pub async fn invoke(State(state): State<Arc<AppState>>, _payload: Bytes) -> impl IntoResponse {
    let outcome = state.shutdown.handle().await;
    let status =
        StatusCode::from_u16(outcome.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome))
}
