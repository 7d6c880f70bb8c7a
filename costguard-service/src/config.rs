use anyhow::{Context, Result};

/// Runtime configuration, read once at startup and injected into the
/// handler. Both references are opaque to this service; the deployer is
/// responsible for substituting real values.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Instance reference in the compute provider's inventory.
    pub instance_id: String,
    /// Notification channel reference (endpoint URL).
    pub notification_channel: String,
    /// Optional bearer token for the notification channel.
    pub notify_token: Option<String>,
    /// Base URL of the compute instance API.
    pub compute_api_base: String,
    /// Auth token for the compute instance API.
    pub compute_api_token: String,
    pub bind_addr: String,
}

impl GuardConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let instance_id = std::env::var("INSTANCE_ID").context("INSTANCE_ID must be set")?;
        let notification_channel =
            std::env::var("NOTIFICATION_CHANNEL").context("NOTIFICATION_CHANNEL must be set")?;
        let notify_token = std::env::var("NOTIFY_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let compute_api_base =
            std::env::var("COMPUTE_API_BASE").context("COMPUTE_API_BASE must be set")?;
        let compute_api_token =
            std::env::var("COMPUTE_API_TOKEN").context("COMPUTE_API_TOKEN must be set")?;
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Self {
            instance_id: instance_id.trim().to_string(),
            notification_channel: notification_channel.trim().to_string(),
            notify_token,
            compute_api_base,
            compute_api_token,
            bind_addr,
        })
    }
}
