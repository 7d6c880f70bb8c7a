use crate::Notifier;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};

/// Notification collaborator: posts subject + message as JSON to the channel
/// endpoint, with an optional bearer token.
pub struct HttpNotifier {
    client: Client,
    bearer_token: Option<String>,
}

impl HttpNotifier {
    pub fn new(bearer_token: Option<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap();
        let bearer_token = bearer_token
            .as_deref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        Self {
            client,
            bearer_token,
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn publish(&self, channel: &str, subject: &str, message: &str) -> Result<()> {
        let body = json!({ "subject": subject, "message": message });

        info!("POST {} - publishing \"{}\"", channel, subject);

        let mut req = self.client.post(channel).json(&body);
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            error!(
                "POST {} failed: status={} body={}",
                channel,
                status.as_u16(),
                error_text
            );
            return Err(anyhow::anyhow!(
                "publish to channel {} failed: status={} body={}",
                channel,
                status.as_u16(),
                error_text
            ));
        }

        info!("POST {} accepted: status={}", channel, status.as_u16());
        Ok(())
    }
}
