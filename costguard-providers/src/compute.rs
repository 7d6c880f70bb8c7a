use crate::ComputeProvider;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};

/// Compute collaborator for instance APIs that expose a `poweroff` action
/// endpoint per server.
pub struct HttpCompute {
    client: Client,
    api_base: String,
    api_token: String,
}

impl HttpCompute {
    pub fn new(api_base: String, api_token: String) -> Self {
        // Default reqwest client has no overall timeout. If the provider
        // stalls, an invocation would hang forever.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap();
        let api_base = api_base.trim().trim_end_matches('/').to_string();
        let api_token = api_token.trim().to_string();
        Self {
            client,
            api_base,
            api_token,
        }
    }

    fn headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "X-Auth-Token",
            reqwest::header::HeaderValue::from_str(&self.api_token).unwrap(),
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers
    }
}

#[async_trait]
impl ComputeProvider for HttpCompute {
    async fn stop_instances(&self, instance_ids: &[String]) -> Result<()> {
        for instance_id in instance_ids {
            let url = format!("{}/servers/{}/action", self.api_base, instance_id);
            let body = json!({ "action": "poweroff" });

            info!(
                "POST {} - requesting poweroff for instance {}",
                url, instance_id
            );

            let resp = self
                .client
                .post(&url)
                .headers(self.headers())
                .json(&body)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                error!(
                    "POST {} failed: status={} body={}",
                    url,
                    status.as_u16(),
                    error_text
                );
                return Err(anyhow::anyhow!(
                    "poweroff failed for instance {}: status={} body={}",
                    instance_id,
                    status.as_u16(),
                    error_text
                ));
            }

            // The request is acknowledged at this point; the instance
            // transitions to stopped on the provider's own schedule.
            info!("POST {} accepted: status={}", url, status.as_u16());
        }

        Ok(())
    }
}
