use anyhow::Result;
use async_trait::async_trait;

pub mod compute;
pub mod mock;
pub mod notify;

pub use compute::HttpCompute;
pub use mock::{CallLog, CallRecord, MockCompute, MockNotifier};
pub use notify::HttpNotifier;

#[async_trait]
pub trait ComputeProvider: Send + Sync {
    /// Request a stop for every instance in the list.
    ///
    /// Returns once the provider has accepted the request. Callers must not
    /// assume the instances have reached a stopped state.
    async fn stop_instances(&self, instance_ids: &[String]) -> Result<()>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish a message with the given subject to a channel reference.
    ///
    /// Success means the channel accepted the request, not that the message
    /// was delivered.
    async fn publish(&self, channel: &str, subject: &str, message: &str) -> Result<()>;
}
