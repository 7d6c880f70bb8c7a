use crate::{ComputeProvider, Notifier};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallRecord {
    Publish {
        channel: String,
        subject: String,
        message: String,
    },
    StopInstances {
        instance_ids: Vec<String>,
    },
}

/// Ordered log shared between mock collaborators, so tests can assert
/// ordering across both of them (warning published before the stop request).
#[derive(Debug, Default, Clone)]
pub struct CallLog {
    records: Arc<Mutex<Vec<CallRecord>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, record: CallRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn records(&self) -> Vec<CallRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn publish_count(&self) -> usize {
        self.records()
            .iter()
            .filter(|r| matches!(r, CallRecord::Publish { .. }))
            .count()
    }

    pub fn stop_count(&self) -> usize {
        self.records()
            .iter()
            .filter(|r| matches!(r, CallRecord::StopInstances { .. }))
            .count()
    }
}

/// Notifier double. A failing instance returns its error without recording
/// the call as accepted.
pub struct MockNotifier {
    log: CallLog,
    fail: Option<String>,
}

impl MockNotifier {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail: None }
    }

    pub fn failing(log: CallLog, error: impl Into<String>) -> Self {
        Self {
            log,
            fail: Some(error.into()),
        }
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn publish(&self, channel: &str, subject: &str, message: &str) -> Result<()> {
        if let Some(error) = &self.fail {
            return Err(anyhow!("{}", error));
        }
        self.log.push(CallRecord::Publish {
            channel: channel.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

/// Compute double, same contract as [`MockNotifier`].
pub struct MockCompute {
    log: CallLog,
    fail: Option<String>,
}

impl MockCompute {
    pub fn new(log: CallLog) -> Self {
        Self { log, fail: None }
    }

    pub fn failing(log: CallLog, error: impl Into<String>) -> Self {
        Self {
            log,
            fail: Some(error.into()),
        }
    }
}

#[async_trait]
impl ComputeProvider for MockCompute {
    async fn stop_instances(&self, instance_ids: &[String]) -> Result<()> {
        if let Some(error) = &self.fail {
            return Err(anyhow!("{}", error));
        }
        self.log.push(CallRecord::StopInstances {
            instance_ids: instance_ids.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_preserves_cross_collaborator_order() {
        let log = CallLog::new();
        let notifier = MockNotifier::new(log.clone());
        let compute = MockCompute::new(log.clone());

        notifier
            .publish("chan-1", "subject", "message")
            .await
            .unwrap();
        compute
            .stop_instances(&["srv-1".to_string()])
            .await
            .unwrap();

        let records = log.records();
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0], CallRecord::Publish { .. }));
        assert!(matches!(records[1], CallRecord::StopInstances { .. }));
    }

    #[tokio::test]
    async fn failing_mocks_record_nothing() {
        let log = CallLog::new();
        let notifier = MockNotifier::failing(log.clone(), "publish rejected");
        let compute = MockCompute::failing(log.clone(), "stop rejected");

        let err = notifier
            .publish("chan-1", "subject", "message")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "publish rejected");

        let err = compute
            .stop_instances(&["srv-1".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "stop rejected");

        assert!(log.records().is_empty());
    }
}
