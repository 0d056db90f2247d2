//! Shared test doubles for the delivery channel seams.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{MessageStore, StoreError, StoreRecord};
use crate::webhook::{DeliveryError, OutboundDelivery, WebhookPayload};

/// Records every webhook payload it is asked to deliver.
#[derive(Default)]
pub struct RecordingDelivery {
    pub payloads: Mutex<Vec<WebhookPayload>>,
}

#[async_trait]
impl OutboundDelivery for RecordingDelivery {
    async fn deliver(&self, payload: WebhookPayload) -> Result<(), DeliveryError> {
        self.payloads.lock().unwrap().push(payload);
        Ok(())
    }
}

/// Fails every delivery with an API error.
pub struct FailingDelivery;

#[async_trait]
impl OutboundDelivery for FailingDelivery {
    async fn deliver(&self, _payload: WebhookPayload) -> Result<(), DeliveryError> {
        Err(DeliveryError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        })
    }
}

/// Records every store record appended.
#[derive(Default)]
pub struct RecordingStore {
    pub records: Mutex<Vec<StoreRecord>>,
}

#[async_trait]
impl MessageStore for RecordingStore {
    async fn append(&self, record: StoreRecord) -> Result<(), StoreError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

/// Fails every append with an API error.
pub struct FailingStore;

#[async_trait]
impl MessageStore for FailingStore {
    async fn append(&self, _record: StoreRecord) -> Result<(), StoreError> {
        Err(StoreError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}
