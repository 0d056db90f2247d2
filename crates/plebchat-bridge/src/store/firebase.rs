//! Firebase Realtime Database REST adapter.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{MessageStore, StoreError, StoreRecord};

/// Name of the collection the chat app reads from.
const COLLECTION: &str = "messages";

/// Append-only store adapter over the Realtime Database REST surface.
///
/// The HTTP client is process-scoped and injected at startup; its request
/// timeout bounds the append call.
pub struct FirebaseStore {
    client: Client,
    database_url: Url,
    auth_token: Option<String>,
}

impl FirebaseStore {
    pub fn new(client: Client, database_url: Url, auth_token: Option<String>) -> Self {
        Self {
            client,
            database_url,
            auth_token,
        }
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/{}.json",
            self.database_url.as_str().trim_end_matches('/'),
            COLLECTION
        )
    }
}

#[async_trait]
impl MessageStore for FirebaseStore {
    async fn append(&self, record: StoreRecord) -> Result<(), StoreError> {
        let mut request = self.client.post(self.collection_url()).json(&record);
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, message });
        }

        Ok(())
    }
}
