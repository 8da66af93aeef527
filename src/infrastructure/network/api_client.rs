use crate::application::ports::ReplayTransport;
use crate::domain::entities::{PendingDocument, PendingTrip};
use crate::shared::config::BackendConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

const IDEMPOTENCY_HEADER: &str = "X-Idempotency-Key";

/// Backend replay client. Trips go out as a JSON POST, documents as a
/// multipart upload carrying the blob plus its JSON metadata; both carry
/// the entry's idempotency key so duplicate replays are harmless.
pub struct ApiClient {
    client: Client,
    trips_url: String,
    documents_url: String,
}

impl ApiClient {
    pub fn new(client: Client, backend: &BackendConfig) -> Self {
        let base = backend.api_base.trim_end_matches('/');
        Self {
            client,
            trips_url: format!("{base}{}", backend.trips_path),
            documents_url: format!("{base}{}", backend.documents_path),
        }
    }
}

#[async_trait]
impl ReplayTransport for ApiClient {
    async fn submit_trip(&self, trip: &PendingTrip) -> Result<(), AppError> {
        let response = self
            .client
            .post(&self.trips_url)
            .header(IDEMPOTENCY_HEADER, &trip.local_id)
            .json(&trip.payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Trip replay rejected with status {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn upload_document(&self, document: &PendingDocument) -> Result<(), AppError> {
        let metadata = serde_json::to_string(&document.metadata)?;
        let file = Part::bytes(document.content.to_vec())
            .file_name(document.file_name.clone())
            .mime_str(&document.mime_type)?;
        let form = Form::new().part("file", file).text("metadata", metadata);

        let response = self
            .client
            .post(&self.documents_url)
            .header(IDEMPOTENCY_HEADER, &document.local_id)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Document replay rejected with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
