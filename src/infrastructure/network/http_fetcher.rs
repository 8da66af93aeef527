use crate::application::ports::PageFetcher;
use crate::domain::entities::CachedResponse;
use crate::domain::value_objects::{PageRequest, RequestMethod};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;

/// reqwest-backed page fetcher. A transport-level failure (offline, DNS)
/// maps to `AppError::Network`; any HTTP status is a normal response.
pub struct ReqwestPageFetcher {
    client: Client,
}

impl ReqwestPageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestPageFetcher {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

fn to_reqwest_method(method: RequestMethod) -> reqwest::Method {
    match method {
        RequestMethod::Get => reqwest::Method::GET,
        RequestMethod::Head => reqwest::Method::HEAD,
        RequestMethod::Post => reqwest::Method::POST,
        RequestMethod::Put => reqwest::Method::PUT,
        RequestMethod::Patch => reqwest::Method::PATCH,
        RequestMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<CachedResponse, AppError> {
        let response = self
            .client
            .request(to_reqwest_method(request.method), request.url.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.bytes().await?;

        Ok(CachedResponse::new(
            status,
            headers,
            body,
            Utc::now().timestamp(),
        ))
    }
}
