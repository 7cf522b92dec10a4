// File: src/client/http.rs
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::ErrorResponse;
use crate::core::config::ClientConfig;
use crate::database::{MediaRecord, NewMedia};

/// Errors returned by [`CatalogClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached or the connection failed
    #[error("Could not reach the catalog server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// The server answered with a body that is not what the API returns
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

/// Client for the catalog HTTP API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self::with_client(base_url, Client::builder().build()?))
    }

    /// Create a client from configuration
    pub fn from_config(cfg: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self::with_client(cfg.base_url.clone(), client))
    }

    fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /media`
    pub async fn list_all(&self) -> Result<Vec<MediaRecord>, ClientError> {
        let response = self.client.get(self.url("/media")).send().await?;
        decode(check(response).await?).await
    }

    /// `GET /media/category/{category}`
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<MediaRecord>, ClientError> {
        let url = self.url_with_segment("/media/category", category)?;
        let response = self.client.get(url).send().await?;
        decode(check(response).await?).await
    }

    /// `GET /media/{id}`; `None` when the server knows no such id
    pub async fn get_by_id(&self, id: &str) -> Result<Option<MediaRecord>, ClientError> {
        let response = self.client.get(self.url_with_segment("/media", id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(check(response).await?).await.map(Some)
    }

    /// `GET /media/search?name=...`; `None` when nothing matches
    pub async fn search_by_name(&self, name: &str) -> Result<Option<MediaRecord>, ClientError> {
        let response = self
            .client
            .get(self.url("/media/search"))
            .query(&[("name", name)])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(check(response).await?).await.map(Some)
    }

    /// `POST /media`
    pub async fn add(&self, media: &NewMedia) -> Result<MediaRecord, ClientError> {
        let response = self
            .client
            .post(self.url("/media"))
            .json(media)
            .send()
            .await?;
        decode(check(response).await?).await
    }

    /// `DELETE /media/{id}`; `false` when the server knows no such id
    pub async fn delete(&self, id: &str) -> Result<bool, ClientError> {
        let response = self.client.delete(self.url_with_segment("/media", id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check(response).await?;
        Ok(true)
    }

    /// `path` followed by `segment`, percent-encoded as one path segment
    fn url_with_segment(&self, path: &str, segment: &str) -> Result<reqwest::Url, ClientError> {
        let mut url = reqwest::Url::parse(&self.url(path))
            .map_err(|e| ClientError::Decode(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Decode("invalid base url".to_string()))?
            .push(segment);
        Ok(url)
    }
}

/// Turn error statuses into `ClientError::Api`, using the body's `error` field when present
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    debug!("Catalog API returned {}: {}", status, body);

    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}
