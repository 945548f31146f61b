//! Low-level REST client for the record-storage service.

use crate::config::ClientConfig;
use crate::error::ClientError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Structured error body returned by the record service on failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let headers = build_headers(config)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub async fn get_json<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;
        self.parse_response(response).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;
        self.parse_response(response).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "PUT");
        let response = self
            .client
            .put(url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;
        self.parse_response(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "DELETE");
        let response = self
            .client
            .delete(url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.error_from(response).await)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Err(self.error_from(response).await)
        }
    }

    async fn error_from(&self, response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return ClientError::Http(err),
        };
        if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
            return ClientError::Status {
                status,
                message: format!("{}: {}", body.code, body.message),
            };
        }
        ClientError::Status {
            status,
            message: text,
        }
    }
}

fn build_headers(config: &ClientConfig) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    let project = HeaderValue::from_str(&config.project_id)
        .map_err(|_| ClientError::Config("project_id is not a valid header value".to_string()))?;
    headers.insert("x-project-id", project);
    let auth = HeaderValue::from_str(&format!("Bearer {}", config.public_key))
        .map_err(|_| ClientError::Config("public_key is not a valid header value".to_string()))?;
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}
