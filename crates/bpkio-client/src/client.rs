//! HTTP plumbing shared by every endpoint

use crate::error::{ClientError, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use url::Url;

/// Default public API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.broadpeak.io";

/// Page size used when listing collections
pub const PAGE_LIMIT: u32 = 2000;

/// Connection settings for [`Client`]
#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// broadpeak.io API client
///
/// Cheap to share: one instance is built when the provider is configured
/// and handed to every resource behind an `Arc`.
pub struct Client {
    http: reqwest::Client,
    base: Url,
    api_key: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Builds a client on top of an existing `reqwest::Client`
    pub fn with_http(http: reqwest::Client, config: ClientConfig) -> Result<Self> {
        let mut base = Url::parse(&config.endpoint).map_err(|e| ClientError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint {
                endpoint: config.endpoint,
                message: "not a base URL".to_string(),
            });
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http,
            base,
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::InvalidEndpoint {
                endpoint: self.base.to_string(),
                message: e.to_string(),
            })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!(%method, %url, "API request");
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// Sends the request and maps non-2xx answers to errors
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                resource: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        Ok(body)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(self.request(Method::GET, path)?, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<T>> {
        let request = self
            .request(Method::GET, path)?
            .query(&[("offset", offset), ("limit", limit)]);
        let body = self.send(request, path).await?;
        let page: Option<Vec<T>> = serde_json::from_str(&body)?;
        Ok(page.unwrap_or_default())
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(Method::POST, path)?.json(body);
        let body = self.send(request, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(Method::PUT, path)?.json(body);
        let body = self.send(request, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)?, path).await?;
        Ok(())
    }
}

/// Reads an explicit `null` as the type's default, like a missing key
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Extracts a readable message from an error body.
///
/// The API answers `{"message": "..."}` or, for validation failures,
/// `{"message": ["...", "..."]}`.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("message").or_else(|| value.get("error")) {
            Some(serde_json::Value::String(message)) => return message.clone(),
            Some(serde_json::Value::Array(items)) => {
                let messages: Vec<&str> = items.iter().filter_map(|m| m.as_str()).collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string()
    } else {
        body.to_string()
    }
}
