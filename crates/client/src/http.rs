//! HTTP client and JSON envelope handling.
//!
//! Every call reads the bearer token from the token store, sends one
//! request, and unwraps the `{ "data": ... }` envelope of the response. There
//! is no retry and no caching.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::timing::RequestTimer;
use crate::token::TokenStore;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

/// Successful response body.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error response body. Backends put the text under either key.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Creates the underlying reqwest client.
pub fn create_client(config: &HttpConfig) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?)
}

/// Shared HTTP client bound to one backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &HttpConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        Ok(Self {
            client: create_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attaches the bearer token, read fresh from the store.
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        Ok(match self.tokens.token()? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send("GET", path, request).await?;
        decode(response).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self.client.post(self.url(path)).json(body);
        let response = self.send("POST", path, request).await?;
        decode(response).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self.client.put(self.url(path)).json(body);
        let response = self.send("PUT", path, request).await?;
        decode(response).await
    }

    /// Sends a DELETE. Any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.client.delete(self.url(path));
        self.send("DELETE", path, request).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let request = self.authorize(request)?;
        let timer = RequestTimer::new(method, path);
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                timer.finish(None);
                return Err(ClientError::Http(e));
            }
        };

        let status = response.status();
        timer.finish(Some(status.as_u16()));

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthenticated);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .unwrap_or_default()
                .into_message();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let text = response.text().await?;
    serde_json::from_str::<Envelope<T>>(&text)
        .map(|envelope| envelope.data)
        .map_err(|e| ClientError::Decode(e.to_string()))
}
