// Async HTTP client for the VitalWatch REST API.
//
// Base path: configurable, e.g. https://host/api/v1
// Auth: `Authorization: Bearer <token>` when the token source yields one
// Bodies: `{status, message, data}` envelope unless the endpoint is Bare

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::TokenSource;
use crate::endpoint::{Endpoint, ResponseShape};
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Wire envelopes ───────────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// A decoded success body.
///
/// `message` carries the envelope's server message; it is always `None`
/// for bare endpoints.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the VitalWatch backend.
///
/// Cheap to clone: the underlying `reqwest::Client` and token source are
/// both reference-counted.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL and transport settings.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(base_url, http, tokens)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        base_url: &str,
        http: reqwest::Client,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve an endpoint against the base URL, percent-encoding each
    /// path argument as a single segment.
    pub fn url_for(&self, endpoint: &Endpoint, args: &[&str]) -> Result<Url, Error> {
        let segments = endpoint.segments(args)?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Requests ─────────────────────────────────────────────────────

    fn request(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        query: &[(&str, String)],
    ) -> Result<reqwest::RequestBuilder, Error> {
        let url = self.url_for(endpoint, args)?;
        if query.is_empty() {
            debug!("{} {url}", endpoint.method);
        } else {
            debug!("{} {url} params={query:?}", endpoint.method);
        }

        let mut req = self.http.request(endpoint.method.as_reqwest(), url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = self.tokens.bearer_token() {
            req = req.bearer_auth(token.expose_secret());
        }
        Ok(req)
    }

    /// Issue a body-less request and decode by the endpoint's shape.
    pub async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        args: &[&str],
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, Error> {
        let resp = self.request(&endpoint, args, query)?.send().await?;
        Self::handle_response(endpoint.shape, resp).await
    }

    /// Issue a request with a JSON body and decode by the endpoint's shape.
    pub async fn send_json<T, B>(
        &self,
        endpoint: Endpoint,
        args: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let resp = self.request(&endpoint, args, &[])?.json(body).send().await?;
        Self::handle_response(endpoint.shape, resp).await
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        args: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        self.send(endpoint, args, query)
            .await
            .map(ApiResponse::into_data)
    }

    pub(crate) async fn submit<T, B>(
        &self,
        endpoint: Endpoint,
        args: &[&str],
        body: &B,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.send_json(endpoint, args, body)
            .await
            .map(ApiResponse::into_data)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        shape: ResponseShape,
        resp: reqwest::Response,
    ) -> Result<ApiResponse<T>, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        trace!(status = status.as_u16(), bytes = body.len(), "response body received");

        match shape {
            ResponseShape::Bare => {
                let data = serde_json::from_str(&body).map_err(|e| decode_error(&e, body))?;
                Ok(ApiResponse {
                    message: None,
                    data,
                })
            }
            ResponseShape::Enveloped => {
                let envelope = if body.trim().is_empty() {
                    Envelope {
                        status: None,
                        message: None,
                        data: serde_json::Value::Null,
                    }
                } else {
                    serde_json::from_str::<Envelope>(&body)
                        .map_err(|e| decode_error(&e, body.clone()))?
                };
                trace!(
                    envelope_status = ?envelope.status,
                    envelope_message = ?envelope.message,
                    "unwrapped envelope"
                );
                let data =
                    serde_json::from_value(envelope.data).map_err(|e| decode_error(&e, body))?;
                Ok(ApiResponse {
                    message: envelope.message,
                    data,
                })
            }
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

        debug!(status = status.as_u16(), %message, "request rejected");

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn decode_error(e: &serde_json::Error, body: String) -> Error {
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{e} (body preview: {preview:?})"),
        body,
    }
}
