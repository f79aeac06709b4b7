// Hand-crafted async HTTP client for the airgrid management REST API.
//
// Resource paths: /networks, /access-points, /clients, /alerts, /users,
// /settings, /health — all JSON in, JSON (or 204) out.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{
    AcknowledgeAlertRequest, CreateNetworkRequest, UpdateAccessPointRequest, UpdateClientRequest,
    UpdateNetworkRequest, UpdateSettingsRequest, UpdateUserRequest, WireAccessPoint, WireAlert,
    WireClient, WireHealth, WireNetwork, WireSettings, WireUser,
};

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "error")]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the management REST API.
///
/// One instance per base URL; cheap to clone (shares the connection
/// pool). Failures normalize into [`Error`]: a fired timeout becomes
/// `Error::Timeout`, any non-2xx becomes `Error::Api` with the body's
/// message/code/details when present.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl RestClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    /// Wrap an existing `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, base_url: Url, timeout: Duration) -> Self {
        let base_url = ensure_trailing_slash(base_url);
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// Parse the base URL and guarantee a trailing slash so relative
    /// joins behave.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let url = Url::parse(raw.trim_end_matches('/'))?;
        Ok(ensure_trailing_slash(url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"networks"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.send(self.http.get(url)).await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.send(self.http.post(url).json(body)).await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.send(self.http.put(url).json(body)).await?;
        self.handle_response(resp).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.send(self.http.patch(url).json(body)).await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.send(self.http.delete(url)).await?;
        self.handle_empty(resp).await
    }

    /// Send a request, mapping a fired client timeout into the distinct
    /// `Timeout` variant. No retries, ever: a failed call reports once.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                }
            } else {
                Error::Transport(e)
            }
        })
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Normalize a non-2xx response into `Error::Api`.
    ///
    /// Accepts `{message | error, code?, details?}` bodies; anything
    /// else falls back to `Request failed (<status>)` with the raw body
    /// preserved in `details`.
    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let fallback = format!("Request failed ({})", status.as_u16());

        match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) => Error::Api {
                status: status.as_u16(),
                message: err.message.or(err.error).unwrap_or(fallback),
                code: err.code,
                details: err.details,
            },
            Err(_) => Error::Api {
                status: status.as_u16(),
                message: if raw.trim().is_empty() {
                    fallback
                } else {
                    raw.clone()
                },
                code: None,
                details: (!raw.is_empty()).then(|| serde_json::Value::String(raw)),
            },
        }
    }

    // ── Networks ─────────────────────────────────────────────────────

    pub async fn list_networks(&self) -> Result<Vec<WireNetwork>, Error> {
        self.get("networks").await
    }

    pub async fn get_network(&self, id: &str) -> Result<WireNetwork, Error> {
        self.get(&format!("networks/{id}")).await
    }

    pub async fn create_network(&self, req: &CreateNetworkRequest) -> Result<WireNetwork, Error> {
        self.post("networks", req).await
    }

    pub async fn update_network(
        &self,
        id: &str,
        req: &UpdateNetworkRequest,
    ) -> Result<WireNetwork, Error> {
        self.patch(&format!("networks/{id}"), req).await
    }

    pub async fn delete_network(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("networks/{id}")).await
    }

    // ── Access points ────────────────────────────────────────────────

    pub async fn list_access_points(&self) -> Result<Vec<WireAccessPoint>, Error> {
        self.get("access-points").await
    }

    pub async fn get_access_point(&self, id: &str) -> Result<WireAccessPoint, Error> {
        self.get(&format!("access-points/{id}")).await
    }

    pub async fn update_access_point(
        &self,
        id: &str,
        req: &UpdateAccessPointRequest,
    ) -> Result<WireAccessPoint, Error> {
        self.patch(&format!("access-points/{id}"), req).await
    }

    // ── Clients ──────────────────────────────────────────────────────

    pub async fn list_clients(&self) -> Result<Vec<WireClient>, Error> {
        self.get("clients").await
    }

    pub async fn get_client(&self, id: &str) -> Result<WireClient, Error> {
        self.get(&format!("clients/{id}")).await
    }

    pub async fn update_client(
        &self,
        id: &str,
        req: &UpdateClientRequest,
    ) -> Result<WireClient, Error> {
        self.patch(&format!("clients/{id}"), req).await
    }

    pub async fn delete_client(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("clients/{id}")).await
    }

    // ── Alerts ───────────────────────────────────────────────────────

    pub async fn list_alerts(&self) -> Result<Vec<WireAlert>, Error> {
        self.get("alerts").await
    }

    pub async fn acknowledge_alert(
        &self,
        id: &str,
        req: &AcknowledgeAlertRequest,
    ) -> Result<WireAlert, Error> {
        self.patch(&format!("alerts/{id}"), req).await
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<WireUser>, Error> {
        self.get("users").await
    }

    pub async fn update_user(&self, id: &str, req: &UpdateUserRequest) -> Result<WireUser, Error> {
        self.patch(&format!("users/{id}"), req).await
    }

    // ── Settings / health ────────────────────────────────────────────

    pub async fn get_settings(&self) -> Result<WireSettings, Error> {
        self.get("settings").await
    }

    pub async fn update_settings(&self, req: &UpdateSettingsRequest) -> Result<WireSettings, Error> {
        self.put("settings", req).await
    }

    pub async fn health(&self) -> Result<WireHealth, Error> {
        self.get("health").await
    }
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    url
}
