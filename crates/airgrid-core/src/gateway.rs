// ── Data-access gateway ──
//
// One interface, two implementations: the remote REST backend and the
// in-memory mock layer. Selection happens at construction time from
// resolved settings — a runtime choice injected into the app, not a
// compile/load-time constant — so tests (and eventually a UI toggle)
// can swap strategies freely.

use std::sync::Arc;
use std::time::Duration;

use airgrid_api::types::{
    AcknowledgeAlertRequest, CreateNetworkRequest, UpdateAccessPointRequest, UpdateClientRequest,
    UpdateNetworkRequest, UpdateSettingsRequest, UpdateUserRequest,
};
use airgrid_api::{RestClient, TransportConfig};
use tracing::info;

use crate::convert;
use crate::error::CoreError;
use crate::mock::{LatencyProfile, MockGateway, MockStore};
use crate::model::{AccessPoint, Alert, Client, Network, Settings, User};
use crate::requests::{AccessPointPatch, ClientPatch, NetworkDraft, NetworkPatch, UserPatch};

/// Backend health snapshot for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendHealth {
    pub status: String,
    pub version: Option<String>,
}

/// Which implementation serves the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    Remote,
    Mock,
}

impl GatewayMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Mock => "mock",
        }
    }
}

/// Resolved data-source settings, produced by `airgrid-config`.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub mode: GatewayMode,
    pub api_base: Option<String>,
    pub timeout: Duration,
}

// ── Remote implementation ───────────────────────────────────────────

/// REST-backed gateway: wire DTOs in, normalized domain records out.
#[derive(Clone)]
pub struct RemoteGateway {
    rest: RestClient,
}

impl RemoteGateway {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(timeout);
        let rest = RestClient::new(api_base, &transport)?;
        Ok(Self { rest })
    }

    pub fn from_rest(rest: RestClient) -> Self {
        Self { rest }
    }

    pub async fn list_networks(&self) -> Result<Vec<Network>, CoreError> {
        self.rest
            .list_networks()
            .await?
            .into_iter()
            .map(convert::network_from_wire)
            .collect()
    }

    pub async fn get_network(&self, id: &str) -> Result<Network, CoreError> {
        convert::network_from_wire(self.rest.get_network(id).await?)
    }

    pub async fn create_network(&self, draft: NetworkDraft) -> Result<Network, CoreError> {
        let req = CreateNetworkRequest {
            name: draft.name,
            ssid: draft.ssid,
            security: draft.security.to_string(),
            band: draft.band.map(|b| b.to_string()),
            vlan: draft.vlan,
            enabled: draft.enabled,
        };
        convert::network_from_wire(self.rest.create_network(&req).await?)
    }

    pub async fn update_network(
        &self,
        id: &str,
        patch: NetworkPatch,
    ) -> Result<Network, CoreError> {
        let req = UpdateNetworkRequest {
            name: patch.name,
            ssid: patch.ssid,
            security: patch.security.map(|s| s.to_string()),
            band: patch.band.map(|b| b.to_string()),
            vlan: patch.vlan,
            enabled: patch.enabled,
        };
        convert::network_from_wire(self.rest.update_network(id, &req).await?)
    }

    pub async fn delete_network(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.rest.delete_network(id).await?)
    }

    pub async fn list_access_points(&self) -> Result<Vec<AccessPoint>, CoreError> {
        self.rest
            .list_access_points()
            .await?
            .into_iter()
            .map(convert::access_point_from_wire)
            .collect()
    }

    pub async fn get_access_point(&self, id: &str) -> Result<AccessPoint, CoreError> {
        convert::access_point_from_wire(self.rest.get_access_point(id).await?)
    }

    pub async fn update_access_point(
        &self,
        id: &str,
        patch: AccessPointPatch,
    ) -> Result<AccessPoint, CoreError> {
        let req = UpdateAccessPointRequest {
            name: patch.name,
            channel: patch.channel,
            network_id: patch.network_id,
        };
        convert::access_point_from_wire(self.rest.update_access_point(id, &req).await?)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, CoreError> {
        self.rest
            .list_clients()
            .await?
            .into_iter()
            .map(convert::client_from_wire)
            .collect()
    }

    pub async fn get_client(&self, id: &str) -> Result<Client, CoreError> {
        convert::client_from_wire(self.rest.get_client(id).await?)
    }

    pub async fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Client, CoreError> {
        let req = UpdateClientRequest {
            name: patch.name,
            blocked: patch.blocked,
        };
        convert::client_from_wire(self.rest.update_client(id, &req).await?)
    }

    pub async fn delete_client(&self, id: &str) -> Result<(), CoreError> {
        Ok(self.rest.delete_client(id).await?)
    }

    pub async fn list_alerts(&self) -> Result<Vec<Alert>, CoreError> {
        self.rest
            .list_alerts()
            .await?
            .into_iter()
            .map(convert::alert_from_wire)
            .collect()
    }

    pub async fn acknowledge_alert(
        &self,
        id: &str,
        acknowledged: bool,
    ) -> Result<Alert, CoreError> {
        let req = AcknowledgeAlertRequest { acknowledged };
        convert::alert_from_wire(self.rest.acknowledge_alert(id, &req).await?)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        self.rest
            .list_users()
            .await?
            .into_iter()
            .map(convert::user_from_wire)
            .collect()
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, CoreError> {
        let req = UpdateUserRequest {
            name: patch.name,
            role: patch.role.map(|r| r.to_string()),
            enabled: patch.enabled,
        };
        convert::user_from_wire(self.rest.update_user(id, &req).await?)
    }

    pub async fn get_settings(&self) -> Result<Settings, CoreError> {
        convert::settings_from_wire(self.rest.get_settings().await?)
    }

    pub async fn update_settings(&self, settings: Settings) -> Result<Settings, CoreError> {
        let req = UpdateSettingsRequest {
            country_code: settings.country_code,
            channel_plan: settings.channel_plan.to_string(),
            allow_guest_isolation: settings.allow_guest_isolation,
            tx_power: settings.tx_power.to_string(),
        };
        convert::settings_from_wire(self.rest.update_settings(&req).await?)
    }

    pub async fn health(&self) -> Result<BackendHealth, CoreError> {
        let wire = self.rest.health().await?;
        Ok(BackendHealth {
            status: wire.status,
            version: wire.version,
        })
    }
}

// ── Unified gateway ─────────────────────────────────────────────────

/// The data-access interface every page controller talks to.
#[derive(Clone)]
pub enum Gateway {
    Remote(RemoteGateway),
    Mock(MockGateway),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $call:expr) => {
        match $self {
            Gateway::Remote($g) => $call,
            Gateway::Mock($g) => $call,
        }
    };
}

impl Gateway {
    /// Construct the implementation the resolved settings ask for.
    pub fn from_settings(settings: &GatewaySettings) -> Result<Self, CoreError> {
        match settings.mode {
            GatewayMode::Mock => {
                info!("using mock data layer (seeded in-memory store)");
                Ok(Self::Mock(MockGateway::new(
                    Arc::new(MockStore::seeded()),
                    LatencyProfile::default(),
                )))
            }
            GatewayMode::Remote => {
                let base = settings.api_base.as_deref().ok_or(CoreError::Config {
                    message: "remote mode requires an API base URL".into(),
                })?;
                info!(api_base = base, "using remote REST backend");
                Ok(Self::Remote(RemoteGateway::new(base, settings.timeout)?))
            }
        }
    }

    /// A mock gateway over the given store (tests inject fixtures here).
    pub fn mock(store: Arc<MockStore>, latency: LatencyProfile) -> Self {
        Self::Mock(MockGateway::new(store, latency))
    }

    pub fn mode(&self) -> GatewayMode {
        match self {
            Self::Remote(_) => GatewayMode::Remote,
            Self::Mock(_) => GatewayMode::Mock,
        }
    }

    // ── Networks ─────────────────────────────────────────────────────

    pub async fn list_networks(&self) -> Result<Vec<Network>, CoreError> {
        dispatch!(self, g => g.list_networks().await)
    }

    pub async fn get_network(&self, id: &str) -> Result<Network, CoreError> {
        dispatch!(self, g => g.get_network(id).await)
    }

    pub async fn create_network(&self, draft: NetworkDraft) -> Result<Network, CoreError> {
        dispatch!(self, g => g.create_network(draft).await)
    }

    pub async fn update_network(
        &self,
        id: &str,
        patch: NetworkPatch,
    ) -> Result<Network, CoreError> {
        dispatch!(self, g => g.update_network(id, patch).await)
    }

    pub async fn delete_network(&self, id: &str) -> Result<(), CoreError> {
        dispatch!(self, g => g.delete_network(id).await)
    }

    // ── Access points ────────────────────────────────────────────────

    pub async fn list_access_points(&self) -> Result<Vec<AccessPoint>, CoreError> {
        dispatch!(self, g => g.list_access_points().await)
    }

    pub async fn get_access_point(&self, id: &str) -> Result<AccessPoint, CoreError> {
        dispatch!(self, g => g.get_access_point(id).await)
    }

    pub async fn update_access_point(
        &self,
        id: &str,
        patch: AccessPointPatch,
    ) -> Result<AccessPoint, CoreError> {
        dispatch!(self, g => g.update_access_point(id, patch).await)
    }

    // ── Clients ──────────────────────────────────────────────────────

    pub async fn list_clients(&self) -> Result<Vec<Client>, CoreError> {
        dispatch!(self, g => g.list_clients().await)
    }

    pub async fn get_client(&self, id: &str) -> Result<Client, CoreError> {
        dispatch!(self, g => g.get_client(id).await)
    }

    pub async fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Client, CoreError> {
        dispatch!(self, g => g.update_client(id, patch).await)
    }

    pub async fn delete_client(&self, id: &str) -> Result<(), CoreError> {
        dispatch!(self, g => g.delete_client(id).await)
    }

    // ── Alerts ───────────────────────────────────────────────────────

    pub async fn list_alerts(&self) -> Result<Vec<Alert>, CoreError> {
        dispatch!(self, g => g.list_alerts().await)
    }

    pub async fn acknowledge_alert(
        &self,
        id: &str,
        acknowledged: bool,
    ) -> Result<Alert, CoreError> {
        dispatch!(self, g => g.acknowledge_alert(id, acknowledged).await)
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        dispatch!(self, g => g.list_users().await)
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, CoreError> {
        dispatch!(self, g => g.update_user(id, patch).await)
    }

    // ── Settings / health ────────────────────────────────────────────

    pub async fn get_settings(&self) -> Result<Settings, CoreError> {
        dispatch!(self, g => g.get_settings().await)
    }

    pub async fn update_settings(&self, settings: Settings) -> Result<Settings, CoreError> {
        dispatch!(self, g => g.update_settings(settings).await)
    }

    pub async fn health(&self) -> Result<BackendHealth, CoreError> {
        dispatch!(self, g => g.health().await)
    }
}
