// ── Mock gateway ──
//
// The same method surface as the remote gateway, served from the
// in-memory store after a deterministic simulated delay. Errors use
// the identical uniform shape the remote path produces: not-found is
// 404/NOT_FOUND, a duplicate SSID on create is 409/CONFLICT.
//
// Mutations go straight at the shared store: two concurrent writes to
// one record interleave and the later write wins. Known limitation,
// matching the backend-less original; callers get no ordering promise.

use std::sync::{Arc, PoisonError};

use chrono::Utc;

use crate::error::CoreError;
use crate::gateway::BackendHealth;
use crate::model::{AccessPoint, Alert, Client, Network, Settings, User};
use crate::requests::{AccessPointPatch, ClientPatch, NetworkDraft, NetworkPatch, UserPatch};

use super::latency::LatencyProfile;
use super::store::MockStore;

#[derive(Clone)]
pub struct MockGateway {
    store: Arc<MockStore>,
    latency: LatencyProfile,
}

impl MockGateway {
    pub fn new(store: Arc<MockStore>, latency: LatencyProfile) -> Self {
        Self { store, latency }
    }

    /// Seeded store, default latency.
    pub fn seeded() -> Self {
        Self::new(Arc::new(MockStore::seeded()), LatencyProfile::default())
    }

    pub fn store(&self) -> &Arc<MockStore> {
        &self.store
    }

    fn not_found(resource: &'static str, id: &str) -> CoreError {
        CoreError::NotFound {
            resource,
            id: id.to_owned(),
        }
    }

    // ── Networks ─────────────────────────────────────────────────────

    pub async fn list_networks(&self) -> Result<Vec<Network>, CoreError> {
        self.latency.simulate("networks.list").await;
        Ok(self.store.networks.list())
    }

    pub async fn get_network(&self, id: &str) -> Result<Network, CoreError> {
        self.latency.simulate(&format!("networks.get:{id}")).await;
        self.store
            .networks
            .get(id)
            .ok_or_else(|| Self::not_found("network", id))
    }

    pub async fn create_network(&self, draft: NetworkDraft) -> Result<Network, CoreError> {
        self.latency.simulate("networks.create").await;

        let ssid = draft.ssid.clone();
        if self
            .store
            .networks
            .any(|n| n.ssid.eq_ignore_ascii_case(&ssid))
        {
            return Err(CoreError::Conflict {
                resource: "network",
                message: format!("SSID {ssid:?} already exists"),
            });
        }

        let network = Network {
            id: self.store.mint_id("net"),
            name: if draft.name.is_empty() {
                draft.ssid.clone()
            } else {
                draft.name
            },
            ssid: draft.ssid,
            security: draft.security,
            band: draft.band,
            vlan: draft.vlan,
            enabled: draft.enabled,
            created_at: Some(Utc::now()),
        };
        self.store.networks.upsert(network.clone());
        Ok(network)
    }

    pub async fn update_network(
        &self,
        id: &str,
        patch: NetworkPatch,
    ) -> Result<Network, CoreError> {
        self.latency.simulate(&format!("networks.update:{id}")).await;

        let mut network = self
            .store
            .networks
            .get(id)
            .ok_or_else(|| Self::not_found("network", id))?;
        patch.apply(&mut network);
        self.store.networks.upsert(network.clone());
        Ok(network)
    }

    pub async fn delete_network(&self, id: &str) -> Result<(), CoreError> {
        self.latency.simulate(&format!("networks.delete:{id}")).await;
        self.store
            .networks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found("network", id))
    }

    // ── Access points ────────────────────────────────────────────────

    pub async fn list_access_points(&self) -> Result<Vec<AccessPoint>, CoreError> {
        self.latency.simulate("aps.list").await;
        Ok(self.store.access_points.list())
    }

    pub async fn get_access_point(&self, id: &str) -> Result<AccessPoint, CoreError> {
        self.latency.simulate(&format!("aps.get:{id}")).await;
        self.store
            .access_points
            .get(id)
            .ok_or_else(|| Self::not_found("access point", id))
    }

    pub async fn update_access_point(
        &self,
        id: &str,
        patch: AccessPointPatch,
    ) -> Result<AccessPoint, CoreError> {
        self.latency.simulate(&format!("aps.update:{id}")).await;

        let mut ap = self
            .store
            .access_points
            .get(id)
            .ok_or_else(|| Self::not_found("access point", id))?;
        patch.apply(&mut ap);
        self.store.access_points.upsert(ap.clone());
        Ok(ap)
    }

    // ── Clients ──────────────────────────────────────────────────────

    pub async fn list_clients(&self) -> Result<Vec<Client>, CoreError> {
        self.latency.simulate("clients.list").await;
        Ok(self.store.clients.list())
    }

    pub async fn get_client(&self, id: &str) -> Result<Client, CoreError> {
        self.latency.simulate(&format!("clients.get:{id}")).await;
        self.store
            .clients
            .get(id)
            .ok_or_else(|| Self::not_found("client", id))
    }

    pub async fn update_client(&self, id: &str, patch: ClientPatch) -> Result<Client, CoreError> {
        self.latency.simulate(&format!("clients.update:{id}")).await;

        let mut client = self
            .store
            .clients
            .get(id)
            .ok_or_else(|| Self::not_found("client", id))?;
        patch.apply(&mut client);
        self.store.clients.upsert(client.clone());
        Ok(client)
    }

    pub async fn delete_client(&self, id: &str) -> Result<(), CoreError> {
        self.latency.simulate(&format!("clients.delete:{id}")).await;
        self.store
            .clients
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found("client", id))
    }

    // ── Alerts ───────────────────────────────────────────────────────

    pub async fn list_alerts(&self) -> Result<Vec<Alert>, CoreError> {
        self.latency.simulate("alerts.list").await;
        Ok(self.store.alerts.list())
    }

    pub async fn acknowledge_alert(
        &self,
        id: &str,
        acknowledged: bool,
    ) -> Result<Alert, CoreError> {
        self.latency.simulate(&format!("alerts.ack:{id}")).await;

        let mut alert = self
            .store
            .alerts
            .get(id)
            .ok_or_else(|| Self::not_found("alert", id))?;
        alert.acknowledged = acknowledged;
        self.store.alerts.upsert(alert.clone());
        Ok(alert)
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        self.latency.simulate("users.list").await;
        Ok(self.store.users.list())
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, CoreError> {
        self.latency.simulate(&format!("users.update:{id}")).await;

        let mut user = self
            .store
            .users
            .get(id)
            .ok_or_else(|| Self::not_found("user", id))?;
        patch.apply(&mut user);
        self.store.users.upsert(user.clone());
        Ok(user)
    }

    // ── Settings / health ────────────────────────────────────────────

    pub async fn get_settings(&self) -> Result<Settings, CoreError> {
        self.latency.simulate("settings.get").await;
        Ok(self
            .store
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    pub async fn update_settings(&self, settings: Settings) -> Result<Settings, CoreError> {
        self.latency.simulate("settings.update").await;
        *self
            .store
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner) = settings.clone();
        Ok(settings)
    }

    pub async fn health(&self) -> Result<BackendHealth, CoreError> {
        self.latency.simulate("health").await;
        Ok(BackendHealth {
            status: "ok".into(),
            version: Some(concat!(env!("CARGO_PKG_VERSION"), "-mock").into()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::SecurityMode;
    use pretty_assertions::assert_eq;

    fn quiet() -> MockGateway {
        MockGateway::new(Arc::new(MockStore::seeded()), LatencyProfile::zero())
    }

    #[tokio::test]
    async fn unknown_client_rejects_with_404_not_found() {
        let gw = quiet();
        let err = gw.get_client("cl-9999").await.unwrap_err();
        let report = err.report();
        assert_eq!(report.status, Some(404));
        assert_eq!(report.code.as_deref(), Some("NOT_FOUND"));
    }

    #[tokio::test]
    async fn duplicate_ssid_rejects_with_409_conflict() {
        let gw = quiet();
        let draft = NetworkDraft {
            name: "Shadow".into(),
            ssid: "ocean-guest".into(), // case-insensitive collision
            security: SecurityMode::Wpa2,
            band: None,
            vlan: 1,
            enabled: true,
        };
        let err = gw.create_network(draft).await.unwrap_err();
        let report = err.report();
        assert_eq!(report.status, Some(409));
        assert_eq!(report.code.as_deref(), Some("CONFLICT"));
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let gw = quiet();
        let draft = NetworkDraft {
            name: String::new(),
            ssid: "Ocean-Lab".into(),
            security: SecurityMode::Wpa3,
            band: None,
            vlan: 42,
            enabled: true,
        };
        let created = gw.create_network(draft).await.unwrap();
        assert_eq!(created.name, "Ocean-Lab", "name falls back to ssid");

        let fetched = gw.get_network(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(gw.store().network_count(), 4);
    }

    #[tokio::test]
    async fn update_applies_only_patched_fields() {
        let gw = quiet();
        let before = gw.get_network("net-iot").await.unwrap();

        let updated = gw
            .update_network("net-iot", NetworkPatch::enabled(true))
            .await
            .unwrap();

        assert!(updated.enabled);
        assert_eq!(updated.ssid, before.ssid);
        assert_eq!(updated.vlan, before.vlan);
    }

    #[tokio::test]
    async fn delete_network_then_get_is_not_found() {
        let gw = quiet();
        gw.delete_network("net-iot").await.unwrap();
        assert!(gw.get_network("net-iot").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn block_round_trip() {
        let gw = quiet();
        let before = gw.get_client("cl-1").await.unwrap();
        assert!(!before.blocked);

        let blocked = gw
            .update_client("cl-1", ClientPatch::blocked(true))
            .await
            .unwrap();
        assert!(blocked.blocked);

        let unblocked = gw
            .update_client("cl-1", ClientPatch::blocked(false))
            .await
            .unwrap();
        assert!(!unblocked.blocked);
    }

    #[tokio::test]
    async fn acknowledge_alert_flips_only_the_flag() {
        let gw = quiet();
        let acked = gw.acknowledge_alert("al-1", true).await.unwrap();
        assert!(acked.acknowledged);
        assert_eq!(acked.title, "AP offline");
    }

    #[tokio::test]
    async fn settings_replace_whole() {
        let gw = quiet();
        let mut settings = gw.get_settings().await.unwrap();
        settings.country_code = "DE".into();
        gw.update_settings(settings.clone()).await.unwrap();
        assert_eq!(gw.get_settings().await.unwrap(), settings);
    }

    // Last-write-wins: two uncoordinated updates to the same record;
    // whichever resolves later sticks. This documents the gap rather
    // than asserting coordination that does not exist.
    #[tokio::test]
    async fn concurrent_updates_last_write_wins() {
        let gw = quiet();

        let first = gw.update_client("cl-2", ClientPatch::blocked(true));
        let second = gw.update_client("cl-2", ClientPatch::blocked(false));
        let (a, b) = tokio::join!(first, second);
        a.unwrap();
        b.unwrap();

        let after = gw.get_client("cl-2").await.unwrap();
        assert!(!after.blocked, "the later write wins");
    }
}
