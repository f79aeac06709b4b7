// ── Typed mutation payloads ──
//
// Drafts create, patches update. Patches carry only the fields they
// set; `apply` is what the mock layer runs, the remote gateway
// serializes the same fields onto the wire.

use crate::model::{AccessPoint, Band, Client, Network, Role, SecurityMode, User};

// ── Network ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NetworkDraft {
    pub name: String,
    pub ssid: String,
    pub security: SecurityMode,
    pub band: Option<Band>,
    pub vlan: u16,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NetworkPatch {
    pub name: Option<String>,
    pub ssid: Option<String>,
    pub security: Option<SecurityMode>,
    pub band: Option<Band>,
    pub vlan: Option<u16>,
    pub enabled: Option<bool>,
}

impl NetworkPatch {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::default()
        }
    }

    pub fn apply(&self, network: &mut Network) {
        if let Some(ref name) = self.name {
            network.name.clone_from(name);
        }
        if let Some(ref ssid) = self.ssid {
            network.ssid.clone_from(ssid);
        }
        if let Some(security) = self.security {
            network.security = security;
        }
        if let Some(band) = self.band {
            network.band = Some(band);
        }
        if let Some(vlan) = self.vlan {
            network.vlan = vlan;
        }
        if let Some(enabled) = self.enabled {
            network.enabled = enabled;
        }
    }
}

// ── Access point ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AccessPointPatch {
    pub name: Option<String>,
    pub channel: Option<u16>,
    pub network_id: Option<String>,
}

impl AccessPointPatch {
    pub fn apply(&self, ap: &mut AccessPoint) {
        if let Some(ref name) = self.name {
            ap.name.clone_from(name);
        }
        if let Some(channel) = self.channel {
            ap.channel = channel;
        }
        if let Some(ref network_id) = self.network_id {
            ap.network_id = Some(network_id.clone());
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub blocked: Option<bool>,
}

impl ClientPatch {
    pub fn blocked(blocked: bool) -> Self {
        Self {
            blocked: Some(blocked),
            ..Self::default()
        }
    }

    pub fn apply(&self, client: &mut Client) {
        if let Some(ref name) = self.name {
            client.name.clone_from(name);
        }
        if let Some(blocked) = self.blocked {
            client.blocked = blocked;
        }
    }
}

// ── User ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub enabled: Option<bool>,
}

impl UserPatch {
    pub fn apply(&self, user: &mut User) {
        if let Some(ref name) = self.name {
            user.name.clone_from(name);
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(enabled) = self.enabled {
            user.enabled = enabled;
        }
    }
}
