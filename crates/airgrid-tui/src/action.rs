//! All UI actions. Actions are the sole mechanism for state mutation:
//! screens request work, the job runner answers with `*Done`/`*Loaded`
//! results, and the app loop routes both.

use airgrid_core::{
    AccessPoint, AccessPointPatch, Alert, BackendHealth, Client, ClientPatch, ErrorReport, Network,
    NetworkDraft, NetworkPatch, Settings, User, UserPatch,
};

use crate::screen::ScreenId;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A transient notification shown in the status area.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub detail: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            level: ToastLevel::Success,
        }
    }

    pub fn error(title: impl Into<String>, report: &ErrorReport) -> Self {
        Self {
            title: title.into(),
            detail: report.message.clone(),
            level: ToastLevel::Error,
        }
    }

    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            level: ToastLevel::Info,
        }
    }
}

/// Every state transition in the console is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation / chrome ────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,
    ToggleTheme,
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    Notify(Toast),

    // ── Selection persistence ──────────────────────────────────────
    RememberNetwork(String),
    RememberAccessPoint(String),

    // ── Session ────────────────────────────────────────────────────
    Login(String),
    Logout,
    LoginDone(Result<User, ErrorReport>),

    // ── Load requests (screen → jobs) ──────────────────────────────
    LoadNetworks,
    LoadAccessPoints,
    LoadClients,
    LoadClientDetail(String),
    LoadAlerts,
    LoadUsers,
    LoadSettings,
    CheckHealth,

    // ── Load results (jobs → screens) ──────────────────────────────
    NetworksLoaded(Result<Vec<Network>, ErrorReport>),
    AccessPointsLoaded(Result<Vec<AccessPoint>, ErrorReport>),
    ClientsLoaded(Result<Vec<Client>, ErrorReport>),
    ClientDetailLoaded(Result<Client, ErrorReport>),
    AlertsLoaded(Result<Vec<Alert>, ErrorReport>),
    UsersLoaded(Result<Vec<User>, ErrorReport>),
    SettingsLoaded(Result<Settings, ErrorReport>),
    HealthChecked(Result<BackendHealth, ErrorReport>),

    // ── Mutation requests (screen → jobs) ──────────────────────────
    CreateNetwork(NetworkDraft),
    UpdateNetwork { id: String, patch: NetworkPatch },
    DeleteNetwork { id: String },
    UpdateAccessPoint { id: String, patch: AccessPointPatch },
    UpdateClient { id: String, patch: ClientPatch },
    AcknowledgeAlert { id: String, acknowledged: bool },
    UpdateUser { id: String, patch: UserPatch },
    SaveSettings(Settings),

    // ── Mutation results (jobs → screens) ──────────────────────────
    NetworkCreateDone(Result<Network, ErrorReport>),
    NetworkUpdateDone {
        id: String,
        result: Result<Network, ErrorReport>,
    },
    NetworkDeleteDone {
        id: String,
        result: Result<(), ErrorReport>,
    },
    AccessPointUpdateDone {
        id: String,
        result: Result<AccessPoint, ErrorReport>,
    },
    ClientUpdateDone {
        id: String,
        result: Result<Client, ErrorReport>,
    },
    AlertAckDone {
        id: String,
        result: Result<Alert, ErrorReport>,
    },
    UserUpdateDone {
        id: String,
        result: Result<User, ErrorReport>,
    },
    SettingsSaveDone(Result<Settings, ErrorReport>),
}
