// airgrid-core: Domain layer between airgrid-api and consumers (TUI).

pub mod columns;
pub mod controller;
pub mod convert;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod model;
pub mod optimistic;
pub mod requests;
pub mod session;
pub mod table;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use controller::{DetailController, DetailPhase, ListController, LoadPhase};
pub use error::{CoreError, ErrorReport};
pub use optimistic::Snapshot;
pub use gateway::{BackendHealth, Gateway, GatewayMode, GatewaySettings, RemoteGateway};
pub use mock::{LatencyProfile, MockGateway, MockStore};
pub use requests::{AccessPointPatch, ClientPatch, NetworkDraft, NetworkPatch, UserPatch};
pub use session::{Session, authenticate};
pub use table::{CellValue, Column, SortDir, TableQuery, TableView, Tabular};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AccessPoint, Alert, ApStatus, Band, ChannelPlan, Client, ClientPresence, Entity, MacAddress,
    Network, Role, SecurityMode, Settings, Severity, TxPower, User,
};
