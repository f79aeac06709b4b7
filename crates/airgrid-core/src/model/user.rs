// ── Admin user domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::common::Entity;

/// Console role. Closed enumeration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Operator,
    #[default]
    Viewer,
}

impl Role {
    /// Whether this role may mutate anything (viewer is read-only).
    pub fn can_operate(self) -> bool {
        matches!(self, Self::Admin | Self::Operator)
    }

    /// Whether this role may manage users and settings.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub enabled: bool,
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}
