//! Screen identifier enum.

use std::fmt;

/// Identifies each primary screen, navigable by number keys 1-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Networks,     // 2
    AccessPoints, // 3
    Clients,      // 4
    Alerts,       // 5
    Users,        // 6
    Settings,     // 7
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 7] = [
        Self::Dashboard,
        Self::Networks,
        Self::AccessPoints,
        Self::Clients,
        Self::Alerts,
        Self::Users,
        Self::Settings,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Networks => 2,
            Self::AccessPoints => 3,
            Self::Clients => 4,
            Self::Alerts => 5,
            Self::Users => 6,
            Self::Settings => 7,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Networks => "Networks",
            Self::AccessPoints => "APs",
            Self::Clients => "Clients",
            Self::Alerts => "Alerts",
            Self::Users => "Users",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_round_trip() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(screen.number()), Some(screen));
        }
        assert_eq!(ScreenId::from_number(9), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Settings.next(), ScreenId::Dashboard);
        assert_eq!(ScreenId::Dashboard.prev(), ScreenId::Settings);
    }
}
