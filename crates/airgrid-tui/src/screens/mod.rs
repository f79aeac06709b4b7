//! Screen registry.

mod access_points;
mod alerts;
mod clients;
mod dashboard;
mod networks;
mod settings;
mod users;

pub use settings::RuntimeInfo;

use crate::component::Component;
use crate::screen::ScreenId;

/// Build every screen, keyed by its id.
pub fn create_screens(
    page_size: usize,
    runtime: RuntimeInfo,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()) as Box<dyn Component>,
        ),
        (
            ScreenId::Networks,
            Box::new(networks::NetworksScreen::new(page_size)),
        ),
        (
            ScreenId::AccessPoints,
            Box::new(access_points::AccessPointsScreen::new(page_size)),
        ),
        (
            ScreenId::Clients,
            Box::new(clients::ClientsScreen::new(page_size)),
        ),
        (
            ScreenId::Alerts,
            Box::new(alerts::AlertsScreen::new(page_size)),
        ),
        (ScreenId::Users, Box::new(users::UsersScreen::new(page_size))),
        (
            ScreenId::Settings,
            Box::new(settings::SettingsScreen::new(runtime)),
        ),
    ]
}
