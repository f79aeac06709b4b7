//! Job runner — bridges gateway calls to actions.
//!
//! Every request action spawns one task; the task awaits the gateway
//! (real or mock, the runner cannot tell) and sends exactly one result
//! action back into the loop. No retries: a failed call reports once.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use airgrid_core::{
    AccessPointPatch, ClientPatch, Gateway, NetworkDraft, NetworkPatch, Settings, UserPatch,
    authenticate,
};

use crate::action::Action;

#[derive(Clone)]
pub struct Jobs {
    gateway: Gateway,
    tx: UnboundedSender<Action>,
}

impl Jobs {
    pub fn new(gateway: Gateway, tx: UnboundedSender<Action>) -> Self {
        Self { gateway, tx }
    }

    fn spawn<F>(&self, fut: F)
    where
        F: std::future::Future<Output = Action> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(fut.await);
        });
    }

    /// Route a request action to its gateway call. Returns `true` when
    /// the action was a request this runner owns.
    pub fn handle(&self, action: &Action) -> bool {
        let gw = self.gateway.clone();
        match action {
            Action::LoadNetworks => self.spawn(async move {
                Action::NetworksLoaded(gw.list_networks().await.map_err(|e| e.report()))
            }),
            Action::LoadAccessPoints => self.spawn(async move {
                Action::AccessPointsLoaded(gw.list_access_points().await.map_err(|e| e.report()))
            }),
            Action::LoadClients => self.spawn(async move {
                Action::ClientsLoaded(gw.list_clients().await.map_err(|e| e.report()))
            }),
            Action::LoadClientDetail(id) => {
                let id = id.clone();
                self.spawn(async move {
                    Action::ClientDetailLoaded(gw.get_client(&id).await.map_err(|e| e.report()))
                });
            }
            Action::LoadAlerts => self.spawn(async move {
                Action::AlertsLoaded(gw.list_alerts().await.map_err(|e| e.report()))
            }),
            Action::LoadUsers => self.spawn(async move {
                Action::UsersLoaded(gw.list_users().await.map_err(|e| e.report()))
            }),
            Action::LoadSettings => self.spawn(async move {
                Action::SettingsLoaded(gw.get_settings().await.map_err(|e| e.report()))
            }),
            Action::CheckHealth => self.spawn(async move {
                Action::HealthChecked(gw.health().await.map_err(|e| e.report()))
            }),

            Action::CreateNetwork(draft) => {
                let draft: NetworkDraft = draft.clone();
                self.spawn(async move {
                    Action::NetworkCreateDone(
                        gw.create_network(draft).await.map_err(|e| e.report()),
                    )
                });
            }
            Action::UpdateNetwork { id, patch } => {
                let (id, patch): (String, NetworkPatch) = (id.clone(), patch.clone());
                self.spawn(async move {
                    let result = gw.update_network(&id, patch).await.map_err(|e| e.report());
                    Action::NetworkUpdateDone { id, result }
                });
            }
            Action::DeleteNetwork { id } => {
                let id = id.clone();
                self.spawn(async move {
                    let result = gw.delete_network(&id).await.map_err(|e| e.report());
                    Action::NetworkDeleteDone { id, result }
                });
            }
            Action::UpdateAccessPoint { id, patch } => {
                let (id, patch): (String, AccessPointPatch) = (id.clone(), patch.clone());
                self.spawn(async move {
                    let result = gw
                        .update_access_point(&id, patch)
                        .await
                        .map_err(|e| e.report());
                    Action::AccessPointUpdateDone { id, result }
                });
            }
            Action::UpdateClient { id, patch } => {
                let (id, patch): (String, ClientPatch) = (id.clone(), patch.clone());
                self.spawn(async move {
                    let result = gw.update_client(&id, patch).await.map_err(|e| e.report());
                    Action::ClientUpdateDone { id, result }
                });
            }
            Action::AcknowledgeAlert { id, acknowledged } => {
                let (id, acknowledged) = (id.clone(), *acknowledged);
                self.spawn(async move {
                    let result = gw
                        .acknowledge_alert(&id, acknowledged)
                        .await
                        .map_err(|e| e.report());
                    Action::AlertAckDone { id, result }
                });
            }
            Action::UpdateUser { id, patch } => {
                let (id, patch): (String, UserPatch) = (id.clone(), patch.clone());
                self.spawn(async move {
                    let result = gw.update_user(&id, patch).await.map_err(|e| e.report());
                    Action::UserUpdateDone { id, result }
                });
            }
            Action::SaveSettings(settings) => {
                let settings: Settings = settings.clone();
                self.spawn(async move {
                    Action::SettingsSaveDone(
                        gw.update_settings(settings).await.map_err(|e| e.report()),
                    )
                });
            }

            Action::Login(email) => {
                let email = email.clone();
                self.spawn(async move {
                    Action::LoginDone(authenticate(&gw, &email).await.map_err(|e| e.report()))
                });
            }

            _ => return false,
        }
        debug!(?action, "job dispatched");
        true
    }
}
