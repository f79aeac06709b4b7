// ── Console session ──
//
// The session lives client-side: login selects an enabled user by
// email from the users resource, and the role gates every mutation in
// the UI. The remote backend performs no credential exchange here.

use crate::error::CoreError;
use crate::gateway::Gateway;
use crate::model::{Role, User};

/// Resolve an email to an enabled user. Disabled and unknown accounts
/// fail with the same message so the prompt leaks nothing.
pub async fn authenticate(gateway: &Gateway, email: &str) -> Result<User, CoreError> {
    let users = gateway.list_users().await?;
    users
        .into_iter()
        .find(|u| u.email.eq_ignore_ascii_case(email.trim()) && u.enabled)
        .ok_or_else(|| CoreError::validation("Invalid credentials"))
}

#[derive(Debug, Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { current: None }
    }

    /// Start signed in as the given user (the mock fleet boots as the
    /// seeded admin).
    pub fn with_user(user: User) -> Self {
        Self {
            current: Some(user),
        }
    }

    /// Select a user by email. Disabled or unknown accounts fail with
    /// the same message so the prompt leaks nothing.
    pub async fn login(&mut self, gateway: &Gateway, email: &str) -> Result<User, CoreError> {
        let user = authenticate(gateway, email).await?;
        self.current = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.current = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|u| u.role)
    }

    /// Viewer (and signed-out) sessions are read-only.
    pub fn can_operate(&self) -> bool {
        self.role().is_some_and(Role::can_operate)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{LatencyProfile, MockStore};
    use std::sync::Arc;

    fn gateway() -> Gateway {
        Gateway::mock(Arc::new(MockStore::seeded()), LatencyProfile::zero())
    }

    #[tokio::test]
    async fn login_by_email_is_case_insensitive() {
        let gw = gateway();
        let mut session = Session::anonymous();

        let user = session.login(&gw, "ADMIN@ocean.local").await.unwrap();
        assert_eq!(user.id, "u-1");
        assert!(session.can_operate());
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn unknown_email_is_rejected() {
        let gw = gateway();
        let mut session = Session::anonymous();
        let err = session.login(&gw, "ghost@ocean.local").await.unwrap_err();
        assert_eq!(err.report().code.as_deref(), Some("VALIDATION"));
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn disabled_account_cannot_sign_in() {
        let store = Arc::new(MockStore::seeded());
        let gw = Gateway::mock(Arc::clone(&store), LatencyProfile::zero());

        // disable the viewer, then try to log in as them
        if let Gateway::Mock(mock) = &gw {
            let mut user = mock.store().users.get("u-3").unwrap();
            user.enabled = false;
            mock.store().users.upsert(user);
        }

        let mut session = Session::anonymous();
        assert!(session.login(&gw, "viewer@ocean.local").await.is_err());
    }

    #[tokio::test]
    async fn viewer_cannot_operate() {
        let gw = gateway();
        let mut session = Session::anonymous();
        session.login(&gw, "viewer@ocean.local").await.unwrap();
        assert!(!session.can_operate());
        assert!(!session.is_admin());

        session.logout();
        assert!(session.user().is_none());
        assert!(!session.can_operate());
    }
}
