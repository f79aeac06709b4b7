// ── Injectable in-memory store ──
//
// Owns the mock dataset. Constructed per consumer (one per app run,
// one per test) — deliberately NOT a module-level singleton, so tests
// never leak state into each other. Mutations are last-write-wins with
// no coordination; the gateway layer documents that limitation.

use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{AccessPoint, Alert, Client, Network, Settings, User};

use super::collection::Collection;
use super::seed;

pub struct MockStore {
    pub(crate) networks: Collection<Network>,
    pub(crate) access_points: Collection<AccessPoint>,
    pub(crate) clients: Collection<Client>,
    pub(crate) alerts: Collection<Alert>,
    pub(crate) users: Collection<User>,
    pub(crate) settings: RwLock<Settings>,
    next_id: AtomicU64,
}

impl MockStore {
    /// An empty store. Useful for tests that seed their own fixtures.
    pub fn empty() -> Self {
        Self {
            networks: Collection::new(),
            access_points: Collection::new(),
            clients: Collection::new(),
            alerts: Collection::new(),
            users: Collection::new(),
            settings: RwLock::new(Settings::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The standard deterministic fleet.
    pub fn seeded() -> Self {
        let store = Self::empty();
        for n in seed::networks() {
            store.networks.upsert(n);
        }
        for ap in seed::access_points() {
            store.access_points.upsert(ap);
        }
        for c in seed::clients() {
            store.clients.upsert(c);
        }
        for a in seed::alerts() {
            store.alerts.upsert(a);
        }
        for u in seed::users() {
            store.users.upsert(u);
        }
        *store
            .settings
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = seed::settings();
        store
    }

    /// Mint a deterministic id like `net-new-1`. Counter-based rather
    /// than random so repeated runs produce identical ids.
    pub(crate) fn mint_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-new-{n}")
    }

    pub fn network_count(&self) -> usize {
        self.networks.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_matches_the_fixture_sizes() {
        let store = MockStore::seeded();
        assert_eq!(store.network_count(), 3);
        assert_eq!(store.access_points.len(), 3);
        assert_eq!(store.client_count(), 22);
        assert_eq!(store.alerts.len(), 3);
        assert_eq!(store.users.len(), 3);
    }

    #[test]
    fn stores_are_independent() {
        let a = MockStore::seeded();
        let b = MockStore::seeded();
        a.networks.remove("net-iot");
        assert_eq!(a.network_count(), 2);
        assert_eq!(b.network_count(), 3, "no cross-store leakage");
    }

    #[test]
    fn minted_ids_are_unique_and_deterministic() {
        let a = MockStore::empty();
        let first = a.mint_id("net");
        let second = a.mint_id("net");
        assert_ne!(first, second);

        let b = MockStore::empty();
        assert_eq!(b.mint_id("net"), first, "fresh store repeats the sequence");
    }
}
