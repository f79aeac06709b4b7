// ── Keyed entity collection for the mock store ──
//
// DashMap-backed so concurrently spawned UI tasks can hit the store
// without external locking. Listing is sorted by id: DashMap iteration
// order is arbitrary and the mock layer must stay deterministic.

use dashmap::DashMap;

use crate::model::Entity;

pub(crate) struct Collection<T: Entity + Clone + Send + Sync + 'static> {
    by_id: DashMap<String, T>,
}

impl<T: Entity + Clone + Send + Sync + 'static> Collection<T> {
    pub(crate) fn new() -> Self {
        Self {
            by_id: DashMap::new(),
        }
    }

    /// Insert or replace. Returns `true` if the id was new.
    pub(crate) fn upsert(&self, entity: T) -> bool {
        self.by_id.insert(entity.id().to_owned(), entity).is_none()
    }

    pub(crate) fn get(&self, id: &str) -> Option<T> {
        self.by_id.get(id).map(|r| r.value().clone())
    }

    pub(crate) fn remove(&self, id: &str) -> Option<T> {
        self.by_id.remove(id).map(|(_, v)| v)
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Whether any entity satisfies `pred`.
    pub(crate) fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.by_id.iter().any(|r| pred(r.value()))
    }

    /// All entities, sorted by id for stable output.
    pub(crate) fn list(&self) -> Vec<T> {
        let mut all: Vec<T> = self.by_id.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        id: String,
        value: u32,
    }

    impl Entity for Rec {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn rec(id: &str, value: u32) -> Rec {
        Rec {
            id: id.into(),
            value,
        }
    }

    #[test]
    fn upsert_reports_new_vs_replace() {
        let col = Collection::new();
        assert!(col.upsert(rec("a", 1)));
        assert!(!col.upsert(rec("a", 2)));
        assert_eq!(col.get("a").unwrap().value, 2);
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn list_is_sorted_by_id() {
        let col = Collection::new();
        col.upsert(rec("c", 3));
        col.upsert(rec("a", 1));
        col.upsert(rec("b", 2));

        let ids: Vec<String> = col.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_returns_the_entity() {
        let col = Collection::new();
        col.upsert(rec("a", 1));
        assert_eq!(col.remove("a").unwrap().value, 1);
        assert!(col.get("a").is_none());
        assert!(!col.contains("a"));
    }
}
