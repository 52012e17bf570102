//! Favorites and the bounded comparison stack

use log::debug;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::font::Font;
use crate::notice::Notice;
use crate::storage::{load_ids, persist_ids, KeyValueStore, COMPARE_KEY, FAVORITES_KEY};

/// Most fonts the comparison workbench takes at once.
pub const COMPARE_CAPACITY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Added,
    Removed,
    Rejected,
}

/// Insertion-ordered set of font ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList {
    ids: Vec<String>,
}

impl IdList {
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut list = Self::default();
        for id in ids {
            if !list.contains(&id) {
                list.ids.push(id);
            }
        }
        list
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        before != self.ids.len()
    }

    fn push(&mut self, id: &str) {
        self.ids.push(id.to_string());
    }

    /// Fonts for these ids, in catalog order.
    pub fn resolve<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Font> {
        catalog
            .fonts()
            .iter()
            .filter(|f| self.contains(&f.id))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Favorites {
    list: IdList,
}

impl Favorites {
    pub fn load(store: &dyn KeyValueStore, catalog: &Catalog) -> Self {
        Self {
            list: IdList::from_ids(load_ids(store, FAVORITES_KEY, catalog)),
        }
    }

    pub fn list(&self) -> &IdList {
        &self.list
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list.contains(id)
    }

    pub fn toggle(&mut self, store: &dyn KeyValueStore, id: &str) -> (Toggle, Notice) {
        let outcome = if self.list.remove(id) {
            (Toggle::Removed, Notice::info("Removed from favorites"))
        } else {
            self.list.push(id);
            (Toggle::Added, Notice::success("Added to favorites"))
        };
        debug!("favorites {:?} {id}", outcome.0);
        persist_ids(store, FAVORITES_KEY, self.list.as_slice());
        outcome
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompareStack {
    list: IdList,
}

impl CompareStack {
    pub fn load(store: &dyn KeyValueStore, catalog: &Catalog) -> Self {
        let mut ids = load_ids(store, COMPARE_KEY, catalog);
        ids.truncate(COMPARE_CAPACITY);
        Self {
            list: IdList::from_ids(ids),
        }
    }

    pub fn list(&self) -> &IdList {
        &self.list
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list.contains(id)
    }

    pub fn is_full(&self) -> bool {
        self.list.len() >= COMPARE_CAPACITY
    }

    /// Remove if present, add while there is room, otherwise refuse.
    pub fn toggle(&mut self, store: &dyn KeyValueStore, id: &str) -> (Toggle, Notice) {
        if self.list.remove(id) {
            persist_ids(store, COMPARE_KEY, self.list.as_slice());
            return (Toggle::Removed, Notice::info("Removed from comparison"));
        }
        if self.is_full() {
            return (
                Toggle::Rejected,
                Notice::error(format!(
                    "You can only compare up to {COMPARE_CAPACITY} fonts"
                )),
            );
        }
        self.list.push(id);
        persist_ids(store, COMPARE_KEY, self.list.as_slice());
        (Toggle::Added, Notice::success("Added to comparison"))
    }

    pub fn clear(&mut self, store: &dyn KeyValueStore) -> Notice {
        self.list = IdList::default();
        persist_ids(store, COMPARE_KEY, &[]);
        Notice::info("Comparison cleared")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn favorites_toggle_and_persist() {
        let catalog = Catalog::builtin();
        let store = MemoryStore::new();
        let mut favorites = Favorites::load(&store, &catalog);

        let (t, notice) = favorites.toggle(&store, "gh-mona");
        assert_eq!(t, Toggle::Added);
        assert_eq!(notice.message, "Added to favorites");
        assert_eq!(
            store.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["gh-mona"]"#)
        );

        let (t, notice) = favorites.toggle(&store, "gh-mona");
        assert_eq!(t, Toggle::Removed);
        assert_eq!(notice.message, "Removed from favorites");
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn compare_rejects_a_fourth_font_without_mutation() {
        let catalog = Catalog::builtin();
        let store = MemoryStore::new();
        let mut stack = CompareStack::load(&store, &catalog);
        for id in ["gh-mona", "gh-hubot", "pretendard"] {
            assert_eq!(stack.toggle(&store, id).0, Toggle::Added);
        }
        let before = store.get(COMPARE_KEY).unwrap();

        let (t, notice) = stack.toggle(&store, "hack-font");
        assert_eq!(t, Toggle::Rejected);
        assert!(notice.is_error());
        assert_eq!(notice.message, "You can only compare up to 3 fonts");
        assert_eq!(stack.list().len(), 3);
        assert_eq!(store.get(COMPARE_KEY).unwrap(), before);

        assert_eq!(stack.toggle(&store, "gh-hubot").0, Toggle::Removed);
        assert_eq!(stack.toggle(&store, "hack-font").0, Toggle::Added);
    }

    #[test]
    fn resolve_follows_catalog_order() {
        let catalog = Catalog::builtin();
        let list = IdList::from_ids(vec!["gh-hubot".into(), "pt-0".into()]);
        let names: Vec<&str> = list.resolve(&catalog).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["PT Sans", "Hubot Sans"]);
    }

    #[test]
    fn oversized_stored_compare_list_is_truncated() {
        let catalog = Catalog::builtin();
        let store = MemoryStore::new().with_value(
            COMPARE_KEY,
            r#"["gh-mona","gh-hubot","pretendard","hack-font"]"#,
        );
        assert_eq!(CompareStack::load(&store, &catalog).list().len(), 3);
    }
}
