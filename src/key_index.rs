//! Secondary key index over list rows
//!
//! Groups rows under application-defined string keys. The index never owns
//! rows: it stores `ItemId`s, and the list view resolves them against its
//! item collection. Groups keep insertion order, keys keep the order in which
//! they were first used.

use crate::item::ItemId;
use std::collections::HashMap;

/// Ordered multi-map from key to row identities
///
/// A key is present only while its group is non-empty.
#[derive(Debug, Default, Clone)]
pub struct KeyIndex {
    groups: HashMap<String, Vec<ItemId>>,
    order: Vec<String>,
}

impl KeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to the group for `key`, creating the group if needed
    pub fn insert(&mut self, key: &str, id: ItemId) {
        match self.groups.get_mut(key) {
            Some(group) => group.push(id),
            None => {
                log::trace!("Creating key group {:?}", key);
                self.groups.insert(key.to_string(), vec![id]);
                self.order.push(key.to_string());
            }
        }
    }

    /// Identities grouped under `key`, in insertion order
    pub fn get(&self, key: &str) -> &[ItemId] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    /// Removes the group for `key`, returning its identities
    pub fn remove(&mut self, key: &str) -> Option<Vec<ItemId>> {
        let group = self.groups.remove(key)?;
        self.order.retain(|k| k != key);
        Some(group)
    }

    /// Empties the index, returning every group in key order
    pub fn drain(&mut self) -> Vec<(String, Vec<ItemId>)> {
        let order = std::mem::take(&mut self.order);
        let mut groups = std::mem::take(&mut self.groups);

        order
            .into_iter()
            .filter_map(|key| groups.remove(&key).map(|group| (key, group)))
            .collect()
    }

    /// Keys in first-use order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keeps only the identities for which `keep` returns true
    ///
    /// Groups left empty are dropped. Returns the number of identities
    /// removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(ItemId) -> bool,
    {
        let mut removed = 0;

        for group in self.groups.values_mut() {
            let before = group.len();
            group.retain(|id| keep(*id));
            removed += before - group.len();
        }

        if removed > 0 {
            let groups = &mut self.groups;
            self.order.retain(|key| {
                let empty = groups.get(key).map_or(true, Vec::is_empty);
                if empty {
                    log::trace!("Dropping emptied key group {:?}", key);
                    groups.remove(key);
                }
                !empty
            });
        }

        removed
    }

    /// Removes `id` from every group it appears in
    pub fn prune(&mut self, id: ItemId) -> usize {
        self.retain(|other| other != id)
    }
}
