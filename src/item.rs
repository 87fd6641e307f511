//! List rows and the primary item collection
//!
//! A `ListItem` is one row of the list: the item text in column 0 followed
//! by its sub-item texts. Every item carries an `ItemId` assigned when it is
//! created; clones share the id, which is what lets the key index refer to
//! rows without owning them.

use crate::error::{AeroListError, Result};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of item identities, unique for the lifetime of the process
static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a list row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, used as the native row parameter
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single list row
///
/// Equality is identity: two items are equal when they are clones of the
/// same row, regardless of their texts.
#[derive(Debug, Clone)]
pub struct ListItem {
    id: ItemId,
    columns: Vec<String>,
    tooltip: Option<String>,
}

impl ListItem {
    /// Creates a row with the given item text and no sub-items
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::next(),
            columns: vec![text.into()],
            tooltip: None,
        }
    }

    /// Creates a row from all of its column texts
    ///
    /// An empty iterator yields a row whose item text is empty, since a row
    /// always has column 0.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            columns.push(String::new());
        }

        Self {
            id: ItemId::next(),
            columns,
            tooltip: None,
        }
    }

    /// Appends a sub-item column (builder style)
    pub fn sub_item(mut self, text: impl Into<String>) -> Self {
        self.columns.push(text.into());
        self
    }

    /// Sets the tooltip shown when hovering the row (builder style)
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Item text (column 0)
    pub fn text(&self) -> &str {
        &self.columns[0]
    }

    /// All column texts, item text first
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn tooltip_text(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Text of the given column
    ///
    /// # Errors
    /// `ColumnOutOfRange` when the row has no such column.
    pub fn column_text(&self, column: usize) -> Result<&str> {
        self.columns
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| AeroListError::column_out_of_range(column, self.columns.len()))
    }

    /// Replaces the text of an existing column, or appends empty columns up
    /// to it first
    pub fn set_column_text(&mut self, column: usize, text: impl Into<String>) {
        if column >= self.columns.len() {
            self.columns.resize(column + 1, String::new());
        }
        self.columns[column] = text.into();
    }
}

impl PartialEq for ListItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ListItem {}

/// The ordered primary collection of rows
///
/// Display order is insertion order. Each identity appears at most once.
#[derive(Debug, Default, Clone)]
pub struct ItemCollection {
    items: Vec<ListItem>,
    ids: HashSet<ItemId>,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[ListItem] {
        &self.items
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    /// Display index of the row with the given identity
    pub fn position(&self, id: ItemId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.items.iter().position(|item| item.id == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&ListItem> {
        self.position(id).map(|index| &self.items[index])
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut ListItem> {
        let index = self.position(id)?;
        self.items.get_mut(index)
    }

    /// Appends a row
    ///
    /// # Errors
    /// `ItemAlreadyPresent` if a row with the same identity is already held.
    pub fn push(&mut self, item: ListItem) -> Result<()> {
        if !self.ids.insert(item.id) {
            return Err(AeroListError::ItemAlreadyPresent(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes the row with the given identity, returning it if it was held
    pub fn remove(&mut self, id: ItemId) -> Option<ListItem> {
        let index = self.position(id)?;
        self.ids.remove(&id);
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    /// Replaces the whole collection with `items`, in order
    ///
    /// The collection is left untouched if `items` repeats an identity.
    pub fn replace(&mut self, items: Vec<ListItem>) -> Result<()> {
        let mut ids = HashSet::with_capacity(items.len());
        for item in &items {
            if !ids.insert(item.id) {
                return Err(AeroListError::ItemAlreadyPresent(item.id));
            }
        }
        self.items = items;
        self.ids = ids;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ItemCollection {
    type Item = &'a ListItem;
    type IntoIter = std::slice::Iter<'a, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
