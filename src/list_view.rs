//! The extended list view
//!
//! `AeroListView` is the platform-independent half of the control: it owns
//! the rows, the key index and the fast context menu, and implements the
//! handler traits the host toolkit drives. The Win32 host in `window`
//! mirrors its rows into a native list control.
//!
//! Rows leaving the item collection through any method here are also
//! removed from the key index, so every indexed row is always in the list.
//! `remove_key_items(key, false)` is the one way to untrack rows while
//! keeping them displayed.

use crate::context_menu::{FastContextMenu, FastContextMenuItem, MenuAction};
use crate::error::Result;
use crate::events::{
    HandleReadyHandler, MenuPresenter, MouseButton, PointerDownHandler, PointerEvent, ThemeHost,
};
use crate::item::{ItemCollection, ItemId, ListItem};
use crate::key_index::KeyIndex;
use regex::RegexBuilder;
use std::collections::HashSet;
use std::rc::Rc;

/// Theme applied once the native control exists
pub const EXPLORER_THEME: &str = "Explorer";

/// Layout of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    LargeIcon,
    SmallIcon,
    List,
    /// Report layout with column headers
    Details,
}

/// Fixed presentation defaults of the control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlStyle {
    pub double_buffered: bool,
    pub border: bool,
    pub full_row_select: bool,
    pub show_item_tooltips: bool,
    pub view: ViewMode,
}

impl Default for ControlStyle {
    fn default() -> Self {
        Self {
            double_buffered: true,
            border: false,
            full_row_select: true,
            show_item_tooltips: true,
            view: ViewMode::Details,
        }
    }
}

/// List view with a fast context menu, keyed row groups, filtering and
/// duplicate detection
#[derive(Debug)]
pub struct AeroListView {
    items: ItemCollection,
    key_items: KeyIndex,
    fast_context_menu: FastContextMenu,
    enable_fast_context_menu: bool,
    legacy_context_menu: bool,
    style: ControlStyle,
    theme: String,
    theme_applied: bool,
}

impl Default for AeroListView {
    fn default() -> Self {
        Self::new()
    }
}

impl AeroListView {
    pub fn new() -> Self {
        Self::with_theme(EXPLORER_THEME)
    }

    /// Creates a list view that applies `theme` instead of the explorer
    /// theme when its handle is ready
    pub fn with_theme(theme: impl Into<String>) -> Self {
        Self {
            items: ItemCollection::new(),
            key_items: KeyIndex::new(),
            fast_context_menu: FastContextMenu::new(),
            enable_fast_context_menu: true,
            legacy_context_menu: false,
            style: ControlStyle::default(),
            theme: theme.into(),
            theme_applied: false,
        }
    }

    pub fn style(&self) -> ControlStyle {
        self.style
    }

    pub fn enable_fast_context_menu(&self) -> bool {
        self.enable_fast_context_menu
    }

    pub fn set_enable_fast_context_menu(&mut self, enabled: bool) {
        self.enable_fast_context_menu = enabled;
    }

    /// Whether a regular (toolkit) context menu is attached to the control
    pub fn has_legacy_context_menu(&self) -> bool {
        self.legacy_context_menu
    }

    /// Marks a regular context menu as attached; while set, the fast
    /// context menu is never shown
    pub fn set_legacy_context_menu_attached(&mut self, attached: bool) {
        self.legacy_context_menu = attached;
    }

    /// Registers a fast context menu entry
    ///
    /// Returns `None` when `text` is blank or `action` is missing.
    pub fn add_fast_context_menu_item(
        &mut self,
        text: &str,
        action: Option<MenuAction>,
    ) -> Option<Rc<FastContextMenuItem>> {
        self.fast_context_menu.add(text, action)
    }

    pub fn remove_fast_context_menu_item(&mut self, item: &FastContextMenuItem) -> bool {
        self.fast_context_menu.remove(item)
    }

    pub fn remove_all_fast_context_menu_items(&mut self) {
        self.fast_context_menu.clear();
    }

    pub fn fast_context_menu(&self) -> &FastContextMenu {
        &self.fast_context_menu
    }

    /// Rows in display order
    pub fn items(&self) -> &[ListItem] {
        self.items.as_slice()
    }

    pub fn item(&self, id: ItemId) -> Option<&ListItem> {
        self.items.get(id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut ListItem> {
        self.items.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an untracked row
    pub fn add_item(&mut self, item: ListItem) -> Result<()> {
        self.items.push(item)
    }

    /// Removes a row from the list and from every key group
    pub fn remove_item(&mut self, id: ItemId) -> Option<ListItem> {
        let removed = self.items.remove(id)?;
        self.key_items.prune(id);
        Some(removed)
    }

    /// Removes every row; the key index is emptied with it
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.key_items.drain();
    }

    /// Replaces every row with `items`, in order
    ///
    /// Key groups keep only the rows that are part of the new contents.
    /// Nothing changes if `items` repeats a row.
    pub fn replace_items<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = ListItem>,
    {
        self.items.replace(items.into_iter().collect())?;

        let collection = &self.items;
        let pruned = self.key_items.retain(|id| collection.contains(id));
        log::debug!(
            "Replaced list contents with {} items ({} keyed entries pruned)",
            self.items.len(),
            pruned
        );
        Ok(())
    }

    /// Adds a row to the list and to the group for `key`
    ///
    /// # Errors
    /// `ItemAlreadyPresent` if the row is already in the list; neither the
    /// list nor the index is modified in that case.
    pub fn add_key_item(&mut self, key: &str, item: ListItem) -> Result<()> {
        let id = item.id();
        self.items.push(item)?;
        self.key_items.insert(key, id);
        Ok(())
    }

    /// Adds each row in turn; rows before a failing one stay added
    pub fn add_key_items<I>(&mut self, key: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = ListItem>,
    {
        for item in items {
            self.add_key_item(key, item)?;
        }
        Ok(())
    }

    /// Rows grouped under `key`, in the order they were added
    ///
    /// The result is a copy; unknown keys give an empty vector.
    pub fn get_key_items(&self, key: &str) -> Vec<ListItem> {
        self.key_items
            .get(key)
            .iter()
            .filter_map(|id| self.items.get(*id).cloned())
            .collect()
    }

    /// Drops the group for `key`, returning whether it existed
    ///
    /// With `remove_from_list_view` the group's rows are removed from the
    /// list as well; without it they stay displayed but untracked.
    pub fn remove_key_items(&mut self, key: &str, remove_from_list_view: bool) -> bool {
        let Some(group) = self.key_items.remove(key) else {
            return false;
        };

        if remove_from_list_view {
            self.remove_rows(&group);
        }
        log::debug!(
            "Removed key group {:?} ({} items, rows {})",
            key,
            group.len(),
            if remove_from_list_view { "removed" } else { "kept" }
        );
        true
    }

    /// Drops every key group, optionally removing their rows from the list
    pub fn remove_all_key_items(&mut self, remove_from_list_view: bool) {
        for (_, group) in self.key_items.drain() {
            if remove_from_list_view {
                self.remove_rows(&group);
            }
        }
    }

    /// Keys in first-use order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.key_items.keys()
    }

    pub fn key_count(&self) -> usize {
        self.key_items.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.key_items.contains_key(key)
    }

    /// Removes the rows of a group already taken out of the index
    ///
    /// A listed row is tracked under at most one key, so no other group
    /// refers to these rows.
    fn remove_rows(&mut self, ids: &[ItemId]) {
        for id in ids {
            self.items.remove(*id);
        }
    }

    /// Rows whose `column` text contains a match for the regex `text`
    ///
    /// Returns `Ok(None)` for an empty pattern.
    ///
    /// # Errors
    /// `InvalidPattern` for a malformed regex, `ColumnOutOfRange` if a row
    /// has no such column.
    pub fn filter(
        &self,
        text: &str,
        column: usize,
        case_insensitive: bool,
    ) -> Result<Option<Vec<ListItem>>> {
        if text.is_empty() {
            return Ok(None);
        }

        let pattern = RegexBuilder::new(text)
            .case_insensitive(case_insensitive)
            .build()?;

        let mut matches = Vec::new();
        for item in &self.items {
            if pattern.is_match(item.column_text(column)?) {
                matches.push(item.clone());
            }
        }
        log::trace!("Filter {:?} on column {} matched {} rows", text, column, matches.len());
        Ok(Some(matches))
    }

    /// Every row whose `column` text was already seen on an earlier row
    ///
    /// First occurrences are never part of the result.
    pub fn get_duplicates(&self, column: usize) -> Result<Vec<ListItem>> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for item in &self.items {
            if !seen.insert(item.column_text(column)?) {
                duplicates.push(item.clone());
            }
        }
        Ok(duplicates)
    }
}

impl PointerDownHandler for AeroListView {
    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        presenter: &mut dyn MenuPresenter,
    ) -> Option<Rc<FastContextMenuItem>> {
        if event.button != MouseButton::Right
            || !self.enable_fast_context_menu
            || self.legacy_context_menu
            || self.fast_context_menu.is_empty()
        {
            return None;
        }

        log::debug!("Showing fast context menu at {:?}", event.position);
        let chosen = presenter.show_menu(&self.fast_context_menu, event.position)?;
        self.fast_context_menu.get(chosen).cloned()
    }
}

impl HandleReadyHandler for AeroListView {
    fn on_handle_ready(&mut self, theme: &mut dyn ThemeHost) {
        if self.theme_applied {
            return;
        }
        self.theme_applied = true;

        if theme.apply_theme(&self.theme) {
            log::debug!("Applied {:?} theme", self.theme);
        } else {
            log::debug!("Platform rejected {:?} theme", self.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context_menu::MenuItemId;
    use crate::error::AeroListError;
    use crate::events::Point;
    use std::cell::Cell;

    /// Records menu presentations and answers with a fixed choice
    #[derive(Default)]
    struct RecordingPresenter {
        shown_at: Vec<Point>,
        shown_labels: Vec<Vec<String>>,
        choice: Option<MenuItemId>,
    }

    impl MenuPresenter for RecordingPresenter {
        fn show_menu(&mut self, menu: &FastContextMenu, at: Point) -> Option<MenuItemId> {
            self.shown_at.push(at);
            self.shown_labels
                .push(menu.items().iter().map(|i| i.text().to_string()).collect());
            self.choice
        }
    }

    #[derive(Default)]
    struct RecordingTheme {
        applied: Vec<String>,
        accept: bool,
    }

    impl ThemeHost for RecordingTheme {
        fn apply_theme(&mut self, sub_app_name: &str) -> bool {
            self.applied.push(sub_app_name.to_string());
            self.accept
        }
    }

    fn counting_action() -> (Rc<Cell<u32>>, MenuAction) {
        let count = Rc::new(Cell::new(0));
        let hits = Rc::clone(&count);
        let action: MenuAction = Rc::new(move || hits.set(hits.get() + 1));
        (count, action)
    }

    fn row(name: &str, group: &str) -> ListItem {
        ListItem::new(name).sub_item(group)
    }

    fn texts(items: &[ListItem]) -> Vec<&str> {
        items.iter().map(ListItem::text).collect()
    }

    #[test]
    fn test_fixed_style_defaults() {
        let list = AeroListView::new();
        let style = list.style();
        assert!(style.double_buffered);
        assert!(!style.border);
        assert!(style.full_row_select);
        assert!(style.show_item_tooltips);
        assert_eq!(style.view, ViewMode::Details);
        assert!(list.enable_fast_context_menu());
    }

    #[test]
    fn test_menu_item_fires_only_when_enabled() {
        let mut list = AeroListView::new();
        let (count, action) = counting_action();
        let item = list.add_fast_context_menu_item("Refresh", Some(action)).unwrap();

        item.click();
        item.set_enable_click_action(false);
        item.click();

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_menu_item_rejects_blank_text_and_missing_action() {
        let mut list = AeroListView::new();
        let (_, action) = counting_action();

        assert!(list.add_fast_context_menu_item("", Some(action)).is_none());
        assert!(list.add_fast_context_menu_item("Open", None).is_none());
        assert!(list.fast_context_menu().is_empty());
    }

    #[test]
    fn test_remove_menu_items() {
        let mut list = AeroListView::new();
        let (_, action) = counting_action();
        let a = list.add_fast_context_menu_item("A", Some(Rc::clone(&action))).unwrap();
        list.add_fast_context_menu_item("B", Some(Rc::clone(&action))).unwrap();
        list.add_fast_context_menu_item("C", Some(action)).unwrap();

        assert!(list.remove_fast_context_menu_item(&a));
        assert!(!list.remove_fast_context_menu_item(&a));
        assert_eq!(list.fast_context_menu().len(), 2);

        list.remove_all_fast_context_menu_items();
        assert!(list.fast_context_menu().is_empty());
    }

    #[test]
    fn test_remove_menu_item_of_another_list_is_ignored() {
        let mut first = AeroListView::new();
        let mut second = AeroListView::new();
        let (count, action) = counting_action();
        let foreign = first
            .add_fast_context_menu_item("Copy", Some(Rc::clone(&action)))
            .unwrap();
        let own = second.add_fast_context_menu_item("Paste", Some(action)).unwrap();

        assert!(!second.remove_fast_context_menu_item(&foreign));
        assert_eq!(second.fast_context_menu().len(), 1);
        assert!(second.fast_context_menu().invoke(own.id()));
        assert_eq!(count.get(), 1);

        assert!(first.remove_fast_context_menu_item(&foreign));
        assert_eq!(second.fast_context_menu().len(), 1);
    }

    #[test]
    fn test_right_click_shows_menu_and_returns_choice() {
        let mut list = AeroListView::new();
        let (count, action) = counting_action();
        let item = list.add_fast_context_menu_item("Delete", Some(action)).unwrap();

        let mut presenter = RecordingPresenter {
            choice: Some(item.id()),
            ..Default::default()
        };
        let event = PointerEvent::new(MouseButton::Right, 30, 40);
        let chosen = list.on_pointer_down(&event, &mut presenter).unwrap();

        assert_eq!(presenter.shown_at, vec![Point::new(30, 40)]);
        assert_eq!(presenter.shown_labels, vec![vec!["Delete".to_string()]]);
        assert_eq!(chosen.id(), item.id());
        assert_eq!(count.get(), 0);
        assert!(chosen.click());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_menu_dismissed_without_choice() {
        let mut list = AeroListView::new();
        let (_, action) = counting_action();
        list.add_fast_context_menu_item("Delete", Some(action)).unwrap();

        let mut presenter = RecordingPresenter::default();
        let event = PointerEvent::new(MouseButton::Right, 0, 0);
        assert!(list.on_pointer_down(&event, &mut presenter).is_none());
        assert_eq!(presenter.shown_at.len(), 1);
    }

    #[test]
    fn test_menu_not_shown_when_gated() {
        let mut list = AeroListView::new();
        let mut presenter = RecordingPresenter::default();
        let right = PointerEvent::new(MouseButton::Right, 5, 5);

        // Empty menu
        assert!(list.on_pointer_down(&right, &mut presenter).is_none());

        let (_, action) = counting_action();
        list.add_fast_context_menu_item("Copy", Some(action)).unwrap();

        // Wrong button
        let left = PointerEvent::new(MouseButton::Left, 5, 5);
        list.on_pointer_down(&left, &mut presenter);

        // Feature disabled
        list.set_enable_fast_context_menu(false);
        list.on_pointer_down(&right, &mut presenter);

        // Legacy menu attached
        list.set_enable_fast_context_menu(true);
        list.set_legacy_context_menu_attached(true);
        list.on_pointer_down(&right, &mut presenter);

        assert!(presenter.shown_at.is_empty());

        list.set_legacy_context_menu_attached(false);
        list.on_pointer_down(&right, &mut presenter);
        assert_eq!(presenter.shown_at.len(), 1);
    }

    #[test]
    fn test_theme_applied_once() {
        let mut list = AeroListView::new();
        let mut theme = RecordingTheme::default();

        list.on_handle_ready(&mut theme);
        list.on_handle_ready(&mut theme);

        assert_eq!(theme.applied, vec![EXPLORER_THEME.to_string()]);
    }

    #[test]
    fn test_custom_theme_name() {
        let mut list = AeroListView::with_theme("DarkMode_Explorer");
        let mut theme = RecordingTheme {
            accept: true,
            ..Default::default()
        };
        list.on_handle_ready(&mut theme);
        assert_eq!(theme.applied, vec!["DarkMode_Explorer".to_string()]);
    }

    #[test]
    fn test_key_items_round_trip_in_order() {
        let mut list = AeroListView::new();
        let rows = vec![row("c", "g"), row("a", "g"), row("b", "g")];

        list.add_key_items("group", rows.clone()).unwrap();

        assert_eq!(list.get_key_items("group"), rows);
        assert_eq!(list.items(), rows.as_slice());
        assert!(list.get_key_items("unused").is_empty());
    }

    #[test]
    fn test_key_items_are_a_copy() {
        let mut list = AeroListView::new();
        list.add_key_item("k", row("a", "k")).unwrap();

        let mut copy = list.get_key_items("k");
        copy.clear();

        assert_eq!(list.get_key_items("k").len(), 1);
    }

    #[test]
    fn test_add_key_item_rejects_row_already_listed() {
        let mut list = AeroListView::new();
        let item = row("a", "x");
        list.add_key_item("x", item.clone()).unwrap();

        let result = list.add_key_item("y", item);
        assert!(matches!(result, Err(AeroListError::ItemAlreadyPresent(_))));
        assert!(!list.contains_key("y"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_key_items_is_not_atomic() {
        let mut list = AeroListView::new();
        let listed = row("listed", "");
        list.add_item(listed.clone()).unwrap();

        let fresh = row("fresh", "");
        let result = list.add_key_items("k", vec![fresh.clone(), listed, row("never", "")]);

        assert!(result.is_err());
        assert_eq!(list.get_key_items("k"), vec![fresh]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_key_items_removes_rows() {
        let mut list = AeroListView::new();
        list.add_key_items("a", vec![row("a1", "a"), row("a2", "a")]).unwrap();
        list.add_key_items("b", vec![row("b1", "b")]).unwrap();

        assert!(list.remove_key_items("a", true));
        assert_eq!(texts(list.items()), vec!["b1"]);
        assert!(!list.contains_key("a"));
        assert_eq!(texts(&list.get_key_items("b")), vec!["b1"]);

        assert!(!list.remove_key_items("a", true));
    }

    #[test]
    fn test_remove_key_items_can_keep_rows() {
        let mut list = AeroListView::new();
        list.add_key_items("a", vec![row("a1", "a"), row("a2", "a")]).unwrap();

        assert!(list.remove_key_items("a", false));
        assert_eq!(texts(list.items()), vec!["a1", "a2"]);
        assert!(list.get_key_items("a").is_empty());
        assert_eq!(list.key_count(), 0);
    }

    #[test]
    fn test_remove_all_key_items() {
        let mut list = AeroListView::new();
        let loose = row("loose", "");
        list.add_item(loose.clone()).unwrap();
        list.add_key_items("a", vec![row("a1", "a")]).unwrap();
        list.add_key_items("b", vec![row("b1", "b"), row("b2", "b")]).unwrap();

        list.remove_all_key_items(true);

        assert_eq!(list.items(), &[loose]);
        assert_eq!(list.key_count(), 0);
    }

    #[test]
    fn test_remove_all_key_items_keeping_rows() {
        let mut list = AeroListView::new();
        list.add_key_items("a", vec![row("a1", "a")]).unwrap();
        list.add_key_items("b", vec![row("b1", "b")]).unwrap();

        list.remove_all_key_items(false);

        assert_eq!(list.len(), 2);
        assert_eq!(list.keys().count(), 0);
    }

    #[test]
    fn test_removing_row_prunes_key_index() {
        let mut list = AeroListView::new();
        let a1 = row("a1", "a");
        let a2 = row("a2", "a");
        let b1 = row("b1", "b");
        list.add_key_items("a", vec![a1.clone(), a2.clone()]).unwrap();
        list.add_key_item("b", b1.clone()).unwrap();

        assert_eq!(list.remove_item(a1.id()), Some(a1));
        assert_eq!(list.get_key_items("a"), vec![a2]);

        list.remove_item(b1.id());
        assert!(!list.contains_key("b"));
        assert!(!list.remove_key_items("b", true));
    }

    #[test]
    fn test_clear_items_empties_index() {
        let mut list = AeroListView::new();
        list.add_key_items("a", vec![row("a1", "a")]).unwrap();

        list.clear_items();

        assert!(list.is_empty());
        assert_eq!(list.key_count(), 0);
    }

    #[test]
    fn test_filter_empty_text_is_none() {
        let mut list = AeroListView::new();
        list.add_item(row("alpha", "")).unwrap();
        assert!(list.filter("", 0, true).unwrap().is_none());
    }

    #[test]
    fn test_filter_matches_anywhere_in_order() {
        let mut list = AeroListView::new();
        let rows = vec![
            row("report.txt", "docs"),
            row("photo.jpg", "media"),
            row("Summary.TXT", "docs"),
            row("notes", "docs"),
        ];
        list.replace_items(rows.clone()).unwrap();

        let found = list.filter(r"\.txt", 0, true).unwrap().unwrap();
        assert_eq!(found, vec![rows[0].clone(), rows[2].clone()]);

        let found = list.filter(r"\.txt", 0, false).unwrap().unwrap();
        assert_eq!(found, vec![rows[0].clone()]);

        let found = list.filter("^doc", 1, true).unwrap().unwrap();
        assert_eq!(texts(&found), vec!["report.txt", "Summary.TXT", "notes"]);

        let found = list.filter("zzz", 0, true).unwrap().unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_filter_errors() {
        let mut list = AeroListView::new();
        list.add_item(row("alpha", "beta")).unwrap();

        assert!(matches!(
            list.filter("(", 0, true),
            Err(AeroListError::InvalidPattern(_))
        ));
        assert!(matches!(
            list.filter("a", 5, true),
            Err(AeroListError::ColumnOutOfRange { column: 5, len: 2 })
        ));
    }

    #[test]
    fn test_get_duplicates_excludes_first_occurrences() {
        let mut list = AeroListView::new();
        let rows: Vec<ListItem> = ["a", "b", "a", "a", "c", "b"]
            .iter()
            .enumerate()
            .map(|(i, value)| ListItem::new(format!("row{}", i)).sub_item(*value))
            .collect();
        list.replace_items(rows.clone()).unwrap();

        let duplicates = list.get_duplicates(1).unwrap();

        assert_eq!(
            duplicates,
            vec![rows[2].clone(), rows[3].clone(), rows[5].clone()]
        );
        let values: Vec<&str> = duplicates
            .iter()
            .map(|item| item.column_text(1).unwrap())
            .collect();
        assert_eq!(values, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_get_duplicates_bad_column() {
        let mut list = AeroListView::new();
        list.add_item(ListItem::new("only")).unwrap();
        assert!(list.get_duplicates(1).is_err());
        assert!(list.get_duplicates(0).unwrap().is_empty());
    }

    #[test]
    fn test_replace_items_discards_previous_contents() {
        let mut list = AeroListView::new();
        list.add_item(row("old", "")).unwrap();

        let rows = vec![row("x", ""), row("y", "")];
        list.replace_items(rows.clone()).unwrap();

        assert_eq!(list.items(), rows.as_slice());
    }

    #[test]
    fn test_replace_items_prunes_key_index() {
        let mut list = AeroListView::new();
        let kept = row("kept", "k");
        let dropped = row("dropped", "k");
        list.add_key_items("k", vec![kept.clone(), dropped]).unwrap();
        list.add_key_item("gone", row("gone", "gone")).unwrap();

        list.replace_items(vec![row("new", ""), kept.clone()]).unwrap();

        assert_eq!(list.get_key_items("k"), vec![kept]);
        assert!(!list.contains_key("gone"));
    }

    #[test]
    fn test_replace_items_with_repeated_row_changes_nothing() {
        let mut list = AeroListView::new();
        let old = row("old", "");
        list.add_item(old.clone()).unwrap();

        let twice = row("twice", "");
        assert!(list.replace_items(vec![twice.clone(), twice]).is_err());
        assert_eq!(list.items(), &[old]);
    }
}
