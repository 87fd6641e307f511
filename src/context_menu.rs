//! Fast context menu entries
//!
//! The fast context menu is a plain list of labelled actions that the list
//! view shows itself on right-button press, instead of waiting for the
//! toolkit's regular context menu activation.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Zero-argument action fired when a menu entry is clicked
pub type MenuAction = Rc<dyn Fn()>;

/// Source of menu entry identities, shared by every menu in the process
static NEXT_MENU_ITEM_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a menu entry
///
/// Not a native command id: native menus number their commands by position,
/// see `FastContextMenu::commands`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuItemId(u32);

impl MenuItemId {
    fn next() -> Self {
        Self(NEXT_MENU_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// A single entry of the fast context menu
pub struct FastContextMenuItem {
    id: MenuItemId,
    text: String,
    action: MenuAction,
    enable_click_action: Cell<bool>,
}

impl FastContextMenuItem {
    fn new(id: MenuItemId, text: &str, action: MenuAction) -> Self {
        Self {
            id,
            text: text.to_string(),
            action,
            enable_click_action: Cell::new(true),
        }
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    /// Label shown in the menu
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn click_action(&self) -> &MenuAction {
        &self.action
    }

    /// Whether clicking the entry fires its action
    pub fn enable_click_action(&self) -> bool {
        self.enable_click_action.get()
    }

    pub fn set_enable_click_action(&self, enabled: bool) {
        self.enable_click_action.set(enabled);
    }

    /// Handles a click on the entry
    ///
    /// Returns whether the action was fired.
    pub fn click(&self) -> bool {
        if !self.enable_click_action.get() {
            log::debug!("Menu item {:?} clicked while disabled", self.text);
            return false;
        }

        (self.action)();
        true
    }
}

impl fmt::Debug for FastContextMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastContextMenuItem")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("enable_click_action", &self.enable_click_action.get())
            .finish_non_exhaustive()
    }
}

/// The ordered set of fast context menu entries
#[derive(Debug, Default)]
pub struct FastContextMenu {
    items: Vec<Rc<FastContextMenuItem>>,
}

impl FastContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new entry
    ///
    /// Returns `None`, and registers nothing, when `text` is blank or no
    /// action is given.
    pub fn add(&mut self, text: &str, action: Option<MenuAction>) -> Option<Rc<FastContextMenuItem>> {
        if text.trim().is_empty() {
            return None;
        }
        let action = action?;

        let item = Rc::new(FastContextMenuItem::new(MenuItemId::next(), text, action));
        self.items.push(Rc::clone(&item));
        log::debug!("Added fast context menu item {:?}", text);
        Some(item)
    }

    /// Removes the entry if it is registered in this menu
    ///
    /// Entries are matched by address, so a handle from another menu never
    /// removes anything here.
    pub fn remove(&mut self, item: &FastContextMenuItem) -> bool {
        let before = self.items.len();
        self.items
            .retain(|registered| !std::ptr::eq(Rc::as_ptr(registered), item));
        before != self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Rc<FastContextMenuItem>] {
        &self.items
    }

    pub fn get(&self, id: MenuItemId) -> Option<&Rc<FastContextMenuItem>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Native command ids for the current entries, in display order
    ///
    /// Commands are numbered from 1 by position, so they always fit the
    /// 16-bit command range and 0 stays free for "nothing chosen".
    pub fn commands(&self) -> impl Iterator<Item = (u16, &Rc<FastContextMenuItem>)> {
        self.items
            .iter()
            .take(usize::from(u16::MAX))
            .enumerate()
            .map(|(index, item)| (index as u16 + 1, item))
    }

    /// Maps a native command id from `commands` back to its entry
    pub fn id_for_command(&self, command: u32) -> Option<MenuItemId> {
        let index = usize::try_from(command).ok()?.checked_sub(1)?;
        self.items.get(index).map(|item| item.id)
    }

    /// Dispatches a command chosen from the shown menu
    ///
    /// Unknown ids are ignored. Returns whether an action was fired.
    pub fn invoke(&self, id: MenuItemId) -> bool {
        match self.get(id) {
            Some(item) => item.click(),
            None => {
                log::debug!("Ignoring unknown menu command {}", id.value());
                false
            }
        }
    }
}
