//! Host event interfaces
//!
//! The list view does not subclass anything itself. The host toolkit
//! delivers pointer presses and the "native handle ready" notification
//! through the handler traits below, and supplies the collaborators that
//! actually show a menu or apply a visual theme.

use crate::context_menu::{FastContextMenu, FastContextMenuItem, MenuItemId};
use std::rc::Rc;

/// Pointer button that triggered an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A point in client coordinates of the control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A pointer-down event delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub button: MouseButton,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(button: MouseButton, x: i32, y: i32) -> Self {
        Self {
            button,
            position: Point::new(x, y),
        }
    }
}

/// Shows a context menu on behalf of the control
pub trait MenuPresenter {
    /// Shows `menu` at `at` (client coordinates) and blocks until it is
    /// dismissed. Returns the command chosen, if any.
    fn show_menu(&mut self, menu: &FastContextMenu, at: Point) -> Option<MenuItemId>;
}

/// Applies a named visual theme to the control's native window
pub trait ThemeHost {
    /// Returns whether the platform accepted the theme.
    fn apply_theme(&mut self, sub_app_name: &str) -> bool;
}

/// Receives pointer-down events from the host
pub trait PointerDownHandler {
    /// Handles a pointer press.
    ///
    /// Returns the menu entry the user picked, if a menu was shown and an
    /// entry chosen. The entry is not clicked yet: the caller clicks it once
    /// it no longer holds the control borrowed, so the action is free to
    /// modify the control.
    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        presenter: &mut dyn MenuPresenter,
    ) -> Option<Rc<FastContextMenuItem>>;
}

/// Receives the notification that the native handle now exists
pub trait HandleReadyHandler {
    fn on_handle_ready(&mut self, theme: &mut dyn ThemeHost);
}
