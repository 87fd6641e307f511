//! AeroList - an extended list view for Win32
//!
//! Adds to a standard details-style list view:
//!
//! - a fast context menu shown directly on right-button press
//! - a key index grouping rows under application-defined keys
//! - regex filtering and duplicate detection over a column
//! - the "explorer" visual theme, applied once the native control exists
//!
//! The list model, key index and context menu are portable and build on
//! every platform. The native host in `window` is only compiled on Windows.

pub mod config;
pub mod context_menu;
pub mod error;
pub mod events;
pub mod item;
pub mod key_index;
pub mod list_view;
pub mod utils;
#[cfg(target_os = "windows")]
pub mod window;

pub use config::Config;
pub use context_menu::{FastContextMenu, FastContextMenuItem, MenuAction, MenuItemId};
pub use error::{AeroListError, Result};
pub use events::{
    HandleReadyHandler, MenuPresenter, MouseButton, Point, PointerDownHandler, PointerEvent,
    ThemeHost,
};
pub use item::{ItemId, ListItem};
pub use list_view::{AeroListView, ControlStyle, ViewMode};
