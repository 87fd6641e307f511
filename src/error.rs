//! Error types for AeroList
//!
//! This module defines the error type shared by the portable list model
//! and the Win32 host, following the thin-wrapper nature of the control:
//! only a handful of conditions can actually fail.

use crate::item::ItemId;
use thiserror::Error;

/// Result type alias using AeroListError
pub type Result<T> = std::result::Result<T, AeroListError>;

/// Main error type for AeroList operations
#[derive(Error, Debug)]
pub enum AeroListError {
    /// A column index past the last column of an item
    #[error("Column {column} is out of range (item has {len} columns)")]
    ColumnOutOfRange { column: usize, len: usize },

    /// The filter pattern is not a valid regular expression
    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The item is already part of the list's item collection
    #[error("Item {0} is already in the list")]
    ItemAlreadyPresent(ItemId),

    /// Window creation failed
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    /// Window class registration failed
    #[error("Failed to register window class: {0}")]
    WindowClassRegistration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Windows API error
    #[cfg(target_os = "windows")]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AeroListError {
    /// Creates a new column range error
    pub fn column_out_of_range(column: usize, len: usize) -> Self {
        Self::ColumnOutOfRange { column, len }
    }

    /// Creates a new window creation error with context
    pub fn window_creation(msg: impl Into<String>) -> Self {
        Self::WindowCreation(msg.into())
    }

    /// Creates a new configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
