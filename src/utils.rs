//! Utility functions for AeroList
//!
//! String conversion for Win32 calls and a few small helpers shared by the
//! native host and the demo.

use crate::events::Point;

/// Converts a Rust string to a null-terminated wide string (UTF-16)
///
/// This is required for many Windows API calls that expect LPCWSTR.
///
/// # Example
/// ```
/// use aerolist::utils::to_wide_string;
/// let wide = to_wide_string("Hello");
/// assert_eq!(wide.last(), Some(&0u16));
/// ```
pub fn to_wide_string(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Extracts the client point packed into a mouse message LPARAM
///
/// Coordinates are signed 16-bit values; they go negative on multi-monitor
/// setups or while the mouse is captured.
pub fn point_from_lparam(lparam: isize) -> Point {
    let x = (lparam & 0xFFFF) as u16 as i16 as i32;
    let y = ((lparam >> 16) & 0xFFFF) as u16 as i16 as i32;
    Point::new(x, y)
}

/// Formats a file size in bytes to a human-readable string
///
/// # Returns
/// A formatted string like "1.5 MB" or "256 KB"
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wide_string() {
        let wide = to_wide_string("Test");
        assert_eq!(wide.len(), 5); // 4 chars + null terminator
        assert_eq!(wide[4], 0);
    }

    #[test]
    fn test_point_from_lparam() {
        assert_eq!(point_from_lparam(0x0014_000A), Point::new(10, 20));
        // x = -1, y = -2
        assert_eq!(point_from_lparam(0xFFFE_FFFF), Point::new(-1, -2));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1536), "2 KB");
        assert_eq!(format_file_size(1_500_000), "1.4 MB");
    }
}
