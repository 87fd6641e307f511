//! AeroList demo
//!
//! Opens a window hosting an extended list view filled with sample files
//! grouped by folder. Right-click the list for the fast context menu:
//!
//! - remove rows whose name repeats an earlier row
//! - keep only text files (regex filter on the name column)
//! - remove the "Pictures" group
//! - restore the sample rows
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug aerolist.exe
//! ```

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use aerolist::config::Config;
use aerolist::error::Result;
use aerolist::item::ListItem;
use aerolist::list_view::AeroListView;
use aerolist::utils::format_file_size;

/// Sample rows: (group key, name, size in bytes)
const SAMPLE_FILES: &[(&str, &str, u64)] = &[
    ("Documents", "report.txt", 18_432),
    ("Documents", "budget.xlsx", 96_100),
    ("Documents", "notes.txt", 2_048),
    ("Pictures", "holiday.jpg", 2_310_000),
    ("Pictures", "notes.txt", 1_024),
    ("Pictures", "avatar.png", 54_000),
    ("Music", "theme.mp3", 4_200_000),
    ("Music", "holiday.jpg", 2_310_000),
];

/// Application entry point
///
/// Initializes logging, loads configuration and runs the demo window.
fn main() {
    // Initialize logging
    init_logging();

    log::info!("AeroList demo starting up...");

    if let Err(e) = run() {
        log::error!("Application error: {}", e);
        show_error_dialog(&format!("AeroList encountered an error:\n\n{}", e));
        std::process::exit(1);
    }

    log::info!("AeroList demo shutting down.");
}

/// Main application logic
///
/// Separated from main() for proper error handling.
#[cfg(target_os = "windows")]
fn run() -> Result<()> {
    let config = Config::load();
    log::info!("Configuration loaded");

    let case_insensitive = config.list.filter_case_insensitive;
    aerolist::window::create_and_run(config, |list| demo::setup(list, case_insensitive))
}

#[cfg(not(target_os = "windows"))]
fn run() -> Result<()> {
    let config = Config::load();

    // Exercise the model so the demo still shows something useful
    let mut list = AeroListView::new();
    populate(&mut list)?;
    log::info!(
        "{} sample rows in {} groups, {} duplicate names",
        list.len(),
        list.key_count(),
        list.get_duplicates(0)?.len()
    );
    if let Some(matches) = list.filter(r"\.txt$", 0, config.list.filter_case_insensitive)? {
        log::info!("{} text files", matches.len());
    }

    log::warn!("The AeroList window is only available on Windows");
    Ok(())
}

/// Fills the list with the sample rows, grouped by folder
fn populate(list: &mut AeroListView) -> Result<()> {
    list.remove_all_key_items(true);
    list.clear_items();

    for (group, name, size) in SAMPLE_FILES {
        let item = ListItem::new(*name)
            .sub_item(*group)
            .sub_item(format_file_size(*size))
            .tooltip(format!("{}\\{}", group, name));
        list.add_key_item(group, item)?;
    }
    Ok(())
}

#[cfg(target_os = "windows")]
mod demo {
    use super::populate;
    use aerolist::context_menu::MenuAction;
    use aerolist::error::Result;
    use aerolist::window::NativeListView;
    use std::rc::{Rc, Weak};

    /// Wraps a list operation as a menu action holding only a weak handle
    fn action<F>(list: &Rc<NativeListView>, f: F) -> Option<MenuAction>
    where
        F: Fn(&NativeListView) + 'static,
    {
        let weak: Weak<NativeListView> = Rc::downgrade(list);
        let action: MenuAction = Rc::new(move || {
            if let Some(list) = weak.upgrade() {
                f(&list);
            }
        });
        Some(action)
    }

    pub fn setup(list: &Rc<NativeListView>, case_insensitive: bool) -> Result<()> {
        list.update(populate)?;

        let remove_duplicates = action(list, |list| {
            list.update(|model| match model.get_duplicates(0) {
                Ok(duplicates) => {
                    for item in &duplicates {
                        model.remove_item(item.id());
                    }
                    log::info!("Removed {} duplicate rows", duplicates.len());
                }
                Err(e) => log::error!("Duplicate scan failed: {}", e),
            });
        });

        let keep_text_files = action(list, move |list| {
            list.update(|model| {
                let matches = match model.filter(r"\.txt$", 0, case_insensitive) {
                    Ok(Some(matches)) => matches,
                    Ok(None) => return,
                    Err(e) => {
                        log::error!("Filter failed: {}", e);
                        return;
                    }
                };
                if let Err(e) = model.replace_items(matches) {
                    log::error!("Failed to replace rows: {}", e);
                }
            });
        });

        let remove_pictures = action(list, |list| {
            let existed = list.update(|model| model.remove_key_items("Pictures", true));
            log::info!("Pictures group removed: {}", existed);
        });

        let restore = action(list, |list| {
            if let Err(e) = list.update(populate) {
                log::error!("Failed to restore rows: {}", e);
            }
        });

        list.update(|model| {
            model.add_fast_context_menu_item("Remove duplicate names", remove_duplicates);
            model.add_fast_context_menu_item("Keep only text files", keep_text_files);
            model.add_fast_context_menu_item("Remove Pictures group", remove_pictures);
            model.add_fast_context_menu_item("Restore sample rows", restore);
        });

        Ok(())
    }
}

/// Initializes the logging system
///
/// Uses env_logger with a custom format.
/// Set RUST_LOG environment variable to control log level.
fn init_logging() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let level_style = match record.level() {
                log::Level::Error => "\x1b[31m", // Red
                log::Level::Warn => "\x1b[33m",  // Yellow
                log::Level::Info => "\x1b[32m",  // Green
                log::Level::Debug => "\x1b[36m", // Cyan
                log::Level::Trace => "\x1b[90m", // Gray
            };

            writeln!(
                buf,
                "{}{:5}\x1b[0m {} - {}",
                level_style,
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Shows an error dialog to the user
///
/// Uses Windows MessageBox for displaying errors.
#[cfg(target_os = "windows")]
fn show_error_dialog(message: &str) {
    use aerolist::utils::to_wide_string;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    let title = to_wide_string("AeroList Error");
    let text = to_wide_string(message);

    unsafe {
        MessageBoxW(
            HWND::default(),
            windows::core::PCWSTR(text.as_ptr()),
            windows::core::PCWSTR(title.as_ptr()),
            MB_ICONERROR | MB_OK,
        );
    }
}

#[cfg(not(target_os = "windows"))]
fn show_error_dialog(message: &str) {
    eprintln!("{}", message);
}
