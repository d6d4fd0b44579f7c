/// Dashboard constants: names, allow-list, defaults and palette

use ratatui::style::Color;
use std::time::Duration;

/// Directory name used under the platform config and cache dirs
pub const APP_DIR_NAME: &str = "current-state";

/// Environment variable holding the tracing filter
pub const LOG_ENV_VAR: &str = "CURRENT_STATE_LOG";

pub const LOG_FILE_NAME: &str = "current-state.log";

/// Filesystem paths that are safe to query for disk usage
pub const ALLOWED_DISK_PATHS: &[&str] = &[
    "/",     // Root filesystem
    "/home", // User home directories
    "/tmp",  // Temporary files
];

// Layout and timing defaults
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MIN_TERMINAL_WIDTH: u16 = 80;
pub const DEFAULT_LEFT_COLUMN_WEIGHT: u16 = 1;
pub const DEFAULT_RIGHT_COLUMN_WEIGHT: u16 = 2;
pub const DEFAULT_TITLE_HEIGHT: u16 = 1;
pub const DEFAULT_FOOTER_HEIGHT: u16 = 1;
pub const DEFAULT_TOP_SPACER_HEIGHT: u16 = 1;
pub const DEFAULT_DISK_PATH: &str = "/";

/// How long the UI loop waits for input before redrawing
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

// Colors used throughout the UI
pub const COLOR_PRIMARY: Color = Color::Green;
pub const COLOR_SECONDARY: Color = Color::Yellow;
pub const COLOR_TEXT: Color = Color::White;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_ROW_SECONDARY: Color = Color::Cyan;
pub const COLOR_ROW_SECONDARY_SELECTED: Color = Color::Magenta;
pub const COLOR_SELECTED_TEXT: Color = Color::Black;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_paths_are_absolute() {
        for path in ALLOWED_DISK_PATHS {
            assert!(path.starts_with('/'), "{} is not absolute", path);
        }
        assert!(ALLOWED_DISK_PATHS.contains(&DEFAULT_DISK_PATH));
    }
}
