/// Helper utilities for the dashboard

use std::path::{Component, Path, PathBuf};

use crate::utils::constants::ALLOWED_DISK_PATHS;

/// Format bytes to human-readable size
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Lexically clean a path: drop `.` segments and trailing separators,
/// resolve `..` against the preceding segment. Never touches the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Whether a disk-usage query for `path` is permitted
pub fn is_allowed_disk_path(path: &Path) -> bool {
    let normalized = normalize_path(path);
    ALLOWED_DISK_PATHS
        .iter()
        .any(|allowed| normalized == Path::new(allowed))
}
