pub mod dashboard;
pub mod viewport;

// The dashboard is a single screen:
// - left column: the metric list (Memory, Disk, User, Quit)
// - right column: details pane for the selected entry
// - title line and shortcut footer around them
//
// Overlays:
// - error acknowledgment dialog after a failed fetch
// - width warning that replaces the layout on narrow terminals

pub use dashboard::{Dashboard, Overlays, RowTone, RowView};
pub use viewport::{ViewportChange, ViewportGuard, WidthWarning};
