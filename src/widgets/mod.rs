// Custom widgets built on ratatui primitives.
//
// The dashboard itself uses the built-in List, Paragraph and Block widgets;
// only the modal dialog needs its own type.
pub mod dialog;

pub use dialog::OkDialog;
