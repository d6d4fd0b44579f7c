/// Fixed, ordered set of dashboard entries
///
/// Each entry resolves to what activating it means (fetch a metric or
/// exit), so callers never map indices to behavior themselves.

use std::sync::Arc;

/// Live system metric backing a data entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Memory,
    Disk,
    User,
}

/// What an entry does when it becomes current or is activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Metric(Metric),
    Quit,
}

/// A selectable row in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricEntry {
    pub kind: EntryKind,
    /// Short name for the help footer
    pub label: &'static str,
    pub primary_text: &'static str,
    pub description: &'static str,
    /// Shown in place of live data: before the first fetch, or for Quit
    pub static_detail: &'static str,
    pub shortcut: char,
}

impl MetricEntry {
    pub fn metric(&self) -> Option<Metric> {
        match self.kind {
            EntryKind::Metric(metric) => Some(metric),
            EntryKind::Quit => None,
        }
    }

    pub fn is_refreshable(&self) -> bool {
        self.metric().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCatalog {
    entries: Vec<MetricEntry>,
}

impl MetricCatalog {
    /// Memory, Disk, User, Quit, in that order
    pub fn standard() -> Arc<Self> {
        Arc::new(Self {
            entries: vec![
                MetricEntry {
                    kind: EntryKind::Metric(Metric::Memory),
                    label: "Memory",
                    primary_text: "Get memory usage",
                    description: "View memory usage",
                    static_detail: "No memory usage information available",
                    shortcut: 'a',
                },
                MetricEntry {
                    kind: EntryKind::Metric(Metric::Disk),
                    label: "Disk",
                    primary_text: "Get disk usage",
                    description: "Check disk space",
                    static_detail: "No disk usage information available",
                    shortcut: 'b',
                },
                MetricEntry {
                    kind: EntryKind::Metric(Metric::User),
                    label: "User",
                    primary_text: "Get the current logged in user",
                    description: "Show current user",
                    static_detail: "Current user: Unknown user",
                    shortcut: 'c',
                },
                MetricEntry {
                    kind: EntryKind::Quit,
                    label: "Quit",
                    primary_text: "Quit",
                    description: "Quit application",
                    static_detail: "Press to exit the application",
                    shortcut: 'q',
                },
            ],
        })
    }

    pub fn entries(&self) -> &[MetricEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&MetricEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of_shortcut(&self, key: char) -> Option<usize> {
        self.entries.iter().position(|entry| entry.shortcut == key)
    }

    /// Entry for a given metric, if the catalog carries one
    pub fn entry_for(&self, metric: Metric) -> Option<&MetricEntry> {
        self.entries.iter().find(|entry| entry.metric() == Some(metric))
    }
}
