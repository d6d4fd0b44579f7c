pub mod catalog;
pub mod errors;
pub mod metrics;
pub mod probe;
pub mod refresh;
pub mod selection;

pub use catalog::{EntryKind, Metric, MetricCatalog, MetricEntry};
pub use errors::{MetricError, SanitizedError};
pub use metrics::{FetchResult, MetricProvider, SystemMetricProvider};
pub use probe::{HostProbe, SystemProbe};
pub use refresh::{RefreshScheduler, RefreshUpdate};
pub use selection::{SelectionState, Transition};
