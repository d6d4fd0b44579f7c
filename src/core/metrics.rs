/// Metric provider: turns OS queries into display-ready results
///
/// Every failure is sanitized before a `FetchResult` leaves this module,
/// so nothing downstream ever holds raw OS error text.

use std::path::PathBuf;

use super::catalog::Metric;
use super::errors::{sanitize, MetricError, SanitizedError};
use super::probe::{DiskStats, MemoryStats, SystemProbe};
use crate::utils::helpers::{format_bytes, is_allowed_disk_path};

/// Outcome of a single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub primary_text: String,
    pub detail_text: String,
    pub error: Option<SanitizedError>,
}

impl FetchResult {
    pub fn ok(primary_text: impl Into<String>, detail_text: impl Into<String>) -> Self {
        Self {
            primary_text: primary_text.into(),
            detail_text: detail_text.into(),
            error: None,
        }
    }

    pub fn failed(
        primary_text: impl Into<String>,
        detail_text: impl Into<String>,
        error: SanitizedError,
    ) -> Self {
        Self {
            primary_text: primary_text.into(),
            detail_text: detail_text.into(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetches the current value of a metric
///
/// Implementations must stay short and local: no network, no retries.
pub trait MetricProvider: Send + Sync {
    fn fetch(&self, metric: Metric) -> FetchResult;
}

const MEMORY_PRIMARY: &str = "Get memory usage";
const MEMORY_FALLBACK: &str = "No memory usage information available";
const DISK_PRIMARY: &str = "Get disk usage";
const DISK_FALLBACK: &str = "No disk usage information available";
const USER_PRIMARY: &str = "Get the current logged in user";
const UNKNOWN_USER: &str = "Unknown user";

/// Provider backed by a `SystemProbe`
pub struct SystemMetricProvider<P> {
    probe: P,
    disk_path: PathBuf,
}

impl<P: SystemProbe> SystemMetricProvider<P> {
    pub fn new(probe: P, disk_path: impl Into<PathBuf>) -> Self {
        Self {
            probe,
            disk_path: disk_path.into(),
        }
    }

    fn memory(&self) -> FetchResult {
        match self.probe.memory() {
            Ok(stats) => FetchResult::ok(MEMORY_PRIMARY, memory_text(&stats)),
            Err(err) => FetchResult::failed(MEMORY_PRIMARY, MEMORY_FALLBACK, sanitize(&err)),
        }
    }

    fn disk(&self) -> FetchResult {
        // The allow-list is checked before any OS call is made
        let stats = if is_allowed_disk_path(&self.disk_path) {
            self.probe.disk_usage(&self.disk_path)
        } else {
            Err(MetricError::PathNotAllowed(self.disk_path.clone()))
        };

        match stats {
            Ok(stats) => FetchResult::ok(DISK_PRIMARY, disk_text(&stats)),
            Err(err) => FetchResult::failed(DISK_PRIMARY, DISK_FALLBACK, sanitize(&err)),
        }
    }

    fn user(&self) -> FetchResult {
        match self.probe.current_user() {
            Ok(name) => FetchResult::ok(USER_PRIMARY, format!("Current user: {}", name)),
            Err(err) => FetchResult::failed(
                USER_PRIMARY,
                format!("Current user: {}", UNKNOWN_USER),
                sanitize(&err),
            ),
        }
    }
}

impl<P: SystemProbe> MetricProvider for SystemMetricProvider<P> {
    fn fetch(&self, metric: Metric) -> FetchResult {
        let result = match metric {
            Metric::Memory => self.memory(),
            Metric::Disk => self.disk(),
            Metric::User => self.user(),
        };
        tracing::trace!(?metric, ok = result.is_ok(), "fetched metric");
        result
    }
}

fn memory_text(stats: &MemoryStats) -> String {
    format!(
        "All: {} | Used: {} | Available: {}",
        format_bytes(stats.total),
        format_bytes(stats.used),
        format_bytes(stats.available),
    )
}

fn disk_text(stats: &DiskStats) -> String {
    format!(
        "All: {} | Used: {} | Free: {}",
        format_bytes(stats.total),
        format_bytes(stats.used),
        format_bytes(stats.free),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::probe::MockSystemProbe;
    use std::io;

    #[test]
    fn test_memory_scenario_lists_all_used_available_in_order() {
        let mut probe = MockSystemProbe::new();
        probe.expect_memory().times(1).returning(|| {
            Ok(MemoryStats {
                total: 16_000_000_000,
                used: 8_000_000_000,
                available: 8_000_000_000,
            })
        });
        let provider = SystemMetricProvider::new(probe, "/");

        let result = provider.fetch(Metric::Memory);

        assert!(result.is_ok());
        assert_eq!(result.primary_text, "Get memory usage");
        assert_eq!(
            result.detail_text,
            "All: 14.90 GB | Used: 7.45 GB | Available: 7.45 GB"
        );
        let all = result.detail_text.find("All:").unwrap();
        let used = result.detail_text.find("Used:").unwrap();
        let available = result.detail_text.find("Available:").unwrap();
        assert!(all < used && used < available);
    }

    #[test]
    fn test_disallowed_disk_path_never_reaches_the_os() {
        let mut probe = MockSystemProbe::new();
        probe.expect_disk_usage().never();
        let provider = SystemMetricProvider::new(probe, "/etc");

        let result = provider.fetch(Metric::Disk);

        assert_eq!(result.error, Some(SanitizedError::PathNotAllowed));
        assert_eq!(result.detail_text, "No disk usage information available");
    }

    #[test]
    fn test_traversal_out_of_allowed_path_is_denied() {
        let mut probe = MockSystemProbe::new();
        probe.expect_disk_usage().never();
        let provider = SystemMetricProvider::new(probe, "/tmp/../var");

        assert_eq!(
            provider.fetch(Metric::Disk).error,
            Some(SanitizedError::PathNotAllowed)
        );
    }

    #[test]
    fn test_disk_usage_for_allowed_path() {
        let mut probe = MockSystemProbe::new();
        probe
            .expect_disk_usage()
            .withf(|path| path == std::path::Path::new("/home"))
            .times(1)
            .returning(|_| {
                Ok(DiskStats {
                    total: 4 * 1024 * 1024 * 1024,
                    used: 1024 * 1024 * 1024,
                    free: 3 * 1024 * 1024 * 1024,
                })
            });
        let provider = SystemMetricProvider::new(probe, "/home");

        let result = provider.fetch(Metric::Disk);

        assert_eq!(result.detail_text, "All: 4.00 GB | Used: 1.00 GB | Free: 3.00 GB");
    }

    #[test]
    fn test_os_failure_is_sanitized() {
        let mut probe = MockSystemProbe::new();
        probe.expect_disk_usage().returning(|_| {
            Err(MetricError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "open /root/.secret: permission denied",
            )))
        });
        let provider = SystemMetricProvider::new(probe, "/");

        let result = provider.fetch(Metric::Disk);

        assert_eq!(result.error, Some(SanitizedError::PermissionDenied));
        assert!(!result.detail_text.contains("/root"));
        assert!(!result.error.unwrap().to_string().contains(".secret"));
    }

    #[test]
    fn test_user_lookup() {
        let mut probe = MockSystemProbe::new();
        probe
            .expect_current_user()
            .returning(|| Ok("operator".to_string()));
        let provider = SystemMetricProvider::new(probe, "/");

        assert_eq!(
            provider.fetch(Metric::User),
            FetchResult::ok("Get the current logged in user", "Current user: operator")
        );
    }

    #[test]
    fn test_user_lookup_failure_falls_back() {
        let mut probe = MockSystemProbe::new();
        probe
            .expect_current_user()
            .returning(|| Err(MetricError::Unavailable("no passwd entry")));
        let provider = SystemMetricProvider::new(probe, "/");

        let result = provider.fetch(Metric::User);

        assert_eq!(result.error, Some(SanitizedError::Unavailable));
        assert_eq!(result.detail_text, "Current user: Unknown user");
    }
}
