/// Raw OS queries behind the metric provider
///
/// Memory comes from sysinfo; filesystem and user lookups go straight to
/// the libc calls through nix so failures keep their errno.

use std::path::Path;
use std::sync::Mutex;

use sysinfo::System;

use super::errors::MetricError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

/// Synchronous, side-effect free OS queries
#[cfg_attr(test, mockall::automock)]
pub trait SystemProbe: Send + Sync {
    fn memory(&self) -> Result<MemoryStats, MetricError>;
    fn disk_usage(&self, path: &Path) -> Result<DiskStats, MetricError>;
    fn current_user(&self) -> Result<String, MetricError>;
}

/// Probe for the local machine
pub struct HostProbe {
    system: Mutex<System>,
}

impl HostProbe {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for HostProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe for HostProbe {
    fn memory(&self) -> Result<MemoryStats, MetricError> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| MetricError::Unavailable("memory sampler lock poisoned"))?;
        system.refresh_memory();

        let total = system.total_memory();
        if total == 0 {
            return Err(MetricError::Unavailable("memory statistics not reported"));
        }

        Ok(MemoryStats {
            total,
            used: system.used_memory(),
            available: system.available_memory(),
        })
    }

    #[cfg(unix)]
    fn disk_usage(&self, path: &Path) -> Result<DiskStats, MetricError> {
        let stats = nix::sys::statvfs::statvfs(path)?;
        let fragment = stats.fragment_size() as u64;
        let total = stats.blocks() as u64 * fragment;
        let free = stats.blocks_free() as u64 * fragment;

        Ok(DiskStats {
            total,
            used: total.saturating_sub(free),
            free,
        })
    }

    #[cfg(not(unix))]
    fn disk_usage(&self, _path: &Path) -> Result<DiskStats, MetricError> {
        Err(MetricError::Unavailable("filesystem statistics need a unix host"))
    }

    #[cfg(unix)]
    fn current_user(&self) -> Result<String, MetricError> {
        use nix::unistd::{Uid, User};

        User::from_uid(Uid::current())?
            .map(|user| user.name)
            .ok_or(MetricError::Unavailable("no passwd entry for current uid"))
    }

    #[cfg(not(unix))]
    fn current_user(&self) -> Result<String, MetricError> {
        Err(MetricError::Unavailable("user lookup needs a unix host"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_host_disk_usage_for_root() {
        let probe = HostProbe::new();
        let stats = probe.disk_usage(Path::new("/")).unwrap();

        assert!(stats.total > 0);
        assert_eq!(stats.used + stats.free, stats.total);
    }

    #[cfg(unix)]
    #[test]
    fn test_host_disk_usage_missing_path_keeps_errno() {
        let probe = HostProbe::new();
        let err = probe
            .disk_usage(Path::new("/definitely/not/a/real/mount"))
            .unwrap_err();

        assert!(matches!(err, MetricError::Os(code) if code == nix::errno::Errno::ENOENT as i32));
    }
}
