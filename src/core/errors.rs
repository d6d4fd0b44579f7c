/// Error types for metric collection
///
/// `MetricError` carries the raw OS failure and only ever travels as far as
/// the provider boundary. `SanitizedError` is what the UI gets to see.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(unix)]
use nix::errno::Errno;

/// Raw failure from an OS query
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("system call failed (errno {0})")]
    Os(i32),

    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("path {0:?} is not in the allow-list")]
    PathNotAllowed(PathBuf),

    #[error("{0}")]
    Unavailable(&'static str),
}

/// User-presentable failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SanitizedError {
    #[error("permission denied: insufficient access to system data")]
    PermissionDenied,

    #[error("filesystem not found: path may not exist on this system")]
    NotFound,

    #[error("I/O error: unable to read filesystem data")]
    Io,

    #[error("access denied: requested path is not in the allowed list")]
    PathNotAllowed,

    #[error("unable to retrieve system information")]
    Unavailable,
}

#[cfg(unix)]
impl From<Errno> for MetricError {
    fn from(errno: Errno) -> Self {
        MetricError::Os(errno as i32)
    }
}

impl SanitizedError {
    /// Map a raw errno value to its category
    pub fn from_raw_os_error(code: i32) -> Self {
        #[cfg(unix)]
        {
            match Errno::from_raw(code) {
                Errno::EACCES | Errno::EPERM => SanitizedError::PermissionDenied,
                Errno::ENOENT => SanitizedError::NotFound,
                Errno::EIO => SanitizedError::Io,
                _ => SanitizedError::Unavailable,
            }
        }
        #[cfg(not(unix))]
        {
            let _ = code;
            SanitizedError::Unavailable
        }
    }
}

impl From<&io::Error> for SanitizedError {
    fn from(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => SanitizedError::PermissionDenied,
            io::ErrorKind::NotFound => SanitizedError::NotFound,
            _ => err
                .raw_os_error()
                .map(SanitizedError::from_raw_os_error)
                .unwrap_or(SanitizedError::Unavailable),
        }
    }
}

impl From<&MetricError> for SanitizedError {
    fn from(err: &MetricError) -> Self {
        match err {
            MetricError::Os(code) => SanitizedError::from_raw_os_error(*code),
            MetricError::Io(io_err) => SanitizedError::from(io_err),
            MetricError::PathNotAllowed(_) => SanitizedError::PathNotAllowed,
            MetricError::Unavailable(_) => SanitizedError::Unavailable,
        }
    }
}

/// Translate a raw failure into its safe category, logging the original
pub fn sanitize(err: &MetricError) -> SanitizedError {
    let sanitized = SanitizedError::from(err);
    tracing::debug!(error = %err, category = ?sanitized, "sanitized metric error");
    sanitized
}
