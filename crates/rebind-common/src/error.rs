//! Mount error types.

use std::path::PathBuf;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`MountError`].
pub type MountResult<T> = Result<T, MountError>;

/// Errors reported by mounter backends.
///
/// Cloneable so a backend can hand the same failure to several callers.
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum MountError {
    /// I/O error from a mount, unmount or swap syscall.
    #[error("I/O error: {0}")]
    #[diagnostic(code(rebind::io))]
    Io(Arc<std::io::Error>),

    /// External mount tooling exited unsuccessfully.
    #[error("Command failed: {command}: {stderr}")]
    #[diagnostic(code(rebind::command_failed))]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The path is not mounted.
    #[error("Not mounted: {}", .path.display())]
    #[diagnostic(code(rebind::not_mounted))]
    NotMounted {
        /// The path that was expected to be mounted.
        path: PathBuf,
    },

    /// Invalid argument passed to a backend.
    #[error("Invalid argument: {message}")]
    #[diagnostic(code(rebind::invalid_argument))]
    InvalidArgument {
        /// The error message.
        message: String,
    },

    /// Operation not supported by this backend or platform.
    #[error("Feature not supported: {feature}")]
    #[diagnostic(
        code(rebind::unsupported),
        help("Bind mounts and swap require Linux")
    )]
    Unsupported {
        /// The unsupported feature.
        feature: String,
    },

    /// Mounter settings could not be parsed.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(rebind::config))]
    Config {
        /// The error message.
        message: String,
    },

    /// Backend-specific failure that fits no other variant.
    #[error("Mounter backend error: {message}")]
    #[diagnostic(code(rebind::backend))]
    Backend {
        /// The error message.
        message: String,
    },
}

impl MountError {
    /// Shorthand for a [`MountError::Backend`] error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for MountError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for MountError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MountError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MountError::NotMounted {
            path: PathBuf::from("/var/vcap/store"),
        };
        assert_eq!(err.to_string(), "Not mounted: /var/vcap/store");

        let err = MountError::CommandFailed {
            command: "mount /dev/sdb1 /mnt".to_string(),
            stderr: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command failed: mount /dev/sdb1 /mnt: permission denied"
        );
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such device");
        let err: MountError = io_err.into();
        assert!(matches!(err, MountError::Io(_)));
    }

    #[test]
    fn clone_keeps_io_source() {
        let err: MountError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "EPERM").into();
        let copy = err.clone();
        assert_eq!(err.to_string(), copy.to_string());
        if let (MountError::Io(a), MountError::Io(b)) = (&err, &copy) {
            assert!(Arc::ptr_eq(a, b));
        } else {
            panic!("expected io errors");
        }
    }

    #[test]
    fn error_from_json() {
        let err: MountError = serde_json::from_str::<bool>("nope").unwrap_err().into();
        assert!(matches!(err, MountError::Config { .. }));
    }
}
