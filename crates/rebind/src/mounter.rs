//! The mounter capability and its result types.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rebind_common::{MountError, MountResult};

/// A value reported together with an optional error.
///
/// Some mount queries return a meaningful value even when they also fail,
/// e.g. an unmount that detached the filesystem but could not clean up
/// afterwards. Both halves are kept independently.
#[derive(Debug, Clone)]
#[must_use]
pub struct Reported<T> {
    /// The reported value.
    pub value: T,
    /// The error reported alongside the value, if any.
    pub error: Option<MountError>,
}

impl<T> Reported<T> {
    /// A successful report.
    pub const fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    /// A report carrying both a value and an error.
    pub const fn failed(value: T, error: MountError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    /// Whether no error was reported.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Drops the value if an error was reported.
    ///
    /// # Errors
    ///
    /// Returns the reported error, if any.
    pub fn into_result(self) -> MountResult<T> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }

    /// Splits into value and error.
    pub fn into_parts(self) -> (T, Option<MountError>) {
        (self.value, self.error)
    }
}

/// Mount-point status of a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPoint {
    /// Partition (or bind source) mounted at the path.
    pub partition_path: PathBuf,
    /// Whether the path is a mount point.
    pub is_mount_point: bool,
}

/// Mount backend capability.
///
/// Implemented by OS-backed mounters, by decorators such as
/// [`LinuxBindMounter`](crate::LinuxBindMounter), and by
/// [`FakeMounter`](crate::fakes::FakeMounter) for tests.
pub trait Mounter: Send + Sync {
    /// Mount `partition_path` at `mount_point` as `fs_type`.
    ///
    /// An empty `fs_type` lets the backend infer the type.
    ///
    /// # Errors
    ///
    /// Returns the backend's mount error.
    fn mount_filesystem(
        &self,
        partition_path: &Path,
        mount_point: &Path,
        fs_type: &str,
        options: &[&str],
    ) -> MountResult<()>;

    /// Mount `partition_path` at `mount_point`, inferring the filesystem type.
    ///
    /// # Errors
    ///
    /// Returns the backend's mount error.
    fn mount(
        &self,
        partition_path: &Path,
        mount_point: &Path,
        options: &[&str],
    ) -> MountResult<()>;

    /// Remount the filesystem at `path` read-only.
    ///
    /// # Errors
    ///
    /// Returns the backend's remount error.
    fn remount_as_readonly(&self, path: &Path) -> MountResult<()>;

    /// Move the mount at `from_mount_point` to `to_mount_point` with new options.
    ///
    /// # Errors
    ///
    /// Returns the backend's remount error.
    fn remount(
        &self,
        from_mount_point: &Path,
        to_mount_point: &Path,
        options: &[&str],
    ) -> MountResult<()>;

    /// Enable swap on a partition.
    ///
    /// # Errors
    ///
    /// Returns the backend's swap error.
    fn swap_on(&self, partition_path: &Path) -> MountResult<()>;

    /// Unmount a partition or mount point, reporting whether anything was unmounted.
    fn unmount(&self, partition_path_or_mount_point: &Path) -> Reported<bool>;

    /// Report whether `path` is a mount point and what is mounted there.
    fn is_mount_point(&self, path: &Path) -> Reported<MountPoint>;

    /// Report whether a device is mounted anywhere.
    fn is_mounted(&self, device_path: &Path) -> Reported<bool>;
}

macro_rules! forward_mounter {
    ($ty:ty) => {
        fn mount_filesystem(
            &self,
            partition_path: &Path,
            mount_point: &Path,
            fs_type: &str,
            options: &[&str],
        ) -> MountResult<()> {
            <$ty>::mount_filesystem(self, partition_path, mount_point, fs_type, options)
        }

        fn mount(
            &self,
            partition_path: &Path,
            mount_point: &Path,
            options: &[&str],
        ) -> MountResult<()> {
            <$ty>::mount(self, partition_path, mount_point, options)
        }

        fn remount_as_readonly(&self, path: &Path) -> MountResult<()> {
            <$ty>::remount_as_readonly(self, path)
        }

        fn remount(
            &self,
            from_mount_point: &Path,
            to_mount_point: &Path,
            options: &[&str],
        ) -> MountResult<()> {
            <$ty>::remount(self, from_mount_point, to_mount_point, options)
        }

        fn swap_on(&self, partition_path: &Path) -> MountResult<()> {
            <$ty>::swap_on(self, partition_path)
        }

        fn unmount(&self, partition_path_or_mount_point: &Path) -> Reported<bool> {
            <$ty>::unmount(self, partition_path_or_mount_point)
        }

        fn is_mount_point(&self, path: &Path) -> Reported<MountPoint> {
            <$ty>::is_mount_point(self, path)
        }

        fn is_mounted(&self, device_path: &Path) -> Reported<bool> {
            <$ty>::is_mounted(self, device_path)
        }
    };
}

impl<M: Mounter + ?Sized> Mounter for &M {
    forward_mounter!(M);
}

impl<M: Mounter + ?Sized> Mounter for Box<M> {
    forward_mounter!(M);
}

impl<M: Mounter + ?Sized> Mounter for Arc<M> {
    forward_mounter!(M);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_keeps_value_and_error() {
        let report = Reported::failed(true, MountError::backend("busy"));
        assert!(!report.is_ok());

        let (value, error) = report.into_parts();
        assert!(value);
        assert_eq!(error.unwrap().to_string(), "Mounter backend error: busy");
    }

    #[test]
    fn reported_into_result() {
        assert!(Reported::ok(false).into_result().is_ok_and(|v| !v));

        let err = Reported::failed(true, MountError::backend("busy"))
            .into_result()
            .unwrap_err();
        assert!(matches!(err, MountError::Backend { .. }));
    }

    #[test]
    fn default_mount_point_is_not_mounted() {
        let status = MountPoint::default();
        assert!(!status.is_mount_point);
        assert_eq!(status.partition_path, PathBuf::new());
    }
}
