//! Recording fake mounter.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rebind_common::{MountError, MountResult};

use crate::mounter::{MountPoint, Mounter, Reported};

/// Recorded inputs and canned outputs of a [`FakeMounter`].
#[derive(Debug, Clone, Default)]
pub struct FakeMounterState {
    /// Partition paths passed to `mount_filesystem`, in call order.
    pub mount_filesystem_partition_paths: Vec<PathBuf>,
    /// Mount points passed to `mount_filesystem`.
    pub mount_filesystem_mount_points: Vec<PathBuf>,
    /// Filesystem types passed to `mount_filesystem`.
    pub mount_filesystem_fs_types: Vec<String>,
    /// Option lists passed to `mount_filesystem`.
    pub mount_filesystem_options: Vec<Vec<String>>,
    /// Error returned by `mount_filesystem`.
    pub mount_filesystem_err: Option<MountError>,

    /// Partition paths passed to `mount`.
    pub mount_partition_paths: Vec<PathBuf>,
    /// Mount points passed to `mount`.
    pub mount_mount_points: Vec<PathBuf>,
    /// Option lists passed to `mount`.
    pub mount_options: Vec<Vec<String>>,
    /// Error returned by `mount`.
    pub mount_err: Option<MountError>,

    /// Whether `remount_as_readonly` was called.
    pub remount_as_readonly_called: bool,
    /// Last path passed to `remount_as_readonly`.
    pub remount_as_readonly_path: Option<PathBuf>,
    /// Error returned by `remount_as_readonly`.
    pub remount_as_readonly_err: Option<MountError>,

    /// Last source mount point passed to `remount`.
    pub remount_from_mount_point: Option<PathBuf>,
    /// Last target mount point passed to `remount`.
    pub remount_to_mount_point: Option<PathBuf>,
    /// Last option list passed to `remount`.
    pub remount_options: Vec<String>,
    /// Error returned by `remount`.
    pub remount_err: Option<MountError>,

    /// Partition paths passed to `swap_on`.
    pub swap_on_partition_paths: Vec<PathBuf>,
    /// Error returned by `swap_on`.
    pub swap_on_err: Option<MountError>,

    /// Last path passed to `unmount`.
    pub unmount_partition_path_or_mount_point: Option<PathBuf>,
    /// Value reported by `unmount`.
    pub unmount_did_unmount: bool,
    /// Error reported by `unmount`.
    pub unmount_err: Option<MountError>,

    /// Last path passed to `is_mount_point`.
    pub is_mount_point_path: Option<PathBuf>,
    /// Partition path reported by `is_mount_point`.
    pub is_mount_point_partition_path: PathBuf,
    /// Mount-point flag reported by `is_mount_point`.
    pub is_mount_point_result: bool,
    /// Error reported by `is_mount_point`.
    pub is_mount_point_err: Option<MountError>,

    /// Device paths passed to `is_mounted`, in call order.
    pub is_mounted_args: Vec<PathBuf>,
    /// Value reported by `is_mounted`.
    pub is_mounted_result: bool,
    /// Error reported by `is_mounted`.
    pub is_mounted_err: Option<MountError>,

    /// Total number of calls across all operations.
    pub calls: usize,
}

/// Mounter that records its inputs and returns configured results.
#[derive(Debug, Default)]
pub struct FakeMounter {
    state: Mutex<FakeMounterState>,
}

fn owned(options: &[&str]) -> Vec<String> {
    options.iter().map(ToString::to_string).collect()
}

fn canned(err: Option<&MountError>) -> MountResult<()> {
    err.cloned().map_or(Ok(()), Err)
}

impl FakeMounter {
    /// Create a fake that succeeds everywhere and reports nothing mounted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust canned results.
    pub fn configure(&self, f: impl FnOnce(&mut FakeMounterState)) {
        f(&mut self.state.lock());
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> FakeMounterState {
        self.state.lock().clone()
    }

    /// Total number of calls received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.lock().calls
    }

    /// Device path passed to the `index`-th `is_mounted` call.
    #[must_use]
    pub fn is_mounted_args_for_call(&self, index: usize) -> Option<PathBuf> {
        self.state.lock().is_mounted_args.get(index).cloned()
    }

    /// Forget recorded calls, keeping canned results.
    pub fn reset_calls(&self) {
        let mut state = self.state.lock();
        let kept = FakeMounterState {
            mount_filesystem_err: state.mount_filesystem_err.take(),
            mount_err: state.mount_err.take(),
            remount_as_readonly_err: state.remount_as_readonly_err.take(),
            remount_err: state.remount_err.take(),
            swap_on_err: state.swap_on_err.take(),
            unmount_did_unmount: state.unmount_did_unmount,
            unmount_err: state.unmount_err.take(),
            is_mount_point_partition_path: std::mem::take(&mut state.is_mount_point_partition_path),
            is_mount_point_result: state.is_mount_point_result,
            is_mount_point_err: state.is_mount_point_err.take(),
            is_mounted_result: state.is_mounted_result,
            is_mounted_err: state.is_mounted_err.take(),
            ..FakeMounterState::default()
        };
        *state = kept;
    }
}

impl Mounter for FakeMounter {
    fn mount_filesystem(
        &self,
        partition_path: &Path,
        mount_point: &Path,
        fs_type: &str,
        options: &[&str],
    ) -> MountResult<()> {
        let mut state = self.state.lock();
        state.calls += 1;
        state
            .mount_filesystem_partition_paths
            .push(partition_path.to_path_buf());
        state
            .mount_filesystem_mount_points
            .push(mount_point.to_path_buf());
        state.mount_filesystem_fs_types.push(fs_type.to_string());
        state.mount_filesystem_options.push(owned(options));
        canned(state.mount_filesystem_err.as_ref())
    }

    fn mount(
        &self,
        partition_path: &Path,
        mount_point: &Path,
        options: &[&str],
    ) -> MountResult<()> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.mount_partition_paths.push(partition_path.to_path_buf());
        state.mount_mount_points.push(mount_point.to_path_buf());
        state.mount_options.push(owned(options));
        canned(state.mount_err.as_ref())
    }

    fn remount_as_readonly(&self, path: &Path) -> MountResult<()> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.remount_as_readonly_called = true;
        state.remount_as_readonly_path = Some(path.to_path_buf());
        canned(state.remount_as_readonly_err.as_ref())
    }

    fn remount(
        &self,
        from_mount_point: &Path,
        to_mount_point: &Path,
        options: &[&str],
    ) -> MountResult<()> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.remount_from_mount_point = Some(from_mount_point.to_path_buf());
        state.remount_to_mount_point = Some(to_mount_point.to_path_buf());
        state.remount_options = owned(options);
        canned(state.remount_err.as_ref())
    }

    fn swap_on(&self, partition_path: &Path) -> MountResult<()> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.swap_on_partition_paths.push(partition_path.to_path_buf());
        canned(state.swap_on_err.as_ref())
    }

    fn unmount(&self, partition_path_or_mount_point: &Path) -> Reported<bool> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.unmount_partition_path_or_mount_point =
            Some(partition_path_or_mount_point.to_path_buf());
        Reported {
            value: state.unmount_did_unmount,
            error: state.unmount_err.clone(),
        }
    }

    fn is_mount_point(&self, path: &Path) -> Reported<MountPoint> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.is_mount_point_path = Some(path.to_path_buf());
        Reported {
            value: MountPoint {
                partition_path: state.is_mount_point_partition_path.clone(),
                is_mount_point: state.is_mount_point_result,
            },
            error: state.is_mount_point_err.clone(),
        }
    }

    fn is_mounted(&self, device_path: &Path) -> Reported<bool> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.is_mounted_args.push(device_path.to_path_buf());
        Reported {
            value: state.is_mounted_result,
            error: state.is_mounted_err.clone(),
        }
    }
}
