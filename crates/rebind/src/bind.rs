//! Bind-mount aware mounter decorator.
//!
//! On some platforms mounting an already mounted directory at a second path
//! has no implicit meaning and must be requested as a bind mount. This
//! decorator rewrites mount options so upstream code never has to know.

use std::path::Path;

use rebind_common::constants::is_virtual_fs_type;
use rebind_common::{BIND_OPTION, INFERRED_FS_TYPE, MountResult};

use crate::mounter::{MountPoint, Mounter, Reported};

/// Mounter that turns every mount and remount into a bind mount.
///
/// - `mount_filesystem` appends `bind` unless the filesystem type is `tmpfs`.
/// - `mount` always binds, letting the delegate infer the filesystem type.
/// - `remount` always appends `bind`.
/// - `remount_as_readonly` is a no-op: a read-only remount of a bind mount
///   does not make the original mount read-only on this platform.
/// - Everything else is passed through untouched.
#[derive(Debug, Clone)]
pub struct LinuxBindMounter<M> {
    delegate: M,
}

impl<M: Mounter> LinuxBindMounter<M> {
    /// Wrap a mounter.
    pub const fn new(delegate: M) -> Self {
        Self { delegate }
    }

    /// The wrapped mounter.
    pub const fn delegate(&self) -> &M {
        &self.delegate
    }

    /// Unwrap, returning the delegate.
    pub fn into_inner(self) -> M {
        self.delegate
    }
}

/// Copy of `options` with the bind option last.
fn with_bind<'a>(options: &[&'a str]) -> Vec<&'a str> {
    let mut rewritten = Vec::with_capacity(options.len() + 1);
    rewritten.extend_from_slice(options);
    rewritten.push(BIND_OPTION);
    rewritten
}

impl<M: Mounter> Mounter for LinuxBindMounter<M> {
    fn mount_filesystem(
        &self,
        partition_path: &Path,
        mount_point: &Path,
        fs_type: &str,
        options: &[&str],
    ) -> MountResult<()> {
        if is_virtual_fs_type(fs_type) {
            tracing::debug!(
                partition = %partition_path.display(),
                mount_point = %mount_point.display(),
                fs_type,
                "Virtual filesystem, mounting without bind"
            );
            return self
                .delegate
                .mount_filesystem(partition_path, mount_point, fs_type, options);
        }

        let options = with_bind(options);
        tracing::debug!(
            partition = %partition_path.display(),
            mount_point = %mount_point.display(),
            fs_type,
            ?options,
            "Mounting as bind mount"
        );
        self.delegate
            .mount_filesystem(partition_path, mount_point, fs_type, &options)
    }

    fn mount(
        &self,
        partition_path: &Path,
        mount_point: &Path,
        options: &[&str],
    ) -> MountResult<()> {
        self.mount_filesystem(partition_path, mount_point, INFERRED_FS_TYPE, options)
    }

    fn remount_as_readonly(&self, path: &Path) -> MountResult<()> {
        tracing::debug!(
            path = %path.display(),
            "Skipping read-only remount, not supported for bind mounts"
        );
        Ok(())
    }

    fn remount(
        &self,
        from_mount_point: &Path,
        to_mount_point: &Path,
        options: &[&str],
    ) -> MountResult<()> {
        let options = with_bind(options);
        tracing::debug!(
            from = %from_mount_point.display(),
            to = %to_mount_point.display(),
            ?options,
            "Remounting as bind mount"
        );
        self.delegate
            .remount(from_mount_point, to_mount_point, &options)
    }

    fn swap_on(&self, partition_path: &Path) -> MountResult<()> {
        tracing::trace!(partition = %partition_path.display(), "Forwarding swap on");
        self.delegate.swap_on(partition_path)
    }

    fn unmount(&self, partition_path_or_mount_point: &Path) -> Reported<bool> {
        tracing::trace!(path = %partition_path_or_mount_point.display(), "Forwarding unmount");
        self.delegate.unmount(partition_path_or_mount_point)
    }

    fn is_mount_point(&self, path: &Path) -> Reported<MountPoint> {
        self.delegate.is_mount_point(path)
    }

    fn is_mounted(&self, device_path: &Path) -> Reported<bool> {
        self.delegate.is_mounted(device_path)
    }
}
