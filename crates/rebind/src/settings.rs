//! Mounter selection settings.
//!
//! Platforms that expose persistent disks as directories (containers, some
//! test harnesses) ask for bind mounts through `BindMountPersistentDisk`.
//! Everywhere else the OS mounter is used as is.

use once_cell::sync::Lazy;
use rebind_common::MountResult;
use serde::{Deserialize, Serialize};

use crate::bind::LinuxBindMounter;
use crate::mounter::Mounter;

/// Environment variable that enables bind-mounted persistent disks.
pub const BIND_MOUNT_ENV: &str = "REBIND_BIND_MOUNT_PERSISTENT_DISK";

/// Settings read from the environment once per process.
pub static ENV_MOUNT_SETTINGS: Lazy<MountSettings> = Lazy::new(MountSettings::from_env);

/// Mounter selection settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MountSettings {
    /// Wrap the OS mounter so that every mount is a bind mount.
    pub bind_mount_persistent_disk: bool,
}

impl MountSettings {
    /// Settings with every option disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable bind-mounted persistent disks.
    #[must_use]
    pub const fn with_bind_mount_persistent_disk(mut self, enabled: bool) -> Self {
        self.bind_mount_persistent_disk = enabled;
        self
    }

    /// Parse settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns a config error if the JSON is malformed.
    pub fn from_json(content: &str) -> MountResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse settings from TOML.
    ///
    /// # Errors
    ///
    /// Returns a config error if the TOML is malformed.
    pub fn from_toml(content: &str) -> MountResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read settings from [`BIND_MOUNT_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(BIND_MOUNT_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        let enabled = value.is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        });
        Self::default().with_bind_mount_persistent_disk(enabled)
    }

    /// Build the mounter these settings call for on top of `delegate`.
    pub fn build_mounter<M: Mounter + 'static>(self, delegate: M) -> Box<dyn Mounter> {
        if self.bind_mount_persistent_disk {
            tracing::info!("Using bind mounter for persistent disks");
            Box::new(LinuxBindMounter::new(delegate))
        } else {
            tracing::info!("Using delegate mounter directly");
            Box::new(delegate)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use rebind_common::MountError;

    use super::*;
    use crate::fakes::FakeMounter;

    #[test]
    fn default_settings() {
        assert!(!MountSettings::new().bind_mount_persistent_disk);
    }

    #[test]
    fn from_json() {
        let settings = MountSettings::from_json(r#"{"BindMountPersistentDisk": true}"#).unwrap();
        assert!(settings.bind_mount_persistent_disk);

        let settings = MountSettings::from_json("{}").unwrap();
        assert_eq!(settings, MountSettings::default());
    }

    #[test]
    fn from_json_rejects_wrong_type() {
        let err = MountSettings::from_json(r#"{"BindMountPersistentDisk": "yes"}"#).unwrap_err();
        assert!(matches!(err, MountError::Config { .. }));
    }

    #[test]
    fn from_toml() {
        let settings = MountSettings::from_toml("BindMountPersistentDisk = true\n").unwrap();
        assert!(settings.bind_mount_persistent_disk);

        let err = MountSettings::from_toml("BindMountPersistentDisk = ").unwrap_err();
        assert!(matches!(err, MountError::Config { .. }));
    }

    #[test]
    fn from_env_value() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert!(
                MountSettings::from_env_value(Some(value)).bind_mount_persistent_disk,
                "{value} should enable"
            );
        }
        for value in [None, Some(""), Some("0"), Some("false"), Some("maybe")] {
            assert!(!MountSettings::from_env_value(value).bind_mount_persistent_disk);
        }
        assert_eq!(*ENV_MOUNT_SETTINGS, MountSettings::from_env());
    }

    #[test]
    fn build_mounter_wraps_when_enabled() {
        let fake = Arc::new(FakeMounter::new());
        let mounter = MountSettings::new()
            .with_bind_mount_persistent_disk(true)
            .build_mounter(Arc::clone(&fake));

        mounter
            .mount(Path::new("/var/vcap/store"), Path::new("/mnt"), &[])
            .unwrap();
        mounter.remount_as_readonly(Path::new("/mnt")).unwrap();

        let state = fake.snapshot();
        assert_eq!(state.mount_filesystem_options, vec![vec!["bind"]]);
        assert!(!state.remount_as_readonly_called);
    }

    #[test]
    fn build_mounter_passes_through_when_disabled() {
        let fake = Arc::new(FakeMounter::new());
        let mounter = MountSettings::new().build_mounter(Arc::clone(&fake));

        mounter
            .mount(Path::new("/dev/sdb1"), Path::new("/mnt"), &["rw"])
            .unwrap();
        mounter.remount_as_readonly(Path::new("/mnt")).unwrap();

        let state = fake.snapshot();
        assert!(state.mount_filesystem_options.is_empty());
        assert_eq!(state.mount_options, vec![vec!["rw"]]);
        assert!(state.remount_as_readonly_called);
    }
}
