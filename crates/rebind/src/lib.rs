//! # rebind
//!
//! Mounter decorator for platforms where mounting a directory a second time
//! must be requested explicitly as a bind mount.
//!
//! ## Features
//!
//! - **`Mounter` trait**: the capability every mount backend implements
//! - **`LinuxBindMounter`**: wraps any mounter and injects the `bind` option
//! - **`MountSettings`**: decides whether the decorator is applied at all
//! - **`fakes::FakeMounter`**: recording backend for tests
//!
//! ## Usage
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use rebind::fakes::FakeMounter;
//! use rebind::{LinuxBindMounter, Mounter};
//!
//! let backend = Arc::new(FakeMounter::new());
//! let mounter = LinuxBindMounter::new(Arc::clone(&backend));
//!
//! mounter
//!     .mount(Path::new("/var/vcap/store"), Path::new("/mnt/store"), &["rw"])
//!     .unwrap();
//!
//! assert_eq!(backend.snapshot().mount_filesystem_options, vec![vec!["rw", "bind"]]);
//! ```

#![warn(missing_docs)]

pub mod bind;
pub mod fakes;
pub mod mounter;
pub mod settings;

pub use bind::LinuxBindMounter;
pub use mounter::{MountPoint, Mounter, Reported};
pub use rebind_common::{MountError, MountResult};
pub use settings::MountSettings;
