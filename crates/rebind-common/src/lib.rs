//! # rebind-common
//!
//! Shared types for the rebind crates:
//! - The mount error taxonomy reported by mounter backends
//! - Literal filesystem types and mount options used by the bind policy

#![warn(missing_docs)]

pub mod constants;
pub mod error;

pub use constants::{BIND_OPTION, INFERRED_FS_TYPE, TMPFS_FS_TYPE};
pub use error::{MountError, MountResult};
