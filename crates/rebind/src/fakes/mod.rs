//! Test doubles for mounter consumers.

mod mounter;

pub use mounter::{FakeMounter, FakeMounterState};
