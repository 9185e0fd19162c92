//! Literal mount options and filesystem types.

/// Mount option that turns a mount into a bind mount.
pub const BIND_OPTION: &str = "bind";

/// In-memory filesystem type. Always mounted fresh, never bound.
pub const TMPFS_FS_TYPE: &str = "tmpfs";

/// Empty filesystem type, asks the backend to infer the type itself.
pub const INFERRED_FS_TYPE: &str = "";

/// Whether a filesystem type is a virtual one that must never be bind-mounted.
#[must_use]
pub fn is_virtual_fs_type(fs_type: &str) -> bool {
    fs_type == TMPFS_FS_TYPE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmpfs_is_virtual() {
        assert!(is_virtual_fs_type("tmpfs"));
    }

    #[test]
    fn real_and_inferred_types_are_not_virtual() {
        assert!(!is_virtual_fs_type("ext4"));
        assert!(!is_virtual_fs_type(INFERRED_FS_TYPE));
        // Exact match only.
        assert!(!is_virtual_fs_type("TMPFS"));
        assert!(!is_virtual_fs_type(" tmpfs"));
    }
}
