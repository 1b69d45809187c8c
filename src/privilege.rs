//! Superuser precondition checks performed before scanning or removing.

use nix::unistd::Uid;
use std::path::Path;

/// Roots under which an unprivileged scan will usually hit unreadable directories.
pub const SYSTEM_ROOTS: &[&str] = &["/usr", "/var", "/etc", "/opt"];

/// True if `path` is `/` or lies under one of the [`SYSTEM_ROOTS`].
pub fn is_system_path(path: &Path) -> bool {
    path == Path::new("/") || SYSTEM_ROOTS.iter().any(|root| path.starts_with(root))
}

/// True if scanning `path` as `uid` would likely miss data for lack of privileges.
pub fn needs_elevation(path: &Path, uid: Uid) -> bool {
    !uid.is_root() && is_system_path(path)
}

/// Whether the current process runs as the superuser.
pub fn is_elevated() -> bool {
    Uid::effective().is_root()
}
