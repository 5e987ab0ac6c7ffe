//! Symlink helpers.
//!
//! Blobs are only ever linked, never hardlinked or copied, so a failure here is
//! reported as-is instead of falling back to another link type.

use crate::error::{MirrorError, Result};
use std::path::Path;

/// Check whether anything exists at `path` without following symlinks.
///
/// A dangling symlink counts as existing.
pub fn entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Create a symlink at `link` pointing to `source`.
///
/// # Platform Behavior
/// - **Linux/macOS**: `std::os::unix::fs::symlink`
/// - **Windows**: `std::os::windows::fs::symlink_file` (needs Developer Mode
///   or the symlink privilege)
pub fn create_symlink(source: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(source, link);

    #[cfg(windows)]
    let result = std::os::windows::fs::symlink_file(source, link);

    #[cfg(not(any(unix, windows)))]
    let result: std::io::Result<()> = Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ));

    result.map_err(|e| MirrorError::SymlinkFailed {
        src: source.to_path_buf(),
        dest: link.to_path_buf(),
        reason: e.to_string(),
    })
}
