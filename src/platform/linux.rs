use std::io;
use std::path::Path;
use tracing::warn;

pub const XATTR_UPLOADED: &str = "user.uploaded";

/// True unless the file carries a non-empty `user.uploaded` attribute.
///
/// Filesystems without user xattrs report every file as needing action.
pub fn needs_action(path: &Path) -> io::Result<bool> {
    match xattr::get(path, XATTR_UPLOADED) {
        Ok(Some(value)) => Ok(value.is_empty()),
        Ok(None) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(err),
        Err(err) => {
            warn!("Can't read xattr of {}: {}", path.display(), err);
            Ok(true)
        }
    }
}
