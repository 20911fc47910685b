use std::io;
use std::iter;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use winapi::um::fileapi::{GetFileAttributesW, INVALID_FILE_ATTRIBUTES};
use winapi::um::winnt::FILE_ATTRIBUTE_ARCHIVE;

/// True when the archive attribute is set.
pub fn needs_action(path: &Path) -> io::Result<bool> {
    let path_wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(iter::once(0))
        .collect();

    let attributes = unsafe { GetFileAttributesW(path_wide.as_ptr()) };
    if attributes == INVALID_FILE_ATTRIBUTES {
        return Err(io::Error::last_os_error());
    }

    Ok(attributes & FILE_ATTRIBUTE_ARCHIVE != 0)
}
