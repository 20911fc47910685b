//! Per-file "needs action" flag.
//!
//! Windows sets the archive attribute on every new or modified file. On Linux
//! an uploader marks finished files with the `user.uploaded` extended
//! attribute, so a file without it still needs action.

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

use std::io;
use std::path::Path;

#[cfg(target_os = "windows")]
pub fn needs_action(path: &Path) -> io::Result<bool> {
    windows::needs_action(path)
}

#[cfg(target_os = "linux")]
pub fn needs_action(path: &Path) -> io::Result<bool> {
    linux::needs_action(path)
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
pub fn needs_action(_path: &Path) -> io::Result<bool> {
    Ok(true)
}
