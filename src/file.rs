use std::time::SystemTime;

/// Anything that carries a bare filename (no directory part).
pub trait BackupFile {
    fn name(&self) -> &str;
}

/// A file found in a source directory during one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub modified: SystemTime,
    /// Still has to be uploaded or processed: the archive bit on Windows,
    /// no `user.uploaded` extended attribute on Linux.
    pub needs_action: bool,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, modified: SystemTime, needs_action: bool) -> Self {
        Self {
            name: name.into(),
            modified,
            needs_action,
        }
    }
}

impl BackupFile for FileRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl BackupFile for String {
    fn name(&self) -> &str {
        self
    }
}

impl BackupFile for str {
    fn name(&self) -> &str {
        self
    }
}

impl<T: BackupFile + ?Sized> BackupFile for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}
