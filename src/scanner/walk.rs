use crate::file::FileRecord;
use crate::name::extract_series_name;
use crate::platform;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lists backup files of every source directory, one parallel pass per directory.
///
/// Directories that can't be read are logged and left out of the result;
/// the other directories are still scanned.
pub fn read_files_from_paths(paths: &[String]) -> BTreeMap<String, Vec<FileRecord>> {
    paths
        .par_iter()
        .filter_map(|path| match read_dir_records(Path::new(path)) {
            Ok(records) => {
                debug!("{}: {} backup files", path, records.len());
                Some((path.clone(), records))
            }
            Err(err) => {
                warn!("Skipping directory {}: {}", path, err);
                None
            }
        })
        .collect()
}

/// Immediate files of `dir` whose names look like backup files, sorted by name.
///
/// Fails when `dir` is missing, unreadable or not a directory.
pub fn read_dir_records(dir: &Path) -> io::Result<Vec<FileRecord>> {
    if !fs::metadata(dir)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", dir.display()),
        ));
    }

    let mut records = Vec::new();

    for entry_result in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(io::Error::from(err)),
            Err(err) => {
                warn!("Error reading entry in directory {}: {}", dir.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn!("Skipping {}: name is not valid UTF-8", entry.path().display());
            continue;
        };
        if extract_series_name(name).is_empty() {
            continue;
        }

        let modified = match entry
            .metadata()
            .map_err(io::Error::from)
            .and_then(|metadata| metadata.modified())
        {
            Ok(modified) => modified,
            Err(err) => {
                warn!("Error getting metadata for {}: {}", entry.path().display(), err);
                continue;
            }
        };

        let needs_action = match platform::needs_action(entry.path()) {
            Ok(flag) => flag,
            Err(err) => {
                warn!("Error reading attributes of {}: {}", entry.path().display(), err);
                continue;
            }
        };

        records.push(FileRecord::new(name, modified, needs_action));
    }

    Ok(records)
}
