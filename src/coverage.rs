//! Relation between files on disk and configuration lines.
//!
//! Lookups binary-search the configuration, so the `sorted` slices passed
//! here MUST be sorted ascending by `(series, suffix)`; see
//! [`sort_entries`](crate::config::sort_entries). Debug builds assert it,
//! release builds silently return wrong answers on unsorted input.

use crate::config::{is_sorted, ConfigEntry};
use crate::file::BackupFile;
use crate::group::{classify, Classifier, Group, SeriesSuffixes};
use std::collections::BTreeSet;

/// Distinct source directories named by the configuration.
pub fn unique_paths(entries: &[ConfigEntry]) -> BTreeSet<String> {
    entries.iter().map(|e| e.path.clone()).collect()
}

/// Series names to their suffixes, in configuration order, duplicates kept.
pub fn series_to_suffixes(entries: &[ConfigEntry]) -> SeriesSuffixes {
    let mut map = SeriesSuffixes::new();
    for entry in entries {
        map.entry(entry.series.clone())
            .or_insert_with(|| Vec::with_capacity(2))
            .push(entry.suffix.clone());
    }
    map
}

fn has_series(sorted: &[ConfigEntry], series: &str) -> bool {
    let pos = sorted.partition_point(|e| e.series.as_str() < series);
    sorted.get(pos).is_some_and(|e| e.series == series)
}

/// Files without any configuration line governing them.
///
/// Such files must never be deleted: nobody said how long to keep them.
pub fn files_not_covered<'a, T, C>(files: &'a [T], sorted: &[ConfigEntry], classifier: &C) -> Vec<&'a T>
where
    T: BackupFile,
    C: Classifier + ?Sized,
{
    debug_assert!(is_sorted(sorted), "configuration must be sorted by (series, suffix)");

    files
        .iter()
        .filter(|file| match classifier.classify(file.name()) {
            Group::UnrecognizedSuffix(_) => true,
            Group::NotABackupFile => !has_series(sorted, ""),
            Group::Matched { series, .. } => !has_series(sorted, &series),
        })
        .collect()
}

/// The configuration line for `filename`, if any. Meant for messages.
pub fn find_config_entry<'c>(
    filename: &str,
    suffixes: &SeriesSuffixes,
    sorted: &'c [ConfigEntry],
) -> Option<&'c ConfigEntry> {
    debug_assert!(is_sorted(sorted), "configuration must be sorted by (series, suffix)");

    let group = classify(filename, suffixes);
    if !matches!(group, Group::Matched { .. }) {
        return None;
    }
    let key = group.sort_key();
    let pos = sorted.partition_point(|e| e.key() < key);
    sorted.get(pos).filter(|e| e.key() == key)
}
