use crate::file::BackupFile;
use crate::group::{Classifier, Group};
use serde::Deserialize;
use std::cmp::Ordering;

/// What to do with files that are not backup files at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonBackupPolicy {
    /// Never retain them.
    #[default]
    Exclude,
    /// Treat all of them as one series and retain its newest name.
    KeepNewest,
}

struct Entry<'a, T> {
    file: &'a T,
    group: Group,
}

impl<T: BackupFile> Entry<'_, T> {
    fn name(&self) -> &str {
        self.file.name()
    }
}

/// Descending order: group, then filename.
///
/// Names of one group share the `series_` prefix and the timestamp literal
/// follows it, so inside a group the filename orders like the timestamp.
/// Names whose timestamp is missing or unparsable take their place by
/// filename too, which keeps the order total.
fn newest_first<T: BackupFile>(a: &Entry<'_, T>, b: &Entry<'_, T>) -> Ordering {
    b.group
        .sort_key()
        .cmp(&a.group.sort_key())
        .then_with(|| b.name().cmp(a.name()))
}

/// Selects the newest `keep_count` files of every group.
///
/// The newest file of a group is always retained, even with `keep_count == 0`.
/// Files with an unrecognized suffix are never retained and never start a group.
/// The result is ordered by group descending and newest first inside a group.
pub fn select_retained<'a, T, C>(
    files: &'a [T],
    classifier: &C,
    keep_count: usize,
    policy: NonBackupPolicy,
) -> Vec<&'a T>
where
    T: BackupFile,
    C: Classifier + ?Sized,
{
    let mut entries: Vec<Entry<'a, T>> = files
        .iter()
        .map(|file| Entry {
            file,
            group: classifier.classify(file.name()),
        })
        .collect();
    entries.sort_unstable_by(|a, b| newest_first(a, b));

    let mut retained = Vec::new();
    let mut current: Option<&Group> = None;
    let mut remaining = 0usize;

    for entry in &entries {
        match &entry.group {
            Group::UnrecognizedSuffix(_) => continue,
            Group::NotABackupFile => {
                if policy == NonBackupPolicy::Exclude || current == Some(&entry.group) {
                    continue;
                }
                retained.push(entry.file);
                current = Some(&entry.group);
            }
            group if current != Some(group) => {
                retained.push(entry.file);
                current = Some(group);
                remaining = keep_count.saturating_sub(1);
            }
            _ => {
                if remaining > 0 {
                    retained.push(entry.file);
                    remaining -= 1;
                }
            }
        }
    }

    retained
}
