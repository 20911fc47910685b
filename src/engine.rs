use crate::config::{sort_entries, AppSettings, ConfigEntry};
use crate::coverage::{self, files_not_covered};
use crate::file::FileRecord;
use crate::group::{Classifier, Group, SeriesSuffixes, SuffixClassifier};
use crate::retention::select_retained;
use crate::scanner;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct RetentionEngine {
    entries: Vec<ConfigEntry>,
    suffixes: SeriesSuffixes,
    settings: AppSettings,
}

/// Decision for the files of one source directory.
#[derive(Debug, Default)]
pub struct PathPlan {
    pub path: String,
    /// Newest files of every group, newest first.
    pub retained: Vec<FileRecord>,
    /// Governed by a configuration line, outside the newest N, already processed.
    pub deletable: Vec<FileRecord>,
    /// Would be deletable, but still flagged as needing action.
    pub pending_action: Vec<FileRecord>,
    /// No configuration line governs them. Never delete these.
    pub not_covered: Vec<FileRecord>,
}

#[derive(Debug)]
pub struct RetentionReport {
    pub scan_duration: Duration,
    pub plans: Vec<PathPlan>,
    /// Configuration with `modtime` and `has_any_files` filled in.
    pub entries: Vec<ConfigEntry>,
    pub skipped_paths: Vec<String>,
}

impl RetentionEngine {
    pub fn new(mut entries: Vec<ConfigEntry>, settings: AppSettings) -> Self {
        sort_entries(&mut entries);
        let suffixes = coverage::series_to_suffixes(&entries);
        Self {
            entries,
            suffixes,
            settings,
        }
    }

    /// Configuration lines sorted by `(series, suffix)`.
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn classifier(&self) -> SuffixClassifier<'_> {
        SuffixClassifier::new(&self.suffixes)
    }

    pub fn find_entry(&self, filename: &str) -> Option<&ConfigEntry> {
        coverage::find_config_entry(filename, &self.suffixes, &self.entries)
    }

    /// Splits the files of one directory into retained, deletable, pending and
    /// not covered. Pure: touches neither the filesystem nor the files.
    pub fn plan_path(&self, path: &str, files: &[FileRecord]) -> PathPlan {
        let classifier = self.classifier();

        let retained = select_retained(
            files,
            &classifier,
            self.settings.keep_last,
            self.settings.non_backup_policy,
        );
        let not_covered = files_not_covered(files, &self.entries, &classifier);

        let keep: HashSet<&str> = retained
            .iter()
            .copied()
            .chain(not_covered.iter().copied())
            .map(|f| f.name.as_str())
            .collect();

        let mut plan = PathPlan {
            path: path.to_string(),
            retained: retained.into_iter().cloned().collect(),
            not_covered: not_covered.into_iter().cloned().collect(),
            ..PathPlan::default()
        };

        for file in files.iter().filter(|f| !keep.contains(f.name.as_str())) {
            if file.needs_action {
                debug!("{}: still needs action", file.name);
                plan.pending_action.push(file.clone());
            } else {
                debug!("{}: deletable", file.name);
                plan.deletable.push(file.clone());
            }
        }

        info!(
            "{}: {} retained, {} deletable, {} pending, {} not covered",
            path,
            plan.retained.len(),
            plan.deletable.len(),
            plan.pending_action.len(),
            plan.not_covered.len(),
        );
        plan
    }

    /// Copies of the configuration lines with the scan outcome filled in:
    /// whether any file matched the line and the newest matching mtime.
    pub fn entries_with_status(&self, scanned: &BTreeMap<String, Vec<FileRecord>>) -> Vec<ConfigEntry> {
        let classifier = self.classifier();
        let groups: BTreeMap<&str, Vec<(Group, &FileRecord)>> = scanned
            .iter()
            .map(|(path, files)| {
                let classified = files
                    .iter()
                    .map(|f| (classifier.classify(&f.name), f))
                    .collect();
                (path.as_str(), classified)
            })
            .collect();

        self.entries
            .iter()
            .map(|entry| {
                let mut entry = entry.clone();
                let newest = groups
                    .get(entry.path.as_str())
                    .into_iter()
                    .flatten()
                    .filter(|(group, _)| group.sort_key() == entry.key())
                    .map(|(_, file)| file.modified)
                    .max();
                entry.has_any_files = newest.is_some();
                entry.modtime = newest.map(DateTime::<Utc>::from);
                entry
            })
            .collect()
    }

    /// Scans every configured directory and plans each one. Deletes nothing.
    pub fn run(&self) -> RetentionReport {
        let paths: Vec<String> = coverage::unique_paths(&self.entries).into_iter().collect();
        info!("Scanning {} directories...", paths.len());

        let scan_start = Instant::now();
        let scanned = scanner::read_files_from_paths(&paths);
        let scan_duration = scan_start.elapsed();
        debug!("Scan completed in {:.2}s", scan_duration.as_secs_f64());

        let skipped_paths = paths
            .iter()
            .filter(|p| !scanned.contains_key(p.as_str()))
            .cloned()
            .collect();

        let plans = scanned
            .iter()
            .map(|(path, files)| self.plan_path(path, files))
            .collect();

        RetentionReport {
            scan_duration,
            plans,
            entries: self.entries_with_status(&scanned),
            skipped_paths,
        }
    }
}
