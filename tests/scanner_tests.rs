use std::fs;
use std::path::Path;
use tempfile::tempdir;

use backup_retention::config::{read_config, AppSettings};
use backup_retention::scanner::{read_dir_records, read_files_from_paths};
use backup_retention::{NonBackupPolicy, RetentionEngine};

/// Layout:
///   backups/
///     ubd_store_2010_2018-11-11-FULL.bak
///     ubd_store_2010_2018-11-12-FULL.bak
///     ubd_store_2010_2018-11-10-differ.dif
///     ubd_store_2010_2018-11-13-differ.dif
///     ubd_store_2010_2018-11-14-manual.zip   ← unconfigured suffix
///     A_logfile.txt                          ← not a backup file
///     nested_2018-11-11-FULL.bak/            ← directory, ignored
fn create_backup_dir(root: &Path) {
    fs::create_dir_all(root).unwrap();
    for name in [
        "ubd_store_2010_2018-11-11-FULL.bak",
        "ubd_store_2010_2018-11-12-FULL.bak",
        "ubd_store_2010_2018-11-10-differ.dif",
        "ubd_store_2010_2018-11-13-differ.dif",
        "ubd_store_2010_2018-11-14-manual.zip",
        "A_logfile.txt",
    ] {
        fs::write(root.join(name), name).unwrap();
    }
    fs::create_dir(root.join("nested_2018-11-11-FULL.bak")).unwrap();
}

fn write_config(dir: &Path, backups: &Path, missing: &Path) -> String {
    let json = serde_json::json!([
        {"path": backups, "Filename": "ubd_store_2010", "Suffix": "-FULL.bak", "Days": 14},
        {"path": backups, "Filename": "ubd_store_2010", "Suffix": "-differ.dif", "Days": 3},
        {"path": missing, "Filename": "gone", "Suffix": ".7z", "Days": 1},
    ]);
    let config_path = dir.join("dblist.json");
    fs::write(&config_path, serde_json::to_vec_pretty(&json).unwrap()).unwrap();
    config_path.to_string_lossy().into_owned()
}

fn names<'a>(files: impl IntoIterator<Item = &'a backup_retention::FileRecord>) -> Vec<&'a str> {
    files.into_iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_read_dir_records_keeps_only_backup_files() {
    let tmp = tempdir().unwrap();
    let backups = tmp.path().join("backups");
    create_backup_dir(&backups);

    let records = read_dir_records(&backups).unwrap();
    assert_eq!(
        names(&records),
        [
            "ubd_store_2010_2018-11-10-differ.dif",
            "ubd_store_2010_2018-11-11-FULL.bak",
            "ubd_store_2010_2018-11-12-FULL.bak",
            "ubd_store_2010_2018-11-13-differ.dif",
            "ubd_store_2010_2018-11-14-manual.zip",
        ]
    );
    // nothing has been uploaded yet
    assert!(records.iter().all(|r| r.needs_action));
}

#[test]
fn test_read_files_from_paths_skips_unreadable_directories() {
    let tmp = tempdir().unwrap();
    let backups = tmp.path().join("backups");
    create_backup_dir(&backups);
    let backups = backups.to_string_lossy().into_owned();
    let missing = tmp.path().join("missing").to_string_lossy().into_owned();

    let scanned = read_files_from_paths(&[backups.clone(), missing.clone()]);
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[&backups].len(), 5);
    assert!(!scanned.contains_key(&missing));
}

#[test]
fn test_full_retention_pipeline() {
    let tmp = tempdir().unwrap();
    let backups = tmp.path().join("backups");
    let missing = tmp.path().join("missing");
    create_backup_dir(&backups);
    let config_path = write_config(tmp.path(), &backups, &missing);

    let entries = read_config(&config_path).unwrap();
    assert_eq!(entries.len(), 3);

    let settings = AppSettings {
        config_file: config_path,
        keep_last: 1,
        non_backup_policy: NonBackupPolicy::Exclude,
    };
    let engine = RetentionEngine::new(entries, settings);
    let report = engine.run();

    assert_eq!(report.skipped_paths, [missing.to_string_lossy().into_owned()]);
    assert_eq!(report.plans.len(), 1);

    let plan = &report.plans[0];
    assert_eq!(
        names(&plan.retained),
        [
            "ubd_store_2010_2018-11-13-differ.dif",
            "ubd_store_2010_2018-11-12-FULL.bak",
        ]
    );
    assert_eq!(names(&plan.not_covered), ["ubd_store_2010_2018-11-14-manual.zip"]);
    // fresh files still carry the needs-action flag, so nothing is deletable yet
    assert!(plan.deletable.is_empty());
    assert_eq!(
        names(&plan.pending_action),
        [
            "ubd_store_2010_2018-11-10-differ.dif",
            "ubd_store_2010_2018-11-11-FULL.bak",
        ]
    );

    let gone = report.entries.iter().find(|e| e.series == "gone").unwrap();
    assert!(!gone.has_any_files);
    assert!(report
        .entries
        .iter()
        .filter(|e| e.series == "ubd_store_2010")
        .all(|e| e.has_any_files && e.modtime.is_some()));
}

#[test]
fn test_file_configured_as_directory_is_skipped() {
    let tmp = tempdir().unwrap();
    let backups = tmp.path().join("backups");
    create_backup_dir(&backups);
    let not_a_dir = backups.join("ubd_store_2010_2018-11-11-FULL.bak");

    assert!(read_dir_records(&not_a_dir).is_err());

    let not_a_dir = not_a_dir.to_string_lossy().into_owned();
    let scanned = read_files_from_paths(&[not_a_dir.clone()]);
    assert!(scanned.is_empty());

    let config_path = write_config(tmp.path(), Path::new(&not_a_dir), &tmp.path().join("missing"));
    let settings = AppSettings {
        config_file: config_path.clone(),
        ..AppSettings::default()
    };
    let report = RetentionEngine::new(read_config(&config_path).unwrap(), settings).run();
    assert!(report.plans.is_empty());
    assert!(report.skipped_paths.contains(&not_a_dir));
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_names_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = tempdir().unwrap();
    let backups = tmp.path().join("backups");
    create_backup_dir(&backups);
    let raw = OsStr::from_bytes(b"ubd_store_2010_2018-11-15-\xffFULL.bak");
    fs::write(backups.join(raw), b"x").unwrap();

    let records = read_dir_records(&backups).unwrap();
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| !r.name.contains('\u{FFFD}')));
}
