use backup_retention::config::{sort_entries, ConfigEntry};
use backup_retention::coverage::{files_not_covered, find_config_entry, series_to_suffixes};
use backup_retention::{select_retained, Classifier, Group, NonBackupPolicy, SuffixClassifier};

fn config() -> Vec<ConfigEntry> {
    let mut entries = vec![
        ConfigEntry::new("/srv/backup", "ubd_store_2010", "-FULL.bak", 14),
        ConfigEntry::new("/srv/backup", "ubd_store_2010", "-differ.dif", 3),
        ConfigEntry::new("/srv/backup", "seriesX", "-FULL.bak", 7),
    ];
    sort_entries(&mut entries);
    entries
}

fn scenario_files() -> Vec<&'static str> {
    vec![
        "A_logfile.txt",
        "ubd_store_2010_2018-11-11-FULL.bak",
        "ubd_store_2010_2018-11-12-FULL.bak",
        "ubd_store_2010_2018-11-10-differ.dif",
        "ubd_store_2010_2018-11-13-differ.dif",
        "seriesX_2020-01-01T00-00-00-001-unknown.ext",
        "seriesX_2020-01-02T00-00-00-001-FULL.bak",
    ]
}

#[test]
fn test_scenario_keep_one() {
    let entries = config();
    let suffixes = series_to_suffixes(&entries);
    let classifier = SuffixClassifier::new(&suffixes);
    let files = scenario_files();

    let retained = select_retained(&files, &classifier, 1, NonBackupPolicy::Exclude);
    assert_eq!(
        retained,
        [
            &"ubd_store_2010_2018-11-13-differ.dif",
            &"ubd_store_2010_2018-11-12-FULL.bak",
            &"seriesX_2020-01-02T00-00-00-001-FULL.bak",
        ]
    );
}

#[test]
fn test_unrecognized_suffix_is_not_covered_and_not_retained() {
    let entries = config();
    let suffixes = series_to_suffixes(&entries);
    let classifier = SuffixClassifier::new(&suffixes);
    let files = scenario_files();
    let odd = "seriesX_2020-01-01T00-00-00-001-unknown.ext";

    let retained = select_retained(&files, &classifier, 10, NonBackupPolicy::KeepNewest);
    assert!(!retained.contains(&&odd));

    let not_covered = files_not_covered(&files, &entries, &classifier);
    assert_eq!(not_covered, [&"A_logfile.txt", &odd]);
}

#[test]
fn test_keep_newest_policy_surfaces_one_non_backup_file() {
    let entries = config();
    let suffixes = series_to_suffixes(&entries);
    let classifier = SuffixClassifier::new(&suffixes);
    let files = scenario_files();

    let retained = select_retained(&files, &classifier, 1, NonBackupPolicy::KeepNewest);
    assert_eq!(retained.last(), Some(&&"A_logfile.txt"));
    assert_eq!(retained.len(), 4);
}

#[test]
fn test_retained_count_per_group() {
    let entries = config();
    let suffixes = series_to_suffixes(&entries);
    let classifier = SuffixClassifier::new(&suffixes);
    let files: Vec<String> = (1..=9)
        .map(|day| format!("ubd_store_2010_2018-11-0{}T12-00-00-000-FULL.bak", day))
        .collect();

    for keep in [1usize, 3, 9, 20] {
        let retained = select_retained(&files, &classifier, keep, NonBackupPolicy::Exclude);
        assert_eq!(retained.len(), keep.min(files.len()));
        // exactly the newest ones, newest first
        let expected: Vec<&String> = files.iter().rev().take(keep).collect();
        assert_eq!(retained, expected);
    }
}

#[test]
fn test_find_config_entry_for_messages() {
    let entries = config();
    let suffixes = series_to_suffixes(&entries);

    let entry = find_config_entry("ubd_store_2010_2018-11-10-differ.dif", &suffixes, &entries)
        .expect("differential line");
    assert_eq!(entry.days, 3);
    assert!(find_config_entry("A_logfile.txt", &suffixes, &entries).is_none());
}

#[test]
fn test_classifier_distinguishes_the_three_outcomes() {
    let entries = config();
    let suffixes = series_to_suffixes(&entries);
    let classifier = SuffixClassifier::new(&suffixes);

    assert_eq!(classifier.classify("A_logfile.txt"), Group::NotABackupFile);
    assert_eq!(
        classifier.classify("seriesX_2020-01-01T00-00-00-001-unknown.ext"),
        Group::UnrecognizedSuffix("seriesX".to_string())
    );
    assert!(matches!(
        classifier.classify("seriesX_2020-01-02T00-00-00-001-FULL.bak"),
        Group::Matched { .. }
    ));
}
