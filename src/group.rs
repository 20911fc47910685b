use crate::name::extract_series_name;
use std::collections::HashMap;

/// Series name to the suffixes configured for it, in configuration order.
pub type SeriesSuffixes = HashMap<String, Vec<String>>;

/// Where a filename belongs.
///
/// ```text
/// dbname_2021-08-10T10-04-00-717-differ.rar
/// ^----^                         ^--------^
/// series                         suffix
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Group {
    /// No `_YYYY-MM` anchor in the name.
    NotABackupFile,
    /// A known series name, but none of its configured suffixes ends the name.
    UnrecognizedSuffix(String),
    /// Series name and the matched suffix, which runs to the end of the filename.
    Matched { series: String, suffix: String },
}

impl Group {
    /// `(series, suffix)` used to order and compare groups.
    ///
    /// `NotABackupFile` orders as `("", "")`. `UnrecognizedSuffix` has an empty suffix.
    pub fn sort_key(&self) -> (&str, &str) {
        match self {
            Group::NotABackupFile => ("", ""),
            Group::UnrecognizedSuffix(series) => (series.as_str(), ""),
            Group::Matched { series, suffix } => (series.as_str(), suffix.as_str()),
        }
    }

    pub fn series(&self) -> Option<&str> {
        match self {
            Group::NotABackupFile => None,
            Group::UnrecognizedSuffix(series) | Group::Matched { series, .. } => Some(series.as_str()),
        }
    }
}

/// Decides which group a filename belongs to.
///
/// The retention selector and coverage checks take any `Classifier`, so tests
/// and alternate naming schemes can plug in their own rules. Closures of type
/// `Fn(&str) -> Group` implement it.
pub trait Classifier {
    fn classify(&self, filename: &str) -> Group;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> Group,
{
    fn classify(&self, filename: &str) -> Group {
        self(filename)
    }
}

/// Groups backup filenames by series name and configured suffix.
#[derive(Debug, Clone, Copy)]
pub struct SuffixClassifier<'a> {
    suffixes: &'a SeriesSuffixes,
}

impl<'a> SuffixClassifier<'a> {
    pub fn new(suffixes: &'a SeriesSuffixes) -> Self {
        Self { suffixes }
    }
}

impl Classifier for SuffixClassifier<'_> {
    fn classify(&self, filename: &str) -> Group {
        classify(filename, self.suffixes)
    }
}

/// Maps `filename` to its group.
///
/// Candidate suffixes are tried in configured order; the first one found in
/// the name (rightmost occurrence) wins.
pub fn classify(filename: &str, suffixes: &SeriesSuffixes) -> Group {
    let series = extract_series_name(filename);
    if series.is_empty() {
        return Group::NotABackupFile;
    }

    let matched = suffixes
        .get(series)
        .into_iter()
        .flatten()
        .find_map(|candidate| filename.rfind(candidate.as_str()));

    match matched {
        Some(pos) => Group::Matched {
            series: series.to_string(),
            suffix: filename[pos..].to_string(),
        },
        None => Group::UnrecognizedSuffix(series.to_string()),
    }
}
