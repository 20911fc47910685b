pub mod config;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod file;
pub mod group;
pub mod name;
pub mod pattern;
pub mod platform;
pub mod retention;
pub mod scanner;

pub use crate::config::{AppSettings, ConfigEntry};
pub use engine::{PathPlan, RetentionEngine, RetentionReport};
pub use error::Error;
pub use file::{BackupFile, FileRecord};
pub use group::{Classifier, Group, SeriesSuffixes, SuffixClassifier};
pub use retention::{select_retained, NonBackupPolicy};
