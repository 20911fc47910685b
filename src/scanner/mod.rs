mod walk;

pub use walk::{read_dir_records, read_files_from_paths};
