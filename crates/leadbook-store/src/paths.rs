use std::path::{Path, PathBuf};

pub const DB_FILENAME: &str = "contacts.db";

/// The database lives in the working directory unless the caller says
/// otherwise. Single-user desktop tool; the data sits next to where it is
/// run.
pub fn default_db_path() -> PathBuf {
    PathBuf::from(DB_FILENAME)
}

pub fn db_path_in(dir: &Path) -> PathBuf {
    dir.join(DB_FILENAME)
}
