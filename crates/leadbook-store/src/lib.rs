pub mod error;
pub mod migrate;
pub mod paths;
pub mod query;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Owns the SQLite connection for one contacts database. The app is a
/// single-process desktop tool, so the store never contends with other
/// writers; WAL is kept for crash safety, not concurrency.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self::attach(Connection::open(path)?)?;
        restrict_db_permissions(path)?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::attach(Connection::open_in_memory()?)
    }

    fn attach(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn contacts(&self) -> repo::ContactsRepo<'_> {
        repo::ContactsRepo::new(&self.conn)
    }
}

// The database holds personal data; keep it readable by the owner only.
#[cfg(unix)]
fn restrict_db_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Ok(metadata) = fs::metadata(path) {
        let mut perms = metadata.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn restrict_db_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Store;

    #[test]
    fn open_configures_wal_journaling() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(&dir.path().join("contacts.db")).expect("open");
        let mode: String = store
            .connection()
            .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            .expect("journal_mode");
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
