//! Additive schema migration. The base table is created if absent, then the
//! live column list is inspected and any column added after the first release
//! is bolted on with `ALTER TABLE ADD COLUMN`. Running against an up-to-date
//! database is a no-op, so this is safe to call on every startup.

use crate::error::Result;
use leadbook_core::format::phone_digits;
use rusqlite::{params, Connection};
use std::collections::HashSet;

const BASE_SCHEMA: &str = include_str!("../migrations/001_init.sql");

/// Columns added after the base schema shipped. Order matters only for
/// readability of `PRAGMA table_info` output on old databases.
const OPTIONAL_COLUMNS: &[&str] = &[
    "monthly_fee",
    "how_found",
    "course_for",
    "attended_by",
    "phone_digits",
];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(BASE_SCHEMA)?;

    let existing = table_columns(&tx, "contacts")?;
    for column in OPTIONAL_COLUMNS {
        if existing.contains(*column) {
            continue;
        }
        tracing::debug!(column, "adding missing column");
        tx.execute_batch(&format!("ALTER TABLE contacts ADD COLUMN {column} TEXT;"))?;
    }

    backfill_phone_digits(&tx)?;
    tx.commit()?;
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    let mut columns = HashSet::new();
    for name in rows {
        columns.insert(name?);
    }
    Ok(columns)
}

/// Rows written before the `phone_digits` column existed get their match key
/// derived from the stored phone. Digit extraction lives in the domain crate,
/// so this reads the rows out and writes the keys back one by one.
fn backfill_phone_digits(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT id, phone FROM contacts
         WHERE phone IS NOT NULL AND phone_digits IS NULL;",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;
    let pending: Vec<(i64, String)> = rows.collect::<rusqlite::Result<_>>()?;

    for (id, phone) in pending {
        conn.execute(
            "UPDATE contacts SET phone_digits = ?1 WHERE id = ?2;",
            params![phone_digits(&phone), id],
        )?;
    }
    Ok(())
}
