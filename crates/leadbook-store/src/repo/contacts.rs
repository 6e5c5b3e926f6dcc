use crate::error::{Result, StoreError};
use crate::query::{ContactFilter, CONTACT_COLUMNS};
use leadbook_core::format::phone_digits;
use leadbook_core::sort::{sort_contacts, SortSpec};
use leadbook_core::{Contact, ContactDraft, ContactId};
use rusqlite::{params, params_from_iter, Connection, Row};

/// Columns the filter panel offers as drop-down choices, sourced from the
/// values already stored. Closed set so callers cannot interpolate arbitrary
/// column names into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceColumn {
    AttendedBy,
    Status,
}

impl ChoiceColumn {
    fn column(self) -> &'static str {
        match self {
            ChoiceColumn::AttendedBy => "attended_by",
            ChoiceColumn::Status => "status",
        }
    }
}

pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, draft: ContactDraft) -> Result<Contact> {
        draft.validate()?;
        self.conn.execute(
            "INSERT INTO contacts
             (name, phone, email, course, visit_date, status, monthly_fee,
              how_found, course_for, attended_by, notes, phone_digits)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                draft.name,
                draft.phone,
                draft.email,
                draft.course,
                draft.visit_date,
                draft.status,
                draft.monthly_fee,
                draft.how_found,
                draft.course_for,
                draft.attended_by,
                draft.notes,
                draft.phone.as_deref().map(phone_digits),
            ],
        )?;
        let id = ContactId::new(self.conn.last_insert_rowid());
        tracing::debug!(id = id.as_i64(), "inserted contact");
        Ok(Contact::from_draft(id, draft))
    }

    pub fn update(&self, id: ContactId, draft: ContactDraft) -> Result<Contact> {
        draft.validate()?;
        let changed = self.conn.execute(
            "UPDATE contacts SET
             name = ?1, phone = ?2, email = ?3, course = ?4, visit_date = ?5,
             status = ?6, monthly_fee = ?7, how_found = ?8, course_for = ?9,
             attended_by = ?10, notes = ?11, phone_digits = ?12
             WHERE id = ?13;",
            params![
                draft.name,
                draft.phone,
                draft.email,
                draft.course,
                draft.visit_date,
                draft.status,
                draft.monthly_fee,
                draft.how_found,
                draft.course_for,
                draft.attended_by,
                draft.notes,
                draft.phone.as_deref().map(phone_digits),
                id.as_i64(),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.as_i64()));
        }
        tracing::debug!(id = id.as_i64(), "updated contact");
        Ok(Contact::from_draft(id, draft))
    }

    pub fn delete(&self, id: ContactId) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id.as_i64()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.as_i64()));
        }
        tracing::debug!(id = id.as_i64(), "deleted contact");
        Ok(())
    }

    pub fn get(&self, id: ContactId) -> Result<Option<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1;"
        ))?;
        let mut rows = stmt.query([id.as_i64()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(contact_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Loads each contact matching `filter`, newest first unless `sort` says
    /// otherwise. Sorting happens in memory on the loaded rows.
    pub fn list(&self, filter: &ContactFilter, sort: Option<SortSpec>) -> Result<Vec<Contact>> {
        let query = filter.to_sql();
        let mut stmt = self.conn.prepare(&query.sql)?;
        let rows = stmt.query_map(params_from_iter(query.params), |row| {
            contact_from_row(row)
        })?;
        let mut contacts: Vec<Contact> = rows.collect::<rusqlite::Result<_>>()?;

        if let Some(spec) = sort {
            sort_contacts(&mut contacts, spec);
        }
        Ok(contacts)
    }

    /// Distinct non-blank values of a choice column, for the filter panel's
    /// drop-downs.
    pub fn distinct_values(&self, column: ChoiceColumn) -> Result<Vec<String>> {
        let name = column.column();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT DISTINCT {name} FROM contacts
             WHERE {name} IS NOT NULL AND trim({name}) != ''
             ORDER BY {name};"
        ))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let values = rows.collect::<rusqlite::Result<_>>()?;
        Ok(values)
    }
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: ContactId::new(row.get(0)?),
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        course: row.get(4)?,
        visit_date: row.get(5)?,
        status: row.get(6)?,
        monthly_fee: row.get(7)?,
        how_found: row.get(8)?,
        course_for: row.get(9)?,
        attended_by: row.get(10)?,
        notes: row.get(11)?,
    })
}
