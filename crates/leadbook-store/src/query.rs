use leadbook_core::format::{phone_digits, VisitDate};
use rusqlite::types::Value;

pub const CONTACT_COLUMNS: &str =
    "id, name, phone, email, course, visit_date, status, monthly_fee, \
     how_found, course_for, attended_by, notes";

/// Rebuilds the `DD/MM/YYYY` display form stored in `visit_date` as an ISO
/// date, so range comparisons work as string comparisons.
const VISIT_ISO_EXPR: &str =
    "(substr(visit_date, 7, 4) || '-' || substr(visit_date, 4, 2) || '-' || substr(visit_date, 1, 2))";

/// Search criteria for the contact list. Empty means "everything". Name and
/// phone match substrings; the rest match exactly. Phone input is reduced to
/// digits and matched against the stored digit key, so `11 9876` finds
/// `(11) 98765-4321`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub attended_by: Option<String>,
    pub course: Option<String>,
    pub status: Option<String>,
    pub visit_from: Option<VisitDate>,
    pub visit_to: Option<VisitDate>,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl ContactFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_sql(&self) -> SqlQuery {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(name) = trimmed(&self.name) {
            clauses.push("name LIKE ?".to_string());
            params.push(Value::from(format!("%{name}%")));
        }

        if let Some(phone) = trimmed(&self.phone) {
            let digits = phone_digits(phone);
            if !digits.is_empty() {
                clauses.push("phone_digits LIKE ?".to_string());
                params.push(Value::from(format!("%{digits}%")));
            }
        }

        for (column, value) in [
            ("attended_by", &self.attended_by),
            ("course", &self.course),
            ("status", &self.status),
        ] {
            if let Some(value) = trimmed(value) {
                clauses.push(format!("{column} = ?"));
                params.push(Value::from(value.to_string()));
            }
        }

        match (self.visit_from, self.visit_to) {
            (Some(from), Some(to)) => {
                clauses.push(format!(
                    "visit_date IS NOT NULL AND {VISIT_ISO_EXPR} BETWEEN ? AND ?"
                ));
                params.push(Value::from(from.iso()));
                params.push(Value::from(to.iso()));
            }
            (Some(from), None) => {
                clauses.push(format!("visit_date IS NOT NULL AND {VISIT_ISO_EXPR} >= ?"));
                params.push(Value::from(from.iso()));
            }
            (None, Some(to)) => {
                clauses.push(format!("visit_date IS NOT NULL AND {VISIT_ISO_EXPR} <= ?"));
                params.push(Value::from(to.iso()));
            }
            (None, None) => {}
        }

        let mut sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id DESC;");

        SqlQuery { sql, params }
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::ContactFilter;
    use leadbook_core::format::VisitDate;
    use rusqlite::types::Value;

    #[test]
    fn empty_filter_selects_everything_newest_first() {
        let query = ContactFilter::default().to_sql();
        assert!(!query.sql.contains("WHERE"));
        assert!(query.sql.ends_with("ORDER BY id DESC;"));
        assert!(query.params.is_empty());
    }

    #[test]
    fn clauses_are_joined_with_and() {
        let filter = ContactFilter {
            name: Some("ana".to_string()),
            status: Some("Novo".to_string()),
            ..ContactFilter::default()
        };
        let query = filter.to_sql();
        assert!(query.sql.contains("name LIKE ? AND status = ?"));
        assert_eq!(query.params.len(), 2);
    }

    #[test]
    fn phone_criterion_matches_on_digits_only() {
        let filter = ContactFilter {
            phone: Some("(11) 9876".to_string()),
            ..ContactFilter::default()
        };
        let query = filter.to_sql();
        assert!(query.sql.contains("phone_digits LIKE ?"));
        assert_eq!(query.params[0], Value::from("%119876%".to_string()));
    }

    #[test]
    fn digitless_phone_input_is_ignored() {
        let filter = ContactFilter {
            phone: Some("abc".to_string()),
            ..ContactFilter::default()
        };
        assert!(filter.to_sql().params.is_empty());
    }

    #[test]
    fn date_range_rebuilds_iso_from_display_form() {
        let filter = ContactFilter {
            visit_from: Some(VisitDate::parse("01/01/2025").unwrap()),
            visit_to: Some(VisitDate::parse("31/01/2025").unwrap()),
            ..ContactFilter::default()
        };
        let query = filter.to_sql();
        assert!(query.sql.contains("substr(visit_date, 7, 4)"));
        assert!(query.sql.contains("BETWEEN ? AND ?"));
        assert_eq!(query.params[0], Value::from("2025-01-01".to_string()));
        assert_eq!(query.params[1], Value::from("2025-01-31".to_string()));
    }

    #[test]
    fn blank_strings_count_as_unset() {
        let filter = ContactFilter {
            name: Some("   ".to_string()),
            ..ContactFilter::default()
        };
        assert!(filter.to_sql().params.is_empty());
    }
}
