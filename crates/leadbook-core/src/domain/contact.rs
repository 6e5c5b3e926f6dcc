use crate::domain::ids::ContactId;
use crate::error::CoreError;
use crate::format::currency;
use crate::format::date::VisitDate;
use serde::{Deserialize, Serialize};

/// One persisted lead. All fields except `id` and `name` are optional text;
/// `visit_date` holds canonical `DD/MM/YYYY` and `monthly_fee` the grouped
/// `1.234,56` display produced by the normalizers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub visit_date: Option<String>,
    pub status: Option<String>,
    pub monthly_fee: Option<String>,
    pub how_found: Option<String>,
    pub course_for: Option<String>,
    pub attended_by: Option<String>,
    pub notes: Option<String>,
}

/// The writable fields of a contact, before the store has assigned an id.
/// Used for both insert and update-by-id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub visit_date: Option<String>,
    pub status: Option<String>,
    pub monthly_fee: Option<String>,
    pub how_found: Option<String>,
    pub course_for: Option<String>,
    pub attended_by: Option<String>,
    pub notes: Option<String>,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }

        if let Some(raw) = self.visit_date.as_deref() {
            if VisitDate::parse(raw).is_none() {
                return Err(CoreError::InvalidVisitDate(raw.to_string()));
            }
        }

        if let Some(raw) = self.monthly_fee.as_deref() {
            if !raw.trim().is_empty() && currency::parse_fee_display(raw).is_none() {
                return Err(CoreError::InvalidMonthlyFee(raw.to_string()));
            }
        }

        Ok(())
    }
}

impl Contact {
    pub fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            course: draft.course,
            visit_date: draft.visit_date,
            status: draft.status,
            monthly_fee: draft.monthly_fee,
            how_found: draft.how_found,
            course_for: draft.course_for,
            attended_by: draft.attended_by,
            notes: draft.notes,
        }
    }

    /// Copies the persisted fields back into a draft, verbatim. Used when a
    /// row is loaded into the edit form; stored values are trusted as-is.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            course: self.course.clone(),
            visit_date: self.visit_date.clone(),
            status: self.status.clone(),
            monthly_fee: self.monthly_fee.clone(),
            how_found: self.how_found.clone(),
            course_for: self.course_for.clone(),
            attended_by: self.attended_by.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ContactDraft;
    use crate::error::CoreError;

    fn draft(name: &str) -> ContactDraft {
        ContactDraft {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn draft_requires_name() {
        assert_eq!(draft("  ").validate(), Err(CoreError::EmptyName));
        assert!(draft("Ana").validate().is_ok());
    }

    #[test]
    fn draft_rejects_invalid_visit_date() {
        let mut bad = draft("Ana");
        bad.visit_date = Some("31/04/2024".to_string());
        assert!(matches!(
            bad.validate(),
            Err(CoreError::InvalidVisitDate(_))
        ));

        let mut good = draft("Ana");
        good.visit_date = Some("29/02/2024".to_string());
        assert!(good.validate().is_ok());
    }

    #[test]
    fn draft_rejects_garbage_fee() {
        let mut bad = draft("Ana");
        bad.monthly_fee = Some("abc".to_string());
        assert!(matches!(
            bad.validate(),
            Err(CoreError::InvalidMonthlyFee(_))
        ));

        let mut good = draft("Ana");
        good.monthly_fee = Some("1.234,56".to_string());
        assert!(good.validate().is_ok());
    }
}
