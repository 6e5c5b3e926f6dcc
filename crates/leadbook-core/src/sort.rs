//! In-memory column sorting of an already-loaded result set. The store always
//! returns rows newest-first; clicking through columns re-orders the loaded
//! rows without touching SQL.

use crate::domain::Contact;
use crate::format::{date::VisitDate, parse_fee_display};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Name,
    Phone,
    Email,
    Course,
    VisitDate,
    Status,
    MonthlyFee,
    HowFound,
    CourseFor,
    AttendedBy,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub ascending: bool,
}

impl SortSpec {
    /// The order rows arrive from the store in.
    pub fn by_id_desc() -> Self {
        Self {
            column: SortColumn::Id,
            ascending: false,
        }
    }

    /// Re-selecting the current column flips direction; selecting a new one
    /// starts ascending.
    pub fn toggle(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                ascending: !self.ascending,
            }
        } else {
            Self {
                column,
                ascending: true,
            }
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::by_id_desc()
    }
}

pub fn sort_contacts(contacts: &mut [Contact], spec: SortSpec) {
    match spec.column {
        SortColumn::Id => contacts.sort_by_key(|c| c.id.as_i64()),
        SortColumn::MonthlyFee => contacts.sort_by_key(fee_key),
        SortColumn::VisitDate => contacts.sort_by_key(date_key),
        column => contacts.sort_by_key(|c| text_key(c, column)),
    }
    if !spec.ascending {
        contacts.reverse();
    }
}

/// Fees compare numerically so `9,00` sorts before `10,00`. Blank or
/// unreadable values sink to zero.
fn fee_key(contact: &Contact) -> Decimal {
    contact
        .monthly_fee
        .as_deref()
        .and_then(parse_fee_display)
        .unwrap_or(Decimal::ZERO)
}

/// Dates compare chronologically, not as `DD/MM/YYYY` text. Blank or
/// unreadable values sort earliest.
fn date_key(contact: &Contact) -> NaiveDate {
    contact
        .visit_date
        .as_deref()
        .and_then(VisitDate::parse)
        .map(|d| d.date())
        .unwrap_or(NaiveDate::MIN)
}

fn text_key(contact: &Contact, column: SortColumn) -> String {
    let value = match column {
        SortColumn::Name => Some(contact.name.as_str()),
        SortColumn::Phone => contact.phone.as_deref(),
        SortColumn::Email => contact.email.as_deref(),
        SortColumn::Course => contact.course.as_deref(),
        SortColumn::Status => contact.status.as_deref(),
        SortColumn::HowFound => contact.how_found.as_deref(),
        SortColumn::CourseFor => contact.course_for.as_deref(),
        SortColumn::AttendedBy => contact.attended_by.as_deref(),
        SortColumn::Notes => contact.notes.as_deref(),
        SortColumn::Id | SortColumn::MonthlyFee | SortColumn::VisitDate => None,
    };
    value.unwrap_or_default().to_lowercase()
}
