//! CSV export of a result set, in the shape the school's spreadsheet
//! templates expect: semicolon-delimited with Portuguese column labels.

use crate::domain::Contact;
use std::io;

/// Exported columns, in order. Labels are the spreadsheet headers.
pub const COLUMNS: [&str; 12] = [
    "ID",
    "Nome",
    "Telefone",
    "Email",
    "Curso/Interesse",
    "Data da visita",
    "Status",
    "Valor mensalidade",
    "Como conheceu",
    "Para quem é",
    "Atendido por",
    "Observações",
];

/// Writes `contacts` as semicolon-delimited CSV, header row first. Rows go
/// out in slice order, so callers export exactly what the table shows.
/// Optional fields are written as empty cells.
pub fn write_csv<W: io::Write>(out: W, contacts: &[Contact]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);
    writer.write_record(COLUMNS)?;
    for contact in contacts {
        writer.write_record([
            contact.id.to_string().as_str(),
            &contact.name,
            contact.phone.as_deref().unwrap_or(""),
            contact.email.as_deref().unwrap_or(""),
            contact.course.as_deref().unwrap_or(""),
            contact.visit_date.as_deref().unwrap_or(""),
            contact.status.as_deref().unwrap_or(""),
            contact.monthly_fee.as_deref().unwrap_or(""),
            contact.how_found.as_deref().unwrap_or(""),
            contact.course_for.as_deref().unwrap_or(""),
            contact.attended_by.as_deref().unwrap_or(""),
            contact.notes.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_csv;
    use crate::domain::{Contact, ContactDraft, ContactId};

    #[test]
    fn header_row_uses_portuguese_labels() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "ID;Nome;Telefone;Email;Curso/Interesse;Data da visita;Status;\
             Valor mensalidade;Como conheceu;Para quem é;Atendido por;Observações"
        );
    }

    #[test]
    fn rows_follow_slice_order_with_blank_optionals() {
        let contact = Contact::from_draft(
            ContactId::new(7),
            ContactDraft {
                name: "Ana Souza".to_string(),
                phone: Some("(11) 98765-4321".to_string()),
                course: Some("Robótica".to_string()),
                visit_date: Some("05/03/2025".to_string()),
                status: Some("Novo".to_string()),
                monthly_fee: Some("224,50".to_string()),
                ..ContactDraft::default()
            },
        );

        let mut buf = Vec::new();
        write_csv(&mut buf, &[contact]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "7;Ana Souza;(11) 98765-4321;;Robótica;05/03/2025;Novo;224,50;;;;"
        );
    }

    #[test]
    fn fields_containing_the_delimiter_are_quoted() {
        let contact = Contact::from_draft(
            ContactId::new(1),
            ContactDraft {
                name: "Silva; Maria".to_string(),
                ..ContactDraft::default()
            },
        );

        let mut buf = Vec::new();
        write_csv(&mut buf, &[contact]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("1;\"Silva; Maria\";"));
    }
}
