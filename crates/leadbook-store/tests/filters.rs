use leadbook_core::format::VisitDate;
use leadbook_core::sort::{SortColumn, SortSpec};
use leadbook_core::ContactDraft;
use leadbook_store::query::ContactFilter;
use leadbook_store::repo::ChoiceColumn;
use leadbook_store::Store;

fn seeded_store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let rows = [
        ("Ana Souza", "(11) 98765-4321", "Inglês", "31/12/2024", "Novo", "Carla"),
        ("Bruno Lima", "(21) 3456-7890", "Robótica", "02/01/2025", "Em contato", "Carla"),
        ("Carmen Dias", "98765-4321", "Inglês", "15/01/2025", "Fechou matrícula", "Paulo"),
    ];
    for (name, phone, course, visit, status, attended_by) in rows {
        store
            .contacts()
            .insert(ContactDraft {
                name: name.to_string(),
                phone: Some(phone.to_string()),
                course: Some(course.to_string()),
                visit_date: Some(visit.to_string()),
                status: Some(status.to_string()),
                attended_by: Some(attended_by.to_string()),
                ..ContactDraft::default()
            })
            .expect("insert");
    }
    store
}

fn names(store: &Store, filter: &ContactFilter) -> Vec<String> {
    store
        .contacts()
        .list(filter, None)
        .expect("list")
        .into_iter()
        .map(|c| c.name)
        .collect()
}

#[test]
fn name_filter_matches_substrings() {
    let store = seeded_store();
    let filter = ContactFilter {
        name: Some("an".to_string()),
        ..ContactFilter::default()
    };
    assert_eq!(names(&store, &filter), vec!["Ana Souza"]);
}

#[test]
fn phone_filter_ignores_punctuation_on_both_sides() {
    let store = seeded_store();
    let filter = ContactFilter {
        phone: Some("11 9876".to_string()),
        ..ContactFilter::default()
    };
    assert_eq!(names(&store, &filter), vec!["Ana Souza"]);

    // No-area-code digits match every row containing them.
    let filter = ContactFilter {
        phone: Some("98765-4321".to_string()),
        ..ContactFilter::default()
    };
    assert_eq!(names(&store, &filter), vec!["Carmen Dias", "Ana Souza"]);
}

#[test]
fn course_and_attended_by_match_exactly() {
    let store = seeded_store();
    let filter = ContactFilter {
        course: Some("Inglês".to_string()),
        attended_by: Some("Carla".to_string()),
        ..ContactFilter::default()
    };
    assert_eq!(names(&store, &filter), vec!["Ana Souza"]);
}

#[test]
fn date_range_compares_chronologically_across_year_boundary() {
    let store = seeded_store();
    let filter = ContactFilter {
        visit_from: Some(VisitDate::parse("31/12/2024").expect("from")),
        visit_to: Some(VisitDate::parse("10/01/2025").expect("to")),
        ..ContactFilter::default()
    };
    assert_eq!(names(&store, &filter), vec!["Bruno Lima", "Ana Souza"]);

    let open_ended = ContactFilter {
        visit_from: Some(VisitDate::parse("03/01/2025").expect("from")),
        ..ContactFilter::default()
    };
    assert_eq!(names(&store, &open_ended), vec!["Carmen Dias"]);
}

#[test]
fn list_applies_requested_sort() {
    let store = seeded_store();
    let rows = store
        .contacts()
        .list(
            &ContactFilter::default(),
            Some(SortSpec {
                column: SortColumn::Name,
                ascending: true,
            }),
        )
        .expect("list");
    let names: Vec<&str> = rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ana Souza", "Bruno Lima", "Carmen Dias"]);
}

#[test]
fn distinct_values_are_deduplicated_and_ordered() {
    let store = seeded_store();
    let attended = store
        .contacts()
        .distinct_values(ChoiceColumn::AttendedBy)
        .expect("distinct");
    assert_eq!(attended, vec!["Carla", "Paulo"]);

    let statuses = store
        .contacts()
        .distinct_values(ChoiceColumn::Status)
        .expect("distinct");
    assert_eq!(statuses, vec!["Em contato", "Fechou matrícula", "Novo"]);
}
