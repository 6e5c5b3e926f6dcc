use leadbook_core::export::write_csv;
use leadbook_core::ContactDraft;
use leadbook_store::query::ContactFilter;
use leadbook_store::Store;

#[test]
fn filtered_result_set_exports_as_semicolon_csv() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    for (name, course) in [("Ana Souza", "Robótica"), ("Bruno Lima", "Inglês")] {
        store
            .contacts()
            .insert(ContactDraft {
                name: name.to_string(),
                course: Some(course.to_string()),
                visit_date: Some("05/03/2025".to_string()),
                status: Some("Novo".to_string()),
                monthly_fee: Some("224,50".to_string()),
                ..ContactDraft::default()
            })
            .expect("insert");
    }

    let filter = ContactFilter {
        course: Some("Robótica".to_string()),
        ..ContactFilter::default()
    };
    let rows = store.contacts().list(&filter, None).expect("list");

    let mut buf = Vec::new();
    write_csv(&mut buf, &rows).expect("write csv");
    let text = String::from_utf8(buf).expect("utf8");

    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(
            "ID;Nome;Telefone;Email;Curso/Interesse;Data da visita;Status;\
             Valor mensalidade;Como conheceu;Para quem é;Atendido por;Observações"
        )
    );
    assert_eq!(
        lines.next(),
        Some("1;Ana Souza;;;Robótica;05/03/2025;Novo;224,50;;;;")
    );
    assert_eq!(lines.next(), None);
}
