use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use leadbook_core::export::write_csv;
use leadbook_core::{ContactDraft, ContactId};
use leadbook_store::repo::ChoiceColumn;
use leadbook_store::Store;

use crate::app::App;

#[derive(Debug, Clone)]
pub enum Action {
    LoadList,
    LoadChoices,
    Save(ContactDraft),
    Update(ContactId, ContactDraft),
    Delete(ContactId),
    Export(PathBuf),
}

pub fn execute_action(app: &mut App, store: &Store, action: Action) -> Result<()> {
    match action {
        Action::LoadList => {
            let contacts = store.contacts().list(&app.filter, Some(app.sort))?;
            app.apply_list(contacts);
            app.clear_error();
        }
        Action::LoadChoices => {
            app.attended_by_choices = store.contacts().distinct_values(ChoiceColumn::AttendedBy)?;
            app.status_choices = store.contacts().distinct_values(ChoiceColumn::Status)?;
        }
        Action::Save(draft) => {
            let contact = store.contacts().insert(draft)?;
            app.set_status(format!("Cadastrado {}", contact.name));
            app.pending_select = Some(contact.id);
            app.enqueue(Action::LoadList);
            app.enqueue(Action::LoadChoices);
        }
        Action::Update(id, draft) => {
            let contact = store.contacts().update(id, draft)?;
            app.set_status(format!("Atualizado {}", contact.name));
            app.pending_select = Some(contact.id);
            app.enqueue(Action::LoadList);
            app.enqueue(Action::LoadChoices);
        }
        Action::Delete(id) => {
            store.contacts().delete(id)?;
            app.set_status("Contato excluído");
            app.enqueue(Action::LoadList);
            app.enqueue(Action::LoadChoices);
        }
        Action::Export(path) => {
            // Export honors the active filter but always writes newest
            // first; the table's in-memory sort does not leak into the file.
            let contacts = store.contacts().list(&app.filter, None)?;
            let file = File::create(&path)
                .with_context(|| format!("criar arquivo {}", path.display()))?;
            write_csv(file, &contacts)
                .with_context(|| format!("gravar arquivo {}", path.display()))?;
            tracing::info!(count = contacts.len(), path = %path.display(), "exported contacts");
            app.set_status(format!(
                "Exportados {} contatos para {}",
                contacts.len(),
                path.display()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{execute_action, Action};
    use crate::app::App;
    use leadbook_core::sort::{SortColumn, SortSpec};
    use leadbook_core::ContactDraft;
    use leadbook_store::Store;

    fn draft(name: &str) -> ContactDraft {
        ContactDraft {
            name: name.to_string(),
            ..ContactDraft::default()
        }
    }

    #[test]
    fn export_writes_newest_first_regardless_of_table_sort() {
        let store = Store::open_in_memory().expect("open store");
        store.migrate().expect("migrate");
        store.contacts().insert(draft("Ana")).expect("insert");
        store.contacts().insert(draft("Zilda")).expect("insert");

        let mut app = App::new();
        app.sort = SortSpec {
            column: SortColumn::Name,
            ascending: true,
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contatos.csv");
        execute_action(&mut app, &store, Action::Export(path.clone())).expect("export");

        let text = std::fs::read_to_string(&path).expect("read csv");
        let mut rows = text.lines().skip(1);
        assert!(rows.next().expect("first row").starts_with("2;Zilda;"));
        assert!(rows.next().expect("second row").starts_with("1;Ana;"));
    }
}
