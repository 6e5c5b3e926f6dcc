use std::collections::VecDeque;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use leadbook_core::domain::choices::{
    COURSE_FOR_CHOICES, DEFAULT_COURSE_FOR, DEFAULT_HOW_FOUND, DEFAULT_STATUS, HOW_FOUND_CHOICES,
    STATUS_CHOICES,
};
use leadbook_core::domain::Course;
use leadbook_core::format::{date, normalize_currency, normalize_phone, phone, VisitDate};
use leadbook_core::sort::{sort_contacts, SortColumn, SortSpec};
use leadbook_core::{Contact, ContactDraft, ContactId};
use leadbook_store::query::ContactFilter;

use crate::actions::Action;

const LIST_EMPTY: &str = "Nenhum contato. Pressione 'a' para cadastrar.";
const EXPORT_DEFAULT: &str = "contatos.csv";

#[derive(Debug, Clone)]
pub enum Mode {
    Table,
    ModalAddContact(ContactForm),
    ModalEditContact(ContactForm),
    ModalFilters(FilterForm),
    ModalExport(ExportForm),
    Confirm(ConfirmState),
}

#[derive(Debug, Clone)]
pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub contacts: Vec<Contact>,
    pub selected: usize,
    pub filter: ContactFilter,
    pub sort: SortSpec,
    pub status: Option<String>,
    pub error: Option<String>,
    pub attended_by_choices: Vec<String>,
    pub status_choices: Vec<String>,
    pub empty_hint: &'static str,
    actions: VecDeque<Action>,
    pub(crate) pending_select: Option<ContactId>,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            mode: Mode::Table,
            show_help: false,
            should_quit: false,
            contacts: Vec::new(),
            selected: 0,
            filter: ContactFilter::default(),
            sort: SortSpec::by_id_desc(),
            status: None,
            error: None,
            attended_by_choices: Vec::new(),
            status_choices: Vec::new(),
            empty_hint: LIST_EMPTY,
            actions: VecDeque::new(),
            pending_select: None,
        };
        app.enqueue(Action::LoadList);
        app.enqueue(Action::LoadChoices);
        app
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.contacts.get(self.selected)
    }

    pub fn apply_list(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
        if let Some(target) = self.pending_select.take() {
            if let Some(pos) = self.contacts.iter().position(|c| c.id == target) {
                self.selected = pos;
            }
        }
        if self.selected >= self.contacts.len() {
            self.selected = self.contacts.len().saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) {
            self.should_quit = true;
            return;
        }

        let mut mode = std::mem::replace(&mut self.mode, Mode::Table);
        match &mut mode {
            Mode::Table => {
                if let Some(next) = self.handle_table_key(key) {
                    mode = next;
                }
            }
            Mode::ModalAddContact(form) | Mode::ModalEditContact(form) => {
                if let Some(next) = self.handle_contact_form_key(form, key) {
                    mode = next;
                }
            }
            Mode::ModalFilters(form) => {
                if let Some(next) = self.handle_filter_form_key(form, key) {
                    mode = next;
                }
            }
            Mode::ModalExport(form) => {
                if let Some(next) = self.handle_export_form_key(form, key) {
                    mode = next;
                }
            }
            Mode::Confirm(state) => {
                if let Some(next) = self.handle_confirm_key(state, key) {
                    mode = next;
                }
            }
        }
        self.mode = mode;
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                if !self.contacts.is_empty() {
                    self.selected = self.contacts.len() - 1;
                }
            }
            KeyCode::Char('a') => {
                return Some(Mode::ModalAddContact(ContactForm::blank()));
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(contact) = self.selected_contact() {
                    return Some(Mode::ModalEditContact(ContactForm::from_contact(contact)));
                }
            }
            KeyCode::Char('d') => {
                if let Some(contact) = self.selected_contact() {
                    let message = format!("Excluir {}? (s/n)", contact.name);
                    return Some(Mode::Confirm(ConfirmState {
                        message,
                        action: ConfirmAction::DeleteContact(contact.id),
                    }));
                }
            }
            KeyCode::Char('/') | KeyCode::Char('f') => {
                return Some(Mode::ModalFilters(FilterForm::from_filter(&self.filter)));
            }
            KeyCode::Char('c') => {
                self.filter = ContactFilter::default();
                self.enqueue(Action::LoadList);
                self.set_status("Filtros limpos");
            }
            KeyCode::Char('x') => {
                return Some(Mode::ModalExport(ExportForm::new()));
            }
            KeyCode::Char('r') => {
                self.enqueue(Action::LoadList);
                self.enqueue(Action::LoadChoices);
            }
            KeyCode::Char(ch @ '1'..='8') => self.toggle_sort(sort_column_for_key(ch)),
            _ => {}
        }
        None
    }

    /// Sorting re-orders the rows already on screen; the next reload keeps
    /// the same order because the store applies the active spec too.
    fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = self.sort.toggle(column);
        sort_contacts(&mut self.contacts, self.sort);
        self.selected = 0;
    }

    fn handle_contact_form_key(&mut self, form: &mut ContactForm, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => return Some(Mode::Table),
            KeyCode::Tab => {
                self.blur_contact_field(form);
                form.focus_next();
            }
            KeyCode::BackTab => {
                self.blur_contact_field(form);
                form.focus_prev();
            }
            KeyCode::Up => form.cycle_choice(-1),
            KeyCode::Down => form.cycle_choice(1),
            KeyCode::Enter => {
                if form.is_save_focus() {
                    match form.to_draft() {
                        Ok(draft) => {
                            let action = match form.contact_id {
                                Some(id) => Action::Update(id, draft),
                                None => Action::Save(draft),
                            };
                            self.enqueue(action);
                            return Some(Mode::Table);
                        }
                        Err(err) => self.set_error(err),
                    }
                } else if form.is_cancel_focus() {
                    return Some(Mode::Table);
                } else {
                    self.blur_contact_field(form);
                    form.focus_next();
                }
            }
            _ => {
                if let Some(target) = form.active_field_mut() {
                    apply_text_input(target, key);
                    form.autoformat_active();
                }
            }
        }
        None
    }

    fn blur_contact_field(&mut self, form: &mut ContactForm) {
        if let Some(warning) = form.blur_active() {
            self.set_status(warning);
        }
    }

    fn handle_filter_form_key(&mut self, form: &mut FilterForm, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => return Some(Mode::Table),
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Up => self.cycle_filter_choice(form, -1),
            KeyCode::Down => self.cycle_filter_choice(form, 1),
            KeyCode::Enter => {
                if form.is_apply_focus() {
                    match form.to_filter() {
                        Ok(filter) => {
                            self.filter = filter;
                            self.enqueue(Action::LoadList);
                            return Some(Mode::Table);
                        }
                        Err(err) => self.set_error(err),
                    }
                } else if form.is_clear_focus() {
                    self.filter = ContactFilter::default();
                    self.enqueue(Action::LoadList);
                    self.set_status("Filtros limpos");
                    return Some(Mode::Table);
                } else if form.is_cancel_focus() {
                    return Some(Mode::Table);
                } else {
                    form.focus_next();
                }
            }
            _ => {
                if let Some(target) = form.active_field_mut() {
                    apply_text_input(target, key);
                }
            }
        }
        None
    }

    /// Attended-by and status cycle through the values already on file;
    /// course cycles the fixed catalogue.
    fn cycle_filter_choice(&mut self, form: &mut FilterForm, delta: i32) {
        match form.focus {
            2 => cycle_value(&mut form.attended_by, &self.attended_by_choices, delta),
            3 => cycle_value(&mut form.course, &course_labels(), delta),
            4 => cycle_value(&mut form.status, &self.status_choices, delta),
            _ => {}
        }
    }

    fn handle_export_form_key(&mut self, form: &mut ExportForm, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => return Some(Mode::Table),
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Enter => {
                if form.is_save_focus() || form.focus == 0 {
                    let path = form.path.trim();
                    if path.is_empty() {
                        self.set_error("informe o caminho do arquivo");
                    } else {
                        self.enqueue(Action::Export(PathBuf::from(path)));
                        return Some(Mode::Table);
                    }
                } else if form.is_cancel_focus() {
                    return Some(Mode::Table);
                }
            }
            _ => {
                if form.focus == 0 {
                    apply_text_input(&mut form.path, key);
                }
            }
        }
        None
    }

    fn handle_confirm_key(&mut self, state: &mut ConfirmState, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match state.action {
                    ConfirmAction::DeleteContact(id) => self.enqueue(Action::Delete(id)),
                }
                Some(Mode::Table)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Mode::Table),
            _ => None,
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.contacts.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.contacts.len() as i32;
        let next = (self.selected as i32 + delta).clamp(0, len - 1);
        self.selected = next as usize;
    }
}

fn sort_column_for_key(ch: char) -> SortColumn {
    match ch {
        '1' => SortColumn::Id,
        '2' => SortColumn::Name,
        '3' => SortColumn::Phone,
        '4' => SortColumn::Course,
        '5' => SortColumn::VisitDate,
        '6' => SortColumn::Status,
        '7' => SortColumn::MonthlyFee,
        _ => SortColumn::AttendedBy,
    }
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn course_labels() -> [&'static str; 5] {
    Course::ALL.map(|c| c.as_str())
}

fn cycle_value<S: AsRef<str>>(field: &mut String, options: &[S], delta: i32) {
    if options.is_empty() {
        return;
    }
    let len = options.len() as i32;
    let next = match options.iter().position(|opt| opt.as_ref() == field.as_str()) {
        Some(i) => (i as i32 + delta).rem_euclid(len) as usize,
        None if delta < 0 => options.len() - 1,
        None => 0,
    };
    *field = options[next].as_ref().to_string();
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

/// The registration form. Field order matches the tab order on screen.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub(crate) focus: usize,
    pub contact_id: Option<ContactId>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub course: String,
    pub visit_date: String,
    pub status: String,
    pub monthly_fee: String,
    pub how_found: String,
    pub course_for: String,
    pub attended_by: String,
    pub notes: String,
}

impl ContactForm {
    const FIELD_COUNT: usize = 11;

    const PHONE: usize = 1;
    const VISIT_DATE: usize = 4;
    const MONTHLY_FEE: usize = 6;

    /// A fresh form: today's visit date and the usual defaults filled in.
    pub fn blank() -> Self {
        Self {
            focus: 0,
            contact_id: None,
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            course: String::new(),
            visit_date: VisitDate::today().to_string(),
            status: DEFAULT_STATUS.to_string(),
            monthly_fee: String::new(),
            how_found: DEFAULT_HOW_FOUND.to_string(),
            course_for: DEFAULT_COURSE_FOR.to_string(),
            attended_by: String::new(),
            notes: String::new(),
        }
    }

    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            focus: 0,
            contact_id: Some(contact.id),
            name: contact.name.clone(),
            phone: contact.phone.clone().unwrap_or_default(),
            email: contact.email.clone().unwrap_or_default(),
            course: contact.course.clone().unwrap_or_default(),
            visit_date: contact.visit_date.clone().unwrap_or_default(),
            status: contact.status.clone().unwrap_or_default(),
            monthly_fee: contact.monthly_fee.clone().unwrap_or_default(),
            how_found: contact.how_found.clone().unwrap_or_default(),
            course_for: contact.course_for.clone().unwrap_or_default(),
            attended_by: contact.attended_by.clone().unwrap_or_default(),
            notes: contact.notes.clone().unwrap_or_default(),
        }
    }

    pub fn focus_next(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        self.focus = (self.focus + 1) % total;
    }

    pub fn focus_prev(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        if self.focus == 0 {
            self.focus = total - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn is_save_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT
    }

    pub fn is_cancel_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT + 1
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.name),
            1 => Some(&mut self.phone),
            2 => Some(&mut self.email),
            3 => Some(&mut self.course),
            4 => Some(&mut self.visit_date),
            5 => Some(&mut self.status),
            6 => Some(&mut self.monthly_fee),
            7 => Some(&mut self.how_found),
            8 => Some(&mut self.course_for),
            9 => Some(&mut self.attended_by),
            10 => Some(&mut self.notes),
            _ => None,
        }
    }

    /// Course, status, how-found and course-for are pick-lists: the arrow
    /// keys step through the catalogue. The field still accepts free text,
    /// so values outside the list survive editing untouched.
    pub fn cycle_choice(&mut self, delta: i32) {
        match self.focus {
            3 => cycle_value(&mut self.course, &course_labels(), delta),
            5 => cycle_value(&mut self.status, &STATUS_CHOICES, delta),
            7 => cycle_value(&mut self.how_found, &HOW_FOUND_CHOICES, delta),
            8 => cycle_value(&mut self.course_for, &COURSE_FOR_CHOICES, delta),
            _ => {}
        }
    }

    /// Live reformatting while the user types. Dates snap into shape at the
    /// eighth digit; phones at the eleventh. Fees wait for focus loss.
    pub fn autoformat_active(&mut self) {
        match self.focus {
            Self::VISIT_DATE => {
                if let Some(formatted) = date::autoformat_typing(&self.visit_date) {
                    self.visit_date = formatted;
                }
            }
            Self::PHONE => {
                if let Some(formatted) = phone::autoformat_typing(&self.phone) {
                    self.phone = formatted;
                }
            }
            _ => {}
        }
    }

    /// Normalizes the field being left. Returns a warning to surface when
    /// the value was unusable and got cleared; the save itself stays
    /// unblocked.
    pub fn blur_active(&mut self) -> Option<String> {
        match self.focus {
            Self::VISIT_DATE => {
                if let Some(parsed) = VisitDate::parse(&self.visit_date) {
                    self.visit_date = parsed.to_string();
                }
                None
            }
            Self::PHONE => {
                if let Some(formatted) = normalize_phone(&self.phone) {
                    self.phone = formatted;
                }
                None
            }
            Self::MONTHLY_FEE => match normalize_currency(&self.monthly_fee) {
                Ok(Some(money)) => {
                    self.monthly_fee = money.display().to_string();
                    None
                }
                Ok(None) => {
                    self.monthly_fee.clear();
                    None
                }
                Err(_) => {
                    let warning = format!("Valor '{}' inválido, campo limpo", self.monthly_fee.trim());
                    self.monthly_fee.clear();
                    Some(warning)
                }
            },
            _ => None,
        }
    }

    pub fn to_draft(&self) -> Result<ContactDraft, String> {
        let draft = ContactDraft {
            name: self.name.trim().to_string(),
            phone: optional(&self.phone),
            email: optional(&self.email),
            course: optional(&self.course),
            visit_date: optional(&self.visit_date),
            status: optional(&self.status),
            monthly_fee: optional(&self.monthly_fee),
            how_found: optional(&self.how_found),
            course_for: optional(&self.course_for),
            attended_by: optional(&self.attended_by),
            notes: optional(&self.notes),
        };
        draft.validate().map_err(|err| err.to_string())?;
        Ok(draft)
    }
}

/// The filter panel. Blank fields mean "no criterion".
#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub(crate) focus: usize,
    pub name: String,
    pub phone: String,
    pub attended_by: String,
    pub course: String,
    pub status: String,
    pub visit_from: String,
    pub visit_to: String,
}

impl FilterForm {
    const FIELD_COUNT: usize = 7;

    pub fn from_filter(filter: &ContactFilter) -> Self {
        Self {
            focus: 0,
            name: filter.name.clone().unwrap_or_default(),
            phone: filter.phone.clone().unwrap_or_default(),
            attended_by: filter.attended_by.clone().unwrap_or_default(),
            course: filter.course.clone().unwrap_or_default(),
            status: filter.status.clone().unwrap_or_default(),
            visit_from: filter.visit_from.map(|d| d.to_string()).unwrap_or_default(),
            visit_to: filter.visit_to.map(|d| d.to_string()).unwrap_or_default(),
        }
    }

    pub fn focus_next(&mut self) {
        let total = Self::FIELD_COUNT + 3;
        self.focus = (self.focus + 1) % total;
    }

    pub fn focus_prev(&mut self) {
        let total = Self::FIELD_COUNT + 3;
        if self.focus == 0 {
            self.focus = total - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn is_apply_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT
    }

    pub fn is_clear_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT + 1
    }

    pub fn is_cancel_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT + 2
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.name),
            1 => Some(&mut self.phone),
            2 => Some(&mut self.attended_by),
            3 => Some(&mut self.course),
            4 => Some(&mut self.status),
            5 => Some(&mut self.visit_from),
            6 => Some(&mut self.visit_to),
            _ => None,
        }
    }

    pub fn to_filter(&self) -> Result<ContactFilter, String> {
        let visit_from = parse_filter_date(&self.visit_from, "de")?;
        let visit_to = parse_filter_date(&self.visit_to, "até")?;
        Ok(ContactFilter {
            name: optional(&self.name),
            phone: optional(&self.phone),
            attended_by: optional(&self.attended_by),
            course: optional(&self.course),
            status: optional(&self.status),
            visit_from,
            visit_to,
        })
    }
}

fn parse_filter_date(raw: &str, label: &str) -> Result<Option<VisitDate>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    VisitDate::parse(trimmed)
        .map(Some)
        .ok_or_else(|| format!("data '{label}' inválida: {trimmed} (use DD/MM/AAAA)"))
}

#[derive(Debug, Clone)]
pub struct ExportForm {
    pub(crate) focus: usize,
    pub path: String,
}

impl ExportForm {
    pub fn new() -> Self {
        Self {
            focus: 0,
            path: EXPORT_DEFAULT.to_string(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % 3;
    }

    pub fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 { 2 } else { self.focus - 1 };
    }

    pub fn is_save_focus(&self) -> bool {
        self.focus == 1
    }

    pub fn is_cancel_focus(&self) -> bool {
        self.focus == 2
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

#[derive(Debug, Clone, Copy)]
pub enum ConfirmAction {
    DeleteContact(ContactId),
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
