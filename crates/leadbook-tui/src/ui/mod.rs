use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use leadbook_core::domain::choices::{COURSE_FOR_CHOICES, HOW_FOUND_CHOICES, STATUS_CHOICES};
use leadbook_core::domain::Course;
use leadbook_core::sort::{SortColumn, SortSpec};

use crate::app::{App, ConfirmState, ContactForm, ExportForm, FilterForm, Mode};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(size);

    render_header(frame, chunks[0], app);
    render_table(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }

    match &app.mode {
        Mode::ModalAddContact(form) => render_contact_form(frame, size, "Cadastrar contato", form),
        Mode::ModalEditContact(form) => render_contact_form(frame, size, "Editar contato", form),
        Mode::ModalFilters(form) => render_filter_form(frame, size, form, app),
        Mode::ModalExport(form) => render_export_form(frame, size, form),
        Mode::Confirm(state) => render_confirm(frame, size, state),
        Mode::Table => {}
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let filter_display = if app.filter.is_empty() {
        "(nenhum)".to_string()
    } else {
        describe_filter(app)
    };
    let title = format!(
        "leadbook  contatos: {}  filtro: {}  ordem: {}",
        app.contacts.len(),
        filter_display,
        describe_sort(app.sort)
    );

    let block = Block::default().borders(Borders::ALL).title("leadbook");
    let paragraph = Paragraph::new(Line::from(title)).block(block);
    frame.render_widget(paragraph, area);
}

fn describe_filter(app: &App) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &app.filter.name {
        parts.push(format!("nome~{name}"));
    }
    if let Some(phone) = &app.filter.phone {
        parts.push(format!("tel~{phone}"));
    }
    if let Some(attended_by) = &app.filter.attended_by {
        parts.push(format!("atendente:{attended_by}"));
    }
    if let Some(course) = &app.filter.course {
        parts.push(format!("curso:{course}"));
    }
    if let Some(status) = &app.filter.status {
        parts.push(format!("status:{status}"));
    }
    match (app.filter.visit_from, app.filter.visit_to) {
        (Some(from), Some(to)) => parts.push(format!("visita:{from}..{to}")),
        (Some(from), None) => parts.push(format!("visita:{from}..")),
        (None, Some(to)) => parts.push(format!("visita:..{to}")),
        (None, None) => {}
    }
    parts.join(" ")
}

fn describe_sort(sort: SortSpec) -> String {
    let column = match sort.column {
        SortColumn::Id => "id",
        SortColumn::Name => "nome",
        SortColumn::Phone => "telefone",
        SortColumn::Email => "email",
        SortColumn::Course => "curso",
        SortColumn::VisitDate => "visita",
        SortColumn::Status => "status",
        SortColumn::MonthlyFee => "valor",
        SortColumn::HowFound => "como conheceu",
        SortColumn::CourseFor => "para quem é",
        SortColumn::AttendedBy => "atendido por",
        SortColumn::Notes => "observações",
    };
    let arrow = if sort.ascending { "↑" } else { "↓" };
    format!("{column}{arrow}")
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::Table => {
            "j/k mover  a cadastrar  enter/e editar  d excluir  / filtros  c limpar  x exportar  1-8 ordenar  r recarregar  ? ajuda"
        }
        Mode::ModalFilters(_) => "tab próximo  shift+tab anterior  enter aplicar  esc cancelar",
        Mode::Confirm(_) => "s confirmar  n cancelar",
        _ => "tab próximo  shift+tab anterior  ↑/↓ alternar opções  enter selecionar  esc cancelar",
    };

    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, app: &App) {
    if app.contacts.is_empty() {
        let paragraph = Paragraph::new(app.empty_hint)
            .block(Block::default().borders(Borders::ALL).title("Contatos"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(
        [
            "ID",
            "Nome",
            "Telefone",
            "Curso",
            "Data da visita",
            "Status",
            "Valor",
            "Atendido por",
        ]
        .map(|label| Cell::from(Span::styled(label, Style::default().add_modifier(Modifier::BOLD)))),
    );

    let rows: Vec<Row> = app
        .contacts
        .iter()
        .map(|contact| {
            Row::new([
                Cell::from(contact.id.to_string()),
                Cell::from(contact.name.clone()),
                Cell::from(contact.phone.clone().unwrap_or_default()),
                Cell::from(contact.course.clone().unwrap_or_default()),
                Cell::from(contact.visit_date.clone().unwrap_or_default()),
                Cell::from(contact.status.clone().unwrap_or_default()),
                Cell::from(contact.monthly_fee.clone().unwrap_or_default()),
                Cell::from(contact.attended_by.clone().unwrap_or_default()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let mut state = TableState::default();
    state.select(Some(app.selected));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Contatos"))
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ");

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_contact_form(frame: &mut Frame<'_>, area: Rect, title: &str, form: &ContactForm) {
    let modal = centered_rect(70, 80, area);
    frame.render_widget(Clear, modal);

    let block = Block::default().borders(Borders::ALL).title(title);
    let courses = Course::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let mut lines = vec![
        field_line("Nome", &form.name, form.focus == 0),
        field_line("Telefone", &form.phone, form.focus == 1),
        field_line("Email", &form.email, form.focus == 2),
        field_line("Curso/Interesse", &form.course, form.focus == 3),
        field_line("Data da visita (DD/MM/AAAA)", &form.visit_date, form.focus == 4),
        field_line("Status", &form.status, form.focus == 5),
        field_line("Valor mensalidade", &form.monthly_fee, form.focus == 6),
        field_line("Como conheceu", &form.how_found, form.focus == 7),
        field_line("Para quem é", &form.course_for, form.focus == 8),
        field_line("Atendido por", &form.attended_by, form.focus == 9),
        field_line("Observações", &form.notes, form.focus == 10),
        Line::from(Span::styled(
            format!("Cursos: {courses}"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("Status: {}", STATUS_CHOICES.join(", ")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("Como conheceu: {}", HOW_FOUND_CHOICES.join(", ")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("Para quem é: {}", COURSE_FOR_CHOICES.join(", ")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    lines.push(save_cancel_line(form.is_save_focus(), form.is_cancel_focus()));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal);
}

fn render_filter_form(frame: &mut Frame<'_>, area: Rect, form: &FilterForm, app: &App) {
    let modal = centered_rect(70, 70, area);
    frame.render_widget(Clear, modal);

    let block = Block::default().borders(Borders::ALL).title("Filtros");
    let mut lines = vec![
        field_line("Nome", &form.name, form.focus == 0),
        field_line("Telefone", &form.phone, form.focus == 1),
        field_line("Atendido por", &form.attended_by, form.focus == 2),
        field_line("Curso/Interesse", &form.course, form.focus == 3),
        field_line("Status", &form.status, form.focus == 4),
        field_line("Visita de (DD/MM/AAAA)", &form.visit_from, form.focus == 5),
        field_line("Visita até (DD/MM/AAAA)", &form.visit_to, form.focus == 6),
    ];

    if !app.attended_by_choices.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Atendentes já usados: {}", app.attended_by_choices.join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !app.status_choices.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Status já usados: {}", app.status_choices.join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    let apply_style = if form.is_apply_focus() {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    let clear_style = if form.is_clear_focus() {
        Style::default().fg(Color::Black).bg(Color::LightYellow)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let cancel_style = if form.is_cancel_focus() {
        Style::default().fg(Color::Black).bg(Color::LightRed)
    } else {
        Style::default().fg(Color::Red)
    };

    lines.push(Line::from(vec![
        Span::styled("[Aplicar]", apply_style),
        Span::raw("  "),
        Span::styled("[Limpar]", clear_style),
        Span::raw("  "),
        Span::styled("[Cancelar]", cancel_style),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal);
}

fn render_export_form(frame: &mut Frame<'_>, area: Rect, form: &ExportForm) {
    let modal = centered_rect(60, 30, area);
    frame.render_widget(Clear, modal);

    let block = Block::default().borders(Borders::ALL).title("Exportar CSV");
    let mut lines = vec![
        field_line("Arquivo", &form.path, form.focus == 0),
        Line::from(Span::styled(
            "Exporta o filtro atual, sempre do mais recente para o mais antigo.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    lines.push(save_cancel_line(form.is_save_focus(), form.is_cancel_focus()));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, state: &ConfirmState) {
    let modal = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal);
    let paragraph = Paragraph::new(state.message.clone())
        .block(Block::default().borders(Borders::ALL).title("Confirmação"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, modal);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 70, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Geral: q sair, Ctrl+C sair, ? ajuda"),
        Line::from("Tabela: j/k mover, a cadastrar, enter/e editar, d excluir, / filtros, c limpar filtros, x exportar, r recarregar"),
        Line::from("Ordem: 1 id, 2 nome, 3 telefone, 4 curso, 5 visita, 6 status, 7 valor, 8 atendido por (repita para inverter)"),
        Line::from("Formulários: tab/shift+tab mover, enter selecionar, esc cancelar, Ctrl+U limpar campo, Ctrl+W apagar palavra"),
        Line::from(""),
        Line::from("Datas em DD/MM/AAAA; basta digitar os 8 dígitos. Telefones se formatam a partir dos dígitos. Valores aceitam '150' (centavos) ou '1.234,56'."),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Ajuda"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn save_cancel_line(save_focused: bool, cancel_focused: bool) -> Line<'static> {
    let save_style = if save_focused {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    let cancel_style = if cancel_focused {
        Style::default().fg(Color::Black).bg(Color::LightRed)
    } else {
        Style::default().fg(Color::Red)
    };
    Line::from(vec![
        Span::styled("[Salvar]", save_style),
        Span::raw("  "),
        Span::styled("[Cancelar]", cancel_style),
    ])
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
