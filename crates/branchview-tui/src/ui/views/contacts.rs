use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use branchview_core::utils::{format_phone, truncate_string};
use branchview_core::{ContactEntry, ContactSortKey};

use crate::app::App;
use crate::ui::styles;

/// Render the Contacts view - sortable grid with a detail card
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let contacts = app.visible_contacts();
    let selection = app.contact_list.selection.min(contacts.len().saturating_sub(1));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_contact_table(frame, app, &contacts, selection, chunks[0]);
    render_contact_detail(frame, contacts.get(selection), chunks[1]);
}

fn render_contact_table(
    frame: &mut Frame,
    app: &App,
    contacts: &[ContactEntry<'_>],
    selection: usize,
    area: Rect,
) {
    let sort_indicator = |key: ContactSortKey| {
        if app.contact_list.sort_key == key {
            " ▲"
        } else {
            ""
        }
    };

    let header = Row::new([
        Cell::from(format!("Navn{}", sort_indicator(ContactSortKey::Name))),
        Cell::from(format!("Rolle{}", sort_indicator(ContactSortKey::Role))),
        Cell::from(format!("Avdeling{}", sort_indicator(ContactSortKey::Branch))),
        Cell::from("E-post"),
        Cell::from("Telefon"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = contacts
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            Row::new(vec![
                Cell::from(entry.full_name.clone()),
                Cell::from(entry.role().to_string()),
                Cell::from(entry.branch_name.to_string()),
                Cell::from(entry.contact.email().unwrap_or("-").to_string()),
                Cell::from(entry.contact.phone().map(format_phone).unwrap_or_else(|| "-".to_string())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(24),
        Constraint::Length(12),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(14),
    ];

    let sort_help = "[n]avn [r]olle [a]vdeling";
    let title = format!(" Kontakter ({}) - {} ", contacts.len(), sort_help);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !contacts.is_empty() {
        state.select(Some(selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_contact_detail(frame: &mut Frame, selected: Option<&ContactEntry<'_>>, area: Rect) {
    let placeholder = "-";
    let width = area.width.saturating_sub(14) as usize;

    let lines = match selected {
        Some(entry) => {
            let contact = entry.contact;
            let mut lines = vec![
                Line::from(Span::styled(entry.full_name.clone(), styles::title_style())),
                Line::from(Span::styled(entry.role().to_string(), styles::highlight_style())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Avdeling:  ", styles::muted_style()),
                    Span::raw(truncate_string(entry.branch_name, width)),
                ]),
                Line::from(vec![
                    Span::styled("Type:      ", styles::muted_style()),
                    Span::raw(entry.branch_type.label()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("E-post:    ", styles::muted_style()),
                    Span::raw(contact.email().unwrap_or(placeholder).to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Telefon:   ", styles::muted_style()),
                    Span::raw(
                        contact
                            .phone()
                            .map(format_phone)
                            .unwrap_or_else(|| placeholder.to_string()),
                    ),
                ]),
            ];

            if let Some(title) = contact.job_title.as_deref().filter(|t| !t.is_empty()) {
                lines.push(Line::from(vec![
                    Span::styled("Stilling:  ", styles::muted_style()),
                    Span::raw(title.to_string()),
                ]));
            }
            let membership = match (contact.is_member, contact.is_volunteer) {
                (true, true) => Some("Medlem, frivillig"),
                (true, false) => Some("Medlem"),
                (false, true) => Some("Frivillig"),
                (false, false) => None,
            };
            if let Some(membership) = membership {
                lines.push(Line::from(Span::styled(membership, styles::success_style())));
            }
            if let Some(number) = contact.member_number.as_deref() {
                lines.push(Line::from(vec![
                    Span::styled("Medlemsnr: ", styles::muted_style()),
                    Span::raw(number.to_string()),
                ]));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "Ingen kontakter samsvarer med søket",
            styles::muted_style(),
        ))],
    };

    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Detaljer ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(detail, area);
}
