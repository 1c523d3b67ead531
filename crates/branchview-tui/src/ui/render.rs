use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use branchview_core::LoadState;

use crate::app::{App, AppState, ViewMode};

use super::styles;
use super::views::{branches, contacts, map};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // View tabs
            Constraint::Length(3), // Search and filters
            Constraint::Min(8),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_filter_bar(frame, app, chunks[2]);
    render_main_content(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Avdelingsoversikt";
    let help_hint = "[?] Hjelp";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.chars().count() + help_hint.chars().count() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        ("[1] Avdelinger", ViewMode::List),
        ("[2] Kontakter", ViewMode::Contacts),
        ("[3] Kart", ViewMode::Map),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, mode)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(*label, styles::tab_style(app.view_mode == *mode)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

/// Search field on the left, the filter selectors of the current view on the right
fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let searching = matches!(app.state, AppState::Searching);

    let mut spans = vec![Span::styled(" / ", styles::muted_style())];
    if app.search_query.is_empty() && !searching {
        spans.push(Span::styled(app.view_mode.search_placeholder(), styles::muted_style()));
    } else {
        spans.push(Span::styled(app.search_query.clone(), styles::search_style()));
        if searching {
            spans.push(Span::styled("█", styles::search_style()));
        }
    }

    let selectors: Vec<(&str, String)> = if app.view_mode.uses_role_filter() {
        vec![("[f] Rolle: ", app.role_filter.label().to_string())]
    } else {
        vec![
            ("[t] Type: ", app.type_filter.label().to_string()),
            ("[s] Status: ", app.status_filter.label().to_string()),
        ]
    };

    let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let right_width: usize = selectors
        .iter()
        .map(|(k, v)| k.chars().count() + v.chars().count() + 2)
        .sum();
    let padding = (area.width as usize).saturating_sub(left_width + right_width + 1);
    spans.push(Span::raw(" ".repeat(padding)));

    for (key, value) in selectors {
        spans.push(Span::styled(key, styles::help_key_style()));
        spans.push(Span::styled(value, styles::help_desc_style()));
        spans.push(Span::raw("  "));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::border_style(searching));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match &app.load {
        LoadState::Pending => render_message(frame, area, "Laster...", styles::muted_style()),
        LoadState::Failed(message) => render_message(
            frame,
            area,
            &format!("Feil: {}", message),
            styles::error_style(),
        ),
        LoadState::Ready(_) => match app.view_mode {
            ViewMode::List => branches::render(frame, app, area),
            ViewMode::Contacts => contacts::render(frame, app, area),
            ViewMode::Map => map::render(frame, app, area),
        },
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let lines = vec![Line::from(""), Line::from(Span::styled(message.to_string(), style))];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        );
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[/] søk | [q] avslutt";

    let left_text = if let Some(response) = app.load.response() {
        let updated = response
            .timestamp()
            .map(|ts| ts.with_timezone(&chrono::Local).format("%d.%m.%Y %H:%M").to_string())
            .unwrap_or_else(|| "ukjent".to_string());
        format!(
            " {} avdelinger, {} kontakter | Data fra {} ",
            response.total_count(),
            response.contact_count(),
            updated
        )
    } else {
        format!(" {} ", app.source.describe())
    };

    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 25, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Avdelingsoversikt", styles::title_style())),
        Line::from(Span::styled(
            format!("  versjon {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigering", styles::highlight_style())),
        help_line("  1-3       ", "Bytt visning"),
        help_line("  ←/→       ", "Forrige/neste visning"),
        help_line("  ↑/↓       ", "Flytt i listen"),
        help_line("  PgUp/PgDn ", "Bla en side"),
        help_line("  Home/End  ", "Første/siste"),
        Line::from(""),
        Line::from(Span::styled(" Søk og filter", styles::highlight_style())),
        help_line("  /         ", "Søk (Enter beholder, Esc tømmer)"),
        help_line("  t / s     ", "Bytt type / status"),
        help_line("  f         ", "Bytt rolle (kontakter)"),
        Line::from(""),
        Line::from(Span::styled(" Avdelinger", styles::highlight_style())),
        help_line("  Enter     ", "Vis mer / vis mindre"),
        Line::from(Span::styled(" Kontakter", styles::highlight_style())),
        help_line("  n/r/a     ", "Sorter på navn/rolle/avdeling"),
        Line::from(""),
        help_line("  q         ", "Avslutt"),
        Line::from(vec![
            Span::styled("       Trykk ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" eller ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" for å lukke", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(40, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Vil du avslutte?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Trykk ", styles::muted_style()),
            Span::styled("[J]", styles::help_key_style()),
            Span::styled(" for ja, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" for nei", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}
