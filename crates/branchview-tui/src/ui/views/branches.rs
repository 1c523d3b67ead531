use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use branchview_core::utils::format_phone;
use branchview_core::Branch;

use crate::app::App;
use crate::ui::styles;

/// Render the branch list as a column of expandable cards
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let branches = app.visible_branches();
    let selection = app.branch_list.selection.min(branches.len().saturating_sub(1));

    let title = format!(
        " Avdelinger ({} av {}) - [Enter] vis mer/mindre ",
        branches.len(),
        app.branches().len()
    );
    let block = Block::default()
        .title(title)
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    if branches.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Ingen avdelinger samsvarer med søket",
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = branches
        .iter()
        .enumerate()
        .map(|(i, branch)| {
            let expanded = app.branch_list.is_expanded(&branch.branch_id);
            let mut lines = card_lines(branch, expanded);
            lines.push(Line::from(""));

            let style = if i == selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Text::from(lines)).style(style)
        })
        .collect();

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(selection));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Lines making up one card. Collapsed cards show name, type and address.
pub fn card_lines(branch: &Branch, expanded: bool) -> Vec<Line<'static>> {
    let mut lines = vec![];

    let mut header = vec![
        Span::styled(branch.branch_name.clone(), styles::title_style()),
        Span::raw("  "),
        Span::styled(branch.branch_type.label(), styles::muted_style()),
    ];
    if !branch.is_active() {
        header.push(Span::raw("  "));
        header.push(Span::styled(branch.branch_status.label(), styles::error_style()));
    }
    lines.push(Line::from(header));

    if let Some(address) = branch.address_line() {
        let postal_line = branch.postal().and_then(|p| p.postal_line());
        let text = match postal_line {
            Some(postal_line) => format!("  ⌂ {}, {}", address, postal_line),
            None => format!("  ⌂ {}", address),
        };
        lines.push(Line::from(Span::styled(text, styles::muted_style())));
    }

    if !expanded {
        lines.push(Line::from(Span::styled("  ▼ Vis mer", styles::highlight_style())));
        return lines;
    }
    lines.push(Line::from(Span::styled("  ▲ Vis mindre", styles::highlight_style())));

    if let Some(parent) = branch.parent_name() {
        lines.push(Line::from(vec![
            Span::styled("  Tilhører:  ", styles::muted_style()),
            Span::raw(parent.to_string()),
        ]));
    }
    if let Some(description) = branch
        .organization_details
        .as_ref()
        .and_then(|d| d.description.as_deref())
        .filter(|d| !d.trim().is_empty())
    {
        lines.push(Line::from(Span::styled(
            format!("  {}", description),
            styles::list_item_style(),
        )));
    }
    if let Some(level) = branch
        .organization_details
        .as_ref()
        .and_then(|d| d.organization_level.as_deref())
        .filter(|l| !l.trim().is_empty())
    {
        lines.push(Line::from(vec![
            Span::styled("  Nivå:      ", styles::muted_style()),
            Span::raw(level.to_string()),
        ]));
    }
    if let Some(created) = branch.branch_status.created_display() {
        lines.push(Line::from(vec![
            Span::styled("  Opprettet: ", styles::muted_style()),
            Span::raw(created),
        ]));
    }
    if let Some(terminated) = branch.branch_status.terminated_display() {
        lines.push(Line::from(vec![
            Span::styled("  Avsluttet: ", styles::muted_style()),
            Span::raw(terminated),
        ]));
    }

    let channels = &branch.communication_channels;
    let present = |v: &Option<String>| {
        v.as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
    };
    if let Some(email) = present(&channels.email) {
        lines.push(Line::from(vec![
            Span::styled("  E-post:    ", styles::muted_style()),
            Span::raw(email),
        ]));
    }
    if let Some(phone) = present(&channels.phone) {
        lines.push(Line::from(vec![
            Span::styled("  Telefon:   ", styles::muted_style()),
            Span::raw(format_phone(&phone)),
        ]));
    }
    if let Some(web) = present(&channels.web) {
        lines.push(Line::from(vec![
            Span::styled("  Nettside:  ", styles::muted_style()),
            Span::styled(web, styles::highlight_style()),
        ]));
    }

    if !branch.branch_contacts.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Kontakter", styles::heading_style())));
        for contact in &branch.branch_contacts {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(contact.role.clone(), styles::highlight_style()),
                Span::raw(": "),
                Span::raw(contact.full_name()),
            ]));
            if let Some(email) = contact.email() {
                lines.push(Line::from(Span::styled(
                    format!("      ✉ {}", email),
                    styles::list_item_style(),
                )));
            }
            if let Some(phone) = contact.phone() {
                lines.push(Line::from(Span::styled(
                    format!("      ☎ {}", format_phone(phone)),
                    styles::muted_style(),
                )));
            }
        }
    }

    if !branch.branch_activities.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Aktiviteter", styles::heading_style())));
        for activity in &branch.branch_activities {
            lines.push(Line::from(vec![
                Span::styled("    ✓ ", styles::success_style()),
                Span::raw(activity.clone()),
            ]));
        }
    }

    lines
}
