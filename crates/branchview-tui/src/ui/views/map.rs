use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// Placeholder until a map renderer exists
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let branches = app.visible_branches();
    let count = branches.len();
    let placed = branches.iter().filter(|b| b.geometry.is_some()).count();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Kartvisning kommer snart...", styles::heading_style())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} avdelinger samsvarer med filteret", count),
            styles::muted_style(),
        )),
        Line::from(Span::styled(
            format!("{} av dem har koordinater", placed),
            styles::muted_style(),
        )),
    ];

    let placeholder = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Kart ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(placeholder, area);
}
