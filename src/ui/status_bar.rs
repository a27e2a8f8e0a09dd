use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{HELP, MUTED, PINK};
use crate::app::App;

/// Help line, or the last status message in its place until the next key.
pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some(msg) => Line::from(Span::styled(
            msg.as_str(),
            Style::default().fg(PINK).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(HELP, Style::default().fg(MUTED))),
    };

    f.render_widget(Paragraph::new(line), area);
}
