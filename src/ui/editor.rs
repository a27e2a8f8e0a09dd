use std::path::Path;

use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{MUTED, PINK};
use crate::app::App;

const PROMPT: &str = "> ";
const NAME_INPUT_WIDTH: u16 = 50;

pub fn render_editor(f: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.session() else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", display_path(session.path())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED));
    let inner = block.inner(area);

    f.render_widget(block, area);
    f.render_widget(session.editor(), inner);
}

pub fn render_name_prompt(f: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }

    let prompt_width = PROMPT.len() as u16;
    let prompt_area = Rect { width: prompt_width.min(area.width), height: 1, ..area };
    f.render_widget(
        Paragraph::new(Span::styled(PROMPT, Style::default().fg(PINK))),
        prompt_area,
    );

    let input_area = Rect {
        x: area.x + prompt_area.width,
        y: area.y,
        width: area.width.saturating_sub(prompt_area.width).min(NAME_INPUT_WIDTH),
        height: 1,
    };
    f.render_widget(&app.name_input, input_area);
}

/// Path with the home directory folded to `~`.
fn display_path(path: &Path) -> String {
    let path_str = path.to_string_lossy().to_string();
    if let Some(home) = dirs::home_dir() {
        let home_str = home.to_string_lossy().to_string();
        if path_str.starts_with(&home_str) {
            return path_str.replacen(&home_str, "~", 1);
        }
    }
    path_str
}
