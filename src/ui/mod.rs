mod editor;
mod note_list;
mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

pub use editor::{render_editor, render_name_prompt};
pub use note_list::render_note_list;
pub use status_bar::render_status_bar;

pub const BANNER: &str = "Welcome to totion 🧠";
pub const HELP: &str = "Ctrl+N: new file . Ctrl+L: list . Esc: back . Ctrl+S: save . Ctrl+C/q: quit";

const BLACK: Color = Color::Indexed(16);
const PINK: Color = Color::Indexed(205);
const LIGHT_GRAY: Color = Color::Indexed(254);
const MUTED: Color = Color::Indexed(245);

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let banner = Span::styled(
        format!("  {}  ", BANNER),
        Style::default().fg(BLACK).bg(PINK).add_modifier(Modifier::BOLD),
    );
    f.render_widget(Paragraph::new(banner), chunks[1]);

    let view_area = chunks[3];
    match app.mode {
        Mode::Idle => {}
        Mode::CreatingFile => render_name_prompt(f, app, view_area),
        Mode::Browsing => render_note_list(f, app, view_area),
        Mode::Editing(_) => render_editor(f, app, view_area),
    }

    render_status_bar(f, app, chunks[5]);
}
