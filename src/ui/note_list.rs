use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{BLACK, LIGHT_GRAY, MUTED, PINK};
use crate::app::{App, FilterState};

const LIST_TITLE: &str = "All notes 📝";

pub fn render_note_list(f: &mut Frame, app: &mut App, area: Rect) {
    let (max_width, max_height) = app.picker.size();
    let area = Rect {
        width: if max_width > 0 { area.width.min(max_width) } else { area.width },
        height: if max_height > 0 { area.height.min(max_height) } else { area.height },
        ..area
    };
    if area.height < 2 {
        return;
    }

    let title_area = Rect { height: 1, ..area };
    let header = match app.picker.filter_state() {
        FilterState::Unfiltered => Line::from(Span::styled(
            format!(" {} ", LIST_TITLE),
            Style::default().fg(BLACK).bg(LIGHT_GRAY),
        )),
        FilterState::Filtering | FilterState::FilterApplied => Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(PINK)),
            Span::raw(app.picker.filter().to_string()),
        ]),
    };
    f.render_widget(Paragraph::new(header), title_area);

    let body = Rect {
        y: area.y + 2,
        height: area.height.saturating_sub(2),
        ..area
    };

    if app.picker.visible_len() == 0 {
        f.render_widget(Paragraph::new(Span::styled("No items.", Style::default().fg(MUTED))), body);
        return;
    }

    let items: Vec<ListItem> = app
        .picker
        .visible_items()
        .map(|note| {
            ListItem::new(vec![
                Line::from(note.title.clone()),
                Line::from(Span::styled(note.description(), Style::default().fg(MUTED))),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().fg(PINK).add_modifier(Modifier::BOLD))
        .highlight_symbol("│ ");

    f.render_stateful_widget(list, body, &mut app.picker.list_state);
}
