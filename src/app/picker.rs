use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::vault::NoteSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Unfiltered,
    /// The user is typing a filter query.
    Filtering,
    /// A query was accepted and still narrows the list.
    FilterApplied,
}

/// The note list overlay: listed notes, an optional title filter and the selection.
#[derive(Debug, Default)]
pub struct NotePicker {
    items: Vec<NoteSummary>,
    visible: Vec<usize>,
    filter: String,
    filter_state: FilterState,
    pub list_state: ListState,
    width: u16,
    height: u16,
}

impl NotePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the listed notes, keeping any filter that is in effect.
    pub fn set_items(&mut self, items: Vec<NoteSummary>) {
        self.items = items;
        self.refilter();
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &NoteSummary> {
        self.visible.iter().filter_map(|&i| self.items.get(i))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn selected_item(&self) -> Option<&NoteSummary> {
        let pos = self.list_state.selected()?;
        self.visible.get(pos).and_then(|&i| self.items.get(i))
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        if self.is_filtering() {
            self.handle_filter_key(key);
            return;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::Char('/') => {
                self.filter_state = FilterState::Filtering;
            }
            KeyCode::Esc if self.filter_state == FilterState::FilterApplied => self.clear_filter(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter | KeyCode::Tab => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::FilterApplied
                };
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.refilter();
            }
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.refilter();
            }
            _ => {}
        }
    }

    fn clear_filter(&mut self) {
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.refilter();
    }

    fn refilter(&mut self) {
        let query = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, note)| query.is_empty() || note.title.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();

        let selected = self.list_state.selected().unwrap_or(0);
        if self.visible.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(selected.min(self.visible.len() - 1)));
        }
    }

    fn select_next(&mut self) {
        if let Some(pos) = self.list_state.selected() {
            if pos + 1 < self.visible.len() {
                self.list_state.select(Some(pos + 1));
            }
        }
    }

    fn select_previous(&mut self) {
        if let Some(pos) = self.list_state.selected() {
            self.list_state.select(Some(pos.saturating_sub(1)));
        }
    }

    fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.list_state.select(Some(self.visible.len() - 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str) -> NoteSummary {
        NoteSummary { title: title.to_string(), modified: None }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(picker: &mut NotePicker, s: &str) {
        for c in s.chars() {
            picker.handle_key(&key(KeyCode::Char(c)));
        }
    }

    fn picker_with(titles: &[&str]) -> NotePicker {
        let mut picker = NotePicker::new();
        picker.set_items(titles.iter().map(|t| note(t)).collect());
        picker
    }

    #[test]
    fn test_empty_picker_has_no_selection() {
        let picker = picker_with(&[]);
        assert!(picker.selected_item().is_none());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut picker = picker_with(&["a.md", "b.md", "c.md"]);
        assert_eq!(picker.selected_item().unwrap().title, "a.md");

        picker.handle_key(&key(KeyCode::Up));
        assert_eq!(picker.selected_item().unwrap().title, "a.md");

        picker.handle_key(&key(KeyCode::Down));
        picker.handle_key(&key(KeyCode::Char('j')));
        picker.handle_key(&key(KeyCode::Down));
        assert_eq!(picker.selected_item().unwrap().title, "c.md");

        picker.handle_key(&key(KeyCode::Home));
        assert_eq!(picker.selected_item().unwrap().title, "a.md");
    }

    #[test]
    fn test_filter_narrows_and_esc_clears() {
        let mut picker = picker_with(&["Groceries.md", "journal.md", "grades.txt"]);

        picker.handle_key(&key(KeyCode::Char('/')));
        assert!(picker.is_filtering());

        type_str(&mut picker, "gr");
        let titles: Vec<&str> = picker.visible_items().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Groceries.md", "grades.txt"]);

        // 'j' is text while filtering, not navigation
        type_str(&mut picker, "j");
        assert_eq!(picker.visible_len(), 0);
        assert!(picker.selected_item().is_none());

        picker.handle_key(&key(KeyCode::Esc));
        assert_eq!(picker.filter_state(), FilterState::Unfiltered);
        assert_eq!(picker.visible_len(), 3);
        assert!(picker.selected_item().is_some());
    }

    #[test]
    fn test_accepting_filter_applies_it() {
        let mut picker = picker_with(&["alpha.md", "beta.md"]);
        picker.handle_key(&key(KeyCode::Char('/')));
        type_str(&mut picker, "bet");
        picker.handle_key(&key(KeyCode::Enter));

        assert_eq!(picker.filter_state(), FilterState::FilterApplied);
        assert!(!picker.is_filtering());
        assert_eq!(picker.selected_item().unwrap().title, "beta.md");

        // a refreshed listing is still filtered
        picker.set_items(vec![note("alpha.md"), note("beta.md"), note("better.md")]);
        assert_eq!(picker.visible_len(), 2);

        picker.handle_key(&key(KeyCode::Esc));
        assert_eq!(picker.visible_len(), 3);
    }

    #[test]
    fn test_accepting_empty_filter_returns_to_unfiltered() {
        let mut picker = picker_with(&["alpha.md"]);
        picker.handle_key(&key(KeyCode::Char('/')));
        picker.handle_key(&key(KeyCode::Enter));
        assert_eq!(picker.filter_state(), FilterState::Unfiltered);
    }
}
