use std::mem;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use tui_textarea::TextArea;

use super::keys::{self, Command};
use super::picker::NotePicker;
use super::session::NoteSession;
use crate::config::Config;
use crate::vault::{VaultError, VaultStore};

pub const NAME_CHAR_LIMIT: usize = 156;

/// Outer frame taken by the list overlay: two columns of margin on each side,
/// one row above and below, plus the banner and help rows.
const LIST_MARGIN_H: u16 = 4;
const LIST_MARGIN_V: u16 = 2;
const LIST_CHROME_ROWS: u16 = 5;

/// Which overlay owns the keyboard. Only `Editing` can hold an open note.
#[derive(Debug, Default)]
pub enum Mode {
    #[default]
    Idle,
    CreatingFile,
    Browsing,
    Editing(NoteSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub struct App {
    pub config: Config,
    store: VaultStore,
    pub mode: Mode,
    pub name_input: TextArea<'static>,
    pub picker: NotePicker,
    pub status_message: Option<String>,
}

impl App {
    /// Builds the application and makes sure the vault exists.
    pub fn new(config: Config) -> Result<Self, VaultError> {
        let store = VaultStore::new(&config);
        store.ensure_vault()?;

        Ok(Self {
            config,
            store,
            mode: Mode::Idle,
            name_input: new_name_input(),
            picker: NotePicker::new(),
            status_message: None,
        })
    }

    pub fn session(&self) -> Option<&NoteSession> {
        match &self.mode {
            Mode::Editing(session) => Some(session),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        self.status_message = None;

        match keys::classify(&key) {
            Command::Quit => return KeyOutcome::Quit,
            Command::NewNote => self.begin_new_note(),
            Command::OpenList => self.open_list(),
            Command::Save => self.save_note(),
            Command::Confirm => self.confirm(key),
            Command::Cancel => self.cancel(key),
            Command::PassThrough => self.forward(key),
        }

        KeyOutcome::Continue
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.picker.set_size(
            width.saturating_sub(LIST_MARGIN_H),
            height.saturating_sub(LIST_MARGIN_V + LIST_CHROME_ROWS),
        );
    }

    fn begin_new_note(&mut self) {
        match self.mode {
            Mode::Idle | Mode::Browsing => {
                self.name_input = new_name_input();
                self.mode = Mode::CreatingFile;
            }
            Mode::CreatingFile | Mode::Editing(_) => {}
        }
    }

    fn open_list(&mut self) {
        if matches!(self.mode, Mode::Editing(_)) {
            return;
        }

        match self.store.list_notes() {
            Ok(notes) => {
                self.picker.set_items(notes);
                if matches!(self.mode, Mode::CreatingFile) {
                    self.name_input = new_name_input();
                }
                self.mode = Mode::Browsing;
            }
            Err(err) => self.report(err),
        }
    }

    fn save_note(&mut self) {
        let Mode::Editing(session) = &mut self.mode else {
            return;
        };

        if let Err(err) = session.save() {
            self.report(format!("cannot save the file: {}", err));
            return;
        }

        if let Mode::Editing(session) = self.take_mode() {
            self.status_message = Some(format!("Saved {}", session.title()));
            session.close();
        }
    }

    fn confirm(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Idle => {}
            Mode::CreatingFile => self.create_note(),
            Mode::Browsing => self.open_selected_note(),
            // The note owns the keyboard; Enter is just a line break here.
            Mode::Editing(ref mut session) => session.input(key),
        }
    }

    fn create_note(&mut self) {
        let name = self.name_value();
        if name.is_empty() {
            return;
        }

        match self.store.create_note(&name) {
            Ok(opened) => {
                self.name_input = new_name_input();
                self.mode = Mode::Editing(NoteSession::from_opened(opened));
            }
            Err(VaultError::NoteExists(path)) => {
                log::debug!("not creating {}: already exists", path.display());
            }
            Err(err) => self.report(err),
        }
    }

    fn open_selected_note(&mut self) {
        let Some(title) = self.picker.selected_item().map(|note| note.title.clone()) else {
            return;
        };

        match self.store.open_note(&title) {
            Ok(opened) => self.mode = Mode::Editing(NoteSession::from_opened(opened)),
            Err(err) => self.report(err),
        }
    }

    fn cancel(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Idle => {}
            Mode::CreatingFile => {
                self.name_input = new_name_input();
                self.mode = Mode::Idle;
            }
            Mode::Browsing if self.picker.is_filtering() => self.picker.handle_key(&key),
            Mode::Browsing => self.mode = Mode::Idle,
            Mode::Editing(_) => {
                if let Mode::Editing(session) = self.take_mode() {
                    log::info!("discarded edits to {}", session.path().display());
                    session.close();
                }
            }
        }
    }

    fn forward(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Idle => {}
            Mode::CreatingFile => {
                if keys::inserts_newline(&key) || self.name_is_full(&key) {
                    return;
                }
                self.name_input.input(key);
            }
            Mode::Browsing => self.picker.handle_key(&key),
            Mode::Editing(ref mut session) => session.input(key),
        }
    }

    pub fn name_value(&self) -> String {
        self.name_input
            .lines()
            .first()
            .map(|line| line.trim().to_string())
            .unwrap_or_default()
    }

    fn name_is_full(&self, key: &KeyEvent) -> bool {
        let typing = matches!(key.code, KeyCode::Char(_)) && !key.modifiers.contains(KeyModifiers::CONTROL);
        let len = self.name_input.lines().first().map_or(0, |l| l.chars().count());
        typing && len >= NAME_CHAR_LIMIT
    }

    fn take_mode(&mut self) -> Mode {
        mem::take(&mut self.mode)
    }

    fn report(&mut self, message: impl ToString) {
        let message = message.to_string();
        log::warn!("{}", message);
        self.status_message = Some(message);
    }
}

fn new_name_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text("Enter file name");
    input.set_cursor_line_style(Style::default());
    input
}
