use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means to the mode controller before any overlay sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewNote,
    OpenList,
    Save,
    Confirm,
    Cancel,
    /// Anything else; goes to whichever overlay is active.
    PassThrough,
}

pub fn classify(key: &KeyEvent) -> Command {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Char('q') if !ctrl && !alt => Command::Quit,
        KeyCode::Char('n') if ctrl => Command::NewNote,
        KeyCode::Char('l') if ctrl => Command::OpenList,
        KeyCode::Char('s') if ctrl => Command::Save,
        KeyCode::Enter if key.modifiers.is_empty() => Command::Confirm,
        KeyCode::Esc => Command::Cancel,
        _ => Command::PassThrough,
    }
}

/// Keys that would break a single-line prompt into several lines.
pub fn inserts_newline(key: &KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    matches!(key.code, KeyCode::Enter) || (ctrl && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(classify(&ctrl('c')), Command::Quit);
        assert_eq!(classify(&key(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(classify(&ctrl('n')), Command::NewNote);
        assert_eq!(classify(&ctrl('l')), Command::OpenList);
        assert_eq!(classify(&ctrl('s')), Command::Save);
        assert_eq!(classify(&key(KeyCode::Enter)), Command::Confirm);
        assert_eq!(classify(&key(KeyCode::Esc)), Command::Cancel);
    }

    #[test]
    fn test_plain_letters_pass_through() {
        assert_eq!(classify(&key(KeyCode::Char('n'))), Command::PassThrough);
        assert_eq!(classify(&key(KeyCode::Char('Q'))), Command::PassThrough);
        assert_eq!(classify(&ctrl('a')), Command::PassThrough);
        assert_eq!(classify(&key(KeyCode::Backspace)), Command::PassThrough);
    }

    #[test]
    fn test_inserts_newline() {
        assert!(inserts_newline(&key(KeyCode::Enter)));
        assert!(inserts_newline(&ctrl('m')));
        assert!(!inserts_newline(&key(KeyCode::Char('m'))));
    }
}
