use std::fmt;
use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};

use ratatui::style::{Modifier, Style};
use thiserror::Error;
use tui_textarea::{Input, TextArea};

use crate::vault::OpenedNote;

/// A file the session can overwrite in place.
pub trait NoteFile: Write + Seek {
    fn truncate(&mut self) -> io::Result<()>;
}

impl NoteFile for File {
    fn truncate(&mut self) -> io::Result<()> {
        self.set_len(0)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot truncate note: {0}")]
    Truncate(#[source] io::Error),
    #[error("cannot seek in note: {0}")]
    Rewind(#[source] io::Error),
    #[error("cannot write note: {0}")]
    Write(#[source] io::Error),
}

/// The note currently being edited. Owns the file handle for as long as the
/// note is open; the handle is released when the session is closed or dropped.
pub struct NoteSession {
    path: PathBuf,
    file: Box<dyn NoteFile>,
    editor: TextArea<'static>,
}

impl fmt::Debug for NoteSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteSession")
            .field("path", &self.path)
            .field("lines", &self.editor.lines().len())
            .finish()
    }
}

impl NoteSession {
    pub fn open(path: PathBuf, file: Box<dyn NoteFile>, initial_text: &str) -> Self {
        let mut editor = if initial_text.is_empty() {
            TextArea::default()
        } else {
            TextArea::new(initial_text.split('\n').map(str::to_string).collect())
        };
        editor.set_placeholder_text("Write your note here...");
        editor.set_cursor_line_style(Style::default());
        editor.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));

        Self { path, file, editor }
    }

    pub fn from_opened(note: OpenedNote) -> Self {
        Self::open(note.path, Box::new(note.file), &note.content)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn title(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn editor(&self) -> &TextArea<'static> {
        &self.editor
    }

    pub fn text(&self) -> String {
        self.editor.lines().join("\n")
    }

    pub fn input(&mut self, input: impl Into<Input>) {
        self.editor.input(input);
    }

    /// Overwrites the whole file with the buffer. On failure the buffer and the
    /// handle are left as they were so the save can be retried.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let text = self.text();

        self.file.truncate().map_err(SessionError::Truncate)?;
        self.file.rewind().map_err(SessionError::Rewind)?;
        self.file
            .write_all(text.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(SessionError::Write)?;

        log::info!("saved {} ({} bytes)", self.path.display(), text.len());
        Ok(())
    }

    /// Releases the file handle and discards the buffer.
    pub fn close(self) {
        let Self { path, mut file, .. } = self;
        if let Err(err) = file.flush() {
            log::warn!("cannot close {}: {}", path.display(), err);
        }
        drop(file);
        log::debug!("closed {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::io::SeekFrom;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Clone, Copy, PartialEq)]
    enum Step {
        Truncate,
        Rewind,
        Write,
    }

    /// In-memory file that can be told to fail one step of the save.
    struct FlakyFile {
        data: Rc<RefCell<Vec<u8>>>,
        fail_on: Option<Step>,
    }

    impl Write for FlakyFile {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_on == Some(Step::Write) {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.data.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FlakyFile {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            if self.fail_on == Some(Step::Rewind) {
                return Err(io::Error::new(io::ErrorKind::Other, "bad seek"));
            }
            Ok(0)
        }
    }

    impl NoteFile for FlakyFile {
        fn truncate(&mut self) -> io::Result<()> {
            if self.fail_on == Some(Step::Truncate) {
                return Err(io::Error::new(io::ErrorKind::Other, "read-only"));
            }
            self.data.borrow_mut().clear();
            Ok(())
        }
    }

    fn flaky_session(initial: &str, fail_on: Option<Step>) -> (NoteSession, Rc<RefCell<Vec<u8>>>) {
        let data = Rc::new(RefCell::new(initial.as_bytes().to_vec()));
        let file = FlakyFile { data: Rc::clone(&data), fail_on };
        let session = NoteSession::open(PathBuf::from("note.md"), Box::new(file), initial);
        (session, data)
    }

    #[test]
    fn test_open_preloads_buffer() {
        let (session, _) = flaky_session("line one\nline two", None);
        assert_eq!(session.editor().lines(), ["line one", "line two"]);
        assert_eq!(session.text(), "line one\nline two");
        assert_eq!(session.title(), "note.md");
    }

    #[test]
    fn test_open_empty_has_single_empty_line() {
        let (session, _) = flaky_session("", None);
        assert_eq!(session.text(), "");
    }

    #[test]
    fn test_save_replaces_contents() {
        let (mut session, data) = flaky_session("a much longer original", None);
        session.editor.select_all();
        session.editor.cut();
        session.editor.insert_str("short");

        session.save().unwrap();
        assert_eq!(data.borrow().as_slice(), b"short");
    }

    #[test]
    fn test_failed_save_keeps_buffer() {
        for step in [Step::Truncate, Step::Rewind, Step::Write] {
            let (mut session, _) = flaky_session("draft", Some(step));
            session.editor.insert_str("!");

            let result = session.save();
            match step {
                Step::Truncate => assert!(matches!(result, Err(SessionError::Truncate(_)))),
                Step::Rewind => assert!(matches!(result, Err(SessionError::Rewind(_)))),
                Step::Write => assert!(matches!(result, Err(SessionError::Write(_)))),
            }
            assert_eq!(session.text(), "!draft");
        }
    }

    #[test]
    fn test_save_to_real_file_then_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("real.md");
        fs::write(&path, "old content that is long").unwrap();

        let file = fs::OpenOptions::new().read(true).write(true).open(&path).unwrap();
        let mut session = NoteSession::open(path.clone(), Box::new(file), "old content that is long");
        session.editor.select_all();
        session.editor.cut();
        session.editor.insert_str("new");
        session.editor.insert_newline();
        session.editor.insert_str("text");
        session.save().unwrap();
        session.close();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\ntext");
    }
}
