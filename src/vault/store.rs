use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek};
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::Config;

const NOTE_EXTENSION: &str = "md";
const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("cannot create vault directory {path}: {source}")]
    CreateVault { path: PathBuf, source: io::Error },
    #[error("cannot read vault directory {path}: {source}")]
    ReadVault { path: PathBuf, source: io::Error },
    #[error("invalid note name {0:?}")]
    InvalidName(String),
    #[error("note already exists: {0}")]
    NoteExists(PathBuf),
    #[error("cannot create note {path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("cannot open note {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot read note {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// One listed file in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub title: String,
    pub modified: Option<SystemTime>,
}

impl NoteSummary {
    /// Modification time at minute precision, in local time.
    pub fn modified_label(&self) -> String {
        match self.modified {
            Some(time) => DateTime::<Local>::from(time).format(MODIFIED_FORMAT).to_string(),
            None => "unknown".to_string(),
        }
    }

    pub fn description(&self) -> String {
        format!("Modified: {}", self.modified_label())
    }
}

/// A note opened for editing: the read-write handle positioned at the start,
/// plus everything the file held when it was opened.
#[derive(Debug)]
pub struct OpenedNote {
    pub path: PathBuf,
    pub file: File,
    pub content: String,
}

/// File operations on the vault directory.
#[derive(Debug, Clone)]
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    pub fn new(config: &Config) -> Self {
        Self { root: config.vault_dir().to_path_buf() }
    }

    pub fn ensure_vault(&self) -> Result<(), VaultError> {
        if self.root.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o750);
        }

        builder.create(&self.root).map_err(|source| VaultError::CreateVault {
            path: self.root.clone(),
            source,
        })?;
        log::info!("created vault at {}", self.root.display());
        Ok(())
    }

    /// Lists every file directly under the vault, in directory order.
    /// Directories are skipped; so is any entry whose metadata can't be read.
    pub fn list_notes(&self) -> Result<Vec<NoteSummary>, VaultError> {
        let read_err = |source| VaultError::ReadVault { path: self.root.clone(), source };
        let mut notes = Vec::new();

        for entry in fs::read_dir(&self.root).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(err) => {
                    log::debug!("skipping {}: {}", entry.path().display(), err);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            notes.push(NoteSummary {
                title: entry.file_name().to_string_lossy().to_string(),
                modified: metadata.modified().ok(),
            });
        }

        Ok(notes)
    }

    /// Creates `<vault>/<name>.md` and returns it open for reading and writing.
    /// An existing file at that path is never touched.
    pub fn create_note(&self, name: &str) -> Result<OpenedNote, VaultError> {
        validate_name(name)?;
        let path = self.root.join(format!("{}.{}", name, NOTE_EXTENSION));

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::AlreadyExists {
                    VaultError::NoteExists(path.clone())
                } else {
                    VaultError::Create { path: path.clone(), source }
                }
            })?;

        log::info!("created note {}", path.display());
        Ok(OpenedNote { path, file, content: String::new() })
    }

    /// Opens an existing listed file by its title (the file name, extension included).
    pub fn open_note(&self, title: &str) -> Result<OpenedNote, VaultError> {
        validate_name(title)?;
        let path = self.root.join(title);

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| VaultError::Open { path: path.clone(), source })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .and_then(|_| file.rewind())
            .map_err(|source| VaultError::Read { path: path.clone(), source })?;

        log::info!("opened note {}", path.display());
        Ok(OpenedNote { path, file, content })
    }
}

fn validate_name(name: &str) -> Result<(), VaultError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains(std::path::MAIN_SEPARATOR)
        || name.contains('\0');

    if invalid {
        return Err(VaultError::InvalidName(name.to_string()));
    }
    Ok(())
}
