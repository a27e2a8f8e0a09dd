use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Env, Target};

const LOG_ENV: &str = "TOTION_LOG";

/// Sends `log` output to a file; the terminal belongs to the UI.
/// Logging is skipped entirely when the file can't be opened.
pub fn init(log_path: &Path) {
    if let Some(parent) = log_path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let _ = env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init();
}
