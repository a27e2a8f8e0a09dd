mod store;

pub use store::{NoteSummary, OpenedNote, VaultError, VaultStore};
