mod keys;
mod picker;
mod session;
mod state;

pub use picker::FilterState;
pub use state::{App, KeyOutcome, Mode};
