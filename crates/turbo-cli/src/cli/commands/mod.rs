//! CLI command handlers, one per file.

mod check;
mod host;
mod send;

pub use check::run_check;
pub use host::run_host;
pub use send::run_send;
