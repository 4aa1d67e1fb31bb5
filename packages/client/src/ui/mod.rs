//! Terminal front end for a chat session.

mod command;
mod formatter;
mod prompt;
mod repl;

pub use command::{CommandError, ReplCommand};
pub use formatter::SnapshotFormatter;
pub use prompt::redisplay_prompt;
pub use repl::run_repl;
