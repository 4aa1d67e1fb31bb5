//! Prompt helpers.

use std::io::Write;

/// Redisplay the prompt after asynchronous output
pub fn redisplay_prompt(username: &str) {
    print!("{}> ", username);
    std::io::stdout().flush().ok();
}
