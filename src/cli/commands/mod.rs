pub mod calendar;
pub mod config;
pub mod db;
pub mod entity;
pub mod export;
pub mod init;
pub mod log;
pub mod record;

use crate::ui::messages::warning;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user; `assume_yes` skips the prompt.
pub(crate) fn ask_confirmation(prompt: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }

    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
