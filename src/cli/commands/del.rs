use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::initialize::open_initialized;
use crate::db::queries::load_session;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::fmt_money;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
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

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut pool = open_initialized(&cfg.database)?;

        // fails early with SessionNotFound
        let session = load_session(&pool.conn, *id)?;

        let prompt = format!(
            "Delete session #{} of {} ({} deliveries, {})? This action is irreversible.",
            id,
            session.date_str(),
            session.deliveries_count(),
            fmt_money(session.earnings())
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        DeleteLogic::apply(&mut pool, *id)?;
        success(format!("Session #{} has been deleted.", id));
    }

    Ok(())
}
