use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use std::env;
use std::process::Command;

/// `--editor`, then $EDITOR / $VISUAL, then the platform default.
fn resolve_editor(requested: Option<&String>) -> String {
    requested
        .cloned()
        .or_else(|| env::var("EDITOR").ok())
        .or_else(|| env::var("VISUAL").ok())
        .unwrap_or_else(|| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if *edit_config {
        let path = Config::config_file();
        let editor = resolve_editor(editor.as_ref());
        tracing::debug!(%editor, path = %path.display(), "opening configuration");

        match Command::new(&editor).arg(&path).status() {
            Ok(status) if status.success() => {
                success(format!("Configuration file edited with '{editor}'"));
            }
            Ok(status) => {
                return Err(AppError::Other(format!(
                    "editor '{editor}' exited with {status}"
                )));
            }
            Err(e) => {
                return Err(AppError::Other(format!(
                    "could not run editor '{editor}': {e}"
                )));
            }
        }
    }

    Ok(())
}
