use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_initialized;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        what,
        period,
        force,
    } = cmd
    {
        let mut pool = open_initialized(&cfg.database)?;
        ExportLogic::export(&mut pool, *format, *what, file, period.as_deref(), *force)?;
    }
    Ok(())
}
