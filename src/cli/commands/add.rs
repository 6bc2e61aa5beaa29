use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, NewSession, parse_amount, parse_delivery};
use crate::db::initialize::open_initialized;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::utils::time::parse_optional_time;

/// Log a delivery session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        active,
        dash,
        gas,
        deliveries,
    } = cmd
    {
        //
        // 1. Parse date (mandatory)
        //
        let d = date::parse_date(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?;

        //
        // 2. Parse optional shift bounds
        //
        let start_parsed = parse_optional_time(start.as_ref())?;
        let end_parsed = parse_optional_time(end.as_ref())?;

        //
        // 3. Parse gas and deliveries
        //
        let gas_parsed = gas.as_deref().map(parse_amount).transpose()?;

        let parsed_deliveries = deliveries
            .iter()
            .map(|raw| parse_delivery(raw))
            .collect::<AppResult<Vec<_>>>()?;

        //
        // 4. Open DB and execute logic
        //
        let mut pool = open_initialized(&cfg.database)?;

        AddLogic::apply(
            &mut pool,
            NewSession {
                date: Some(d),
                start: start_parsed,
                end: end_parsed,
                active: *active,
                dash: *dash,
                gas: gas_parsed,
                deliveries: parsed_deliveries,
            },
        )?;
    }

    Ok(())
}
