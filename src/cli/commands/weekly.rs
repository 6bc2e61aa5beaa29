use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analytics::weekly::build_weekly_rollups;
use crate::core::logic::Core;
use crate::db::initialize::open_initialized;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::date::parse_period;
use crate::utils::formatting::fmt_pct;
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_money, mins2readable};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Weekly { period } = cmd {
        let mut pool = open_initialized(&cfg.database)?;

        let bounds = parse_period(period.as_deref())?;
        let sessions = Core::within(Core::snapshot(&mut pool)?, bounds);
        let rollups = build_weekly_rollups(&sessions);

        if rollups.is_empty() {
            info("No sessions found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::right("#", 3),
            Column::right("Week", 4),
            Column::left("From", 10),
            Column::left("To", 10),
            Column::right("Deliv", 5),
            Column::right("Earnings", 10),
            Column::right("Gas", 8),
            Column::right("Net", 10),
            Column::right("Dash", 8),
            Column::right("Active", 8),
            Column::right("Eff", 5),
        ]);

        for w in &rollups {
            table.add_row(vec![
                w.id.to_string(),
                w.week_number.to_string(),
                w.start_date.to_string(),
                w.end_date.to_string(),
                w.deliveries.to_string(),
                fmt_money(w.earnings),
                fmt_money(w.gas),
                fmt_money(w.net()),
                mins2readable(w.dash_minutes, false, false),
                mins2readable(w.active_minutes, false, false),
                fmt_pct(w.time_efficiency_pct()),
            ]);
        }

        header("Weekly Summary");
        print!("{}", table.render());
    }

    Ok(())
}
