use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analytics::timeseries::TimeRange;
use crate::core::logic::{Core, SeriesOptions};
use crate::db::initialize::open_initialized;
use crate::errors::AppResult;
use crate::models::series::CumulativeSeries;
use crate::ui::messages::{header, info};
use crate::utils::date::now_ms;
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_money, mins2readable};
use chrono::DateTime;

/// Cumulative series for charting, as a table or as JSON.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Series {
        range,
        max_points,
        interpolate,
        json,
    } = cmd
    {
        let range: TimeRange = range.parse()?;

        let mut pool = open_initialized(&cfg.database)?;
        let sessions = Core::snapshot(&mut pool)?;

        let opts = SeriesOptions {
            range,
            max_points: *max_points,
            interpolate: interpolate.map(|f| f.unwrap_or(cfg.interpolation_factor)),
        };
        let series = Core::display_series(&sessions, cfg, opts, now_ms());

        if *json {
            println!("{}", serde_json::to_string_pretty(&series)?);
            return Ok(());
        }

        if series.is_empty() {
            info("No data for the selected range.");
            return Ok(());
        }

        header("Cumulative Series");
        print_series(&series);
    }

    Ok(())
}

fn day_of(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn print_series(series: &CumulativeSeries) {
    let mut table = Table::new(vec![
        Column::left("Date", 10),
        Column::right("Earnings", 12),
        Column::right("Deliveries", 10),
        Column::right("Active", 10),
        Column::right("Dash", 10),
    ]);

    let rows = series
        .earnings
        .iter()
        .zip(&series.deliveries)
        .zip(&series.active_time)
        .zip(&series.dash_time);

    for (((e, d), a), t) in rows {
        table.add_row(vec![
            day_of(e.timestamp),
            fmt_money(e.value),
            format!("{:.0}", d.value),
            mins2readable(a.value.round() as i64, false, false),
            mins2readable(t.value.round() as i64, false, false),
        ]);
    }

    print!("{}", table.render());
}
