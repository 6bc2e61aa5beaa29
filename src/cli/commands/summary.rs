use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{Core, Dashboard};
use crate::db::initialize::open_initialized;
use crate::errors::AppResult;
use crate::models::summary::WeeklyRollup;
use crate::ui::messages::{header, info, kv, warning};
use crate::utils::colors::{RESET, color_for_efficiency, color_for_net};
use crate::utils::date::parse_period;
use crate::utils::formatting::fmt_pct;
use crate::utils::{fmt_money, mins2readable};

/// Overall totals, one selected week and the top delivery locations.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { period, week } = cmd {
        let mut pool = open_initialized(&cfg.database)?;

        let bounds = parse_period(period.as_deref())?;
        let sessions = Core::within(Core::snapshot(&mut pool)?, bounds);

        if sessions.is_empty() {
            info("No sessions found.");
            return Ok(());
        }

        // --week alone selects the current (latest) week
        let dashboard = Core::build_dashboard(&sessions, cfg, week.flatten());

        header(match period.as_deref() {
            Some(p) => format!("Summary ({p})"),
            None => "Summary (All Time)".to_string(),
        });
        print_totals(&dashboard);

        if week.is_some() {
            match &dashboard.selected_week {
                Some(w) => print_week(w),
                None => warning(format!(
                    "No such week; valid ids are 1..={}",
                    dashboard.weekly.len()
                )),
            }
        }

        header("Top Delivery Locations");
        if dashboard.top_locations.is_empty() {
            info("No location data available");
        } else {
            for (i, loc) in dashboard.top_locations.iter().enumerate() {
                println!("  {}. {:<30} {:>4}", i + 1, loc.name, loc.count);
            }
        }
    }

    Ok(())
}

fn print_totals(dashboard: &Dashboard) {
    let totals = &dashboard.totals;
    let m = &totals.metrics;

    kv("Total Earnings", fmt_money(totals.display_earnings));
    if totals.bonus > 0.0 {
        kv("  incl. challenge bonus", fmt_money(totals.bonus));
    }
    kv("Gas", fmt_money(m.total_gas));
    kv(
        "Net Earnings",
        format!(
            "{}{}{}",
            color_for_net(totals.display_net),
            fmt_money(totals.display_net),
            RESET
        ),
    );
    kv("Sessions", m.session_count);
    kv("Deliveries Made", m.deliveries_made);
    kv("Avg per delivery", fmt_money(m.avg_per_delivery));
    kv("Avg per session", fmt_money(m.avg_per_session));
    kv("Avg per hour", fmt_money(m.avg_per_hour));
    kv("Dash Time", mins2readable(m.total_dash_minutes, false, false));
    kv("Active Time", mins2readable(m.total_active_minutes, false, false));
    kv(
        "Time Efficiency",
        format!(
            "{}{}{}",
            color_for_efficiency(m.time_efficiency_pct),
            fmt_pct(m.time_efficiency_pct),
            RESET
        ),
    );
}

fn print_week(w: &WeeklyRollup) {
    header(format!(
        "Week {} (#{}: {} .. {})",
        w.week_number, w.id, w.start_date, w.end_date
    ));
    kv("Earnings", fmt_money(w.earnings));
    kv("Gas", fmt_money(w.gas));
    kv("Net", fmt_money(w.net()));
    kv("Deliveries", w.deliveries);
    kv("Dash Time", mins2readable(w.dash_minutes, false, false));
    kv("Active Time", mins2readable(w.active_minutes, false, false));
    kv("Time Efficiency", fmt_pct(w.time_efficiency_pct()));
}
