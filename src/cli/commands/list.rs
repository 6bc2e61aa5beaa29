use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analytics::classifier::classify;
use crate::core::analytics::summary::time_efficiency_pct;
use crate::core::logic::Core;
use crate::db::initialize::open_initialized;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_efficiency, color_for_net, colorize_optional};
use crate::utils::date::parse_period;
use crate::utils::formatting::fmt_pct;
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_money, mins2readable};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, details } = cmd {
        let mut pool = open_initialized(&cfg.database)?;

        let bounds = parse_period(period.as_deref())?;
        let sessions = Core::within(Core::snapshot(&mut pool)?, bounds);

        if sessions.is_empty() {
            info("No sessions found.");
            return Ok(());
        }

        header(match period.as_deref() {
            Some(p) => format!("Sessions ({p})"),
            None => "Sessions (All Time)".to_string(),
        });
        print_sessions(&sessions);

        if *details {
            for s in &sessions {
                print_deliveries(s);
            }
        }
    }
    Ok(())
}

fn print_sessions(sessions: &[Session]) {
    let mut table = Table::new(vec![
        Column::right("ID", 4),
        Column::left("Date", 10),
        Column::left("Start", 5),
        Column::left("End", 5),
        Column::right("Dash", 8),
        Column::right("Active", 8),
        Column::right("Eff", 5),
        Column::right("Deliv", 5),
        Column::right("Earnings", 10),
        Column::right("Gas", 8),
        Column::right("Net", 10),
    ]);

    for s in sessions {
        let net = s.earnings() - s.gas();
        table.add_row(vec![
            s.id.to_string(),
            s.date_str(),
            Session::time_str(s.start_time),
            Session::time_str(s.end_time),
            mins2readable(s.dash_minutes(), false, false),
            mins2readable(s.active_minutes(), false, false),
            fmt_pct(time_efficiency_pct(s.active_minutes(), s.dash_minutes())),
            s.deliveries_count().to_string(),
            fmt_money(s.earnings()),
            fmt_money(s.gas()),
            fmt_money(net),
        ]);
    }

    print!("{}", table.render());
}

fn print_deliveries(session: &Session) {
    let eff = time_efficiency_pct(session.active_minutes(), session.dash_minutes());
    let net = session.earnings() - session.gas();

    println!(
        "\n#{} {} {}-{} | eff {}{}{} | net {}{}{}",
        session.id,
        session.date_str(),
        colorize_optional(&Session::time_str(session.start_time)),
        colorize_optional(&Session::time_str(session.end_time)),
        color_for_efficiency(eff),
        fmt_pct(eff),
        RESET,
        color_for_net(net),
        fmt_money(net),
        RESET
    );

    if session.deliveries.is_empty() {
        println!("  {}", colorize_optional("--"));
        return;
    }

    for d in &session.deliveries {
        println!(
            "  - {:<28} {:<10} base {:>8}  tip {:>8}  total {:>8}",
            d.restaurant,
            classify(&d.restaurant).label(),
            fmt_money(d.base_pay),
            fmt_money(d.tip),
            fmt_money(d.total())
        );
    }
}
