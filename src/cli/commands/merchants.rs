use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::analytics::ranking::{
    self, SortDirection, SortField, TypeFilter, build_merchant_report,
};
use crate::core::logic::Core;
use crate::db::initialize::open_initialized;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, kv, warning};
use crate::utils::date::parse_period;
use crate::utils::fmt_money;
use crate::utils::table::{Column, Table};

/// Per-merchant ranking with sort, type and name filters.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Merchants {
        sort,
        asc,
        merchant_type,
        search,
        top,
        period,
    } = cmd
    {
        // validate the arguments before touching the DB
        let field: SortField = sort.parse()?;
        let filter: TypeFilter = merchant_type.parse()?;
        let direction = if *asc {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };

        let mut pool = open_initialized(&cfg.database)?;
        let bounds = parse_period(period.as_deref())?;
        let sessions = Core::within(Core::snapshot(&mut pool)?, bounds);

        let report = build_merchant_report(&sessions);
        if report.skipped > 0 {
            warning(format!(
                "Skipped {} delivery(ies) without a merchant name or with invalid amounts.",
                report.skipped
            ));
        }

        let all = report.summaries;
        if all.is_empty() {
            info("No merchants found.");
            return Ok(());
        }

        let overview = ranking::overview(&all);
        header("Merchants");
        kv("Merchants", overview.total_merchants);
        kv("Deliveries", overview.total_deliveries);
        kv("Avg per delivery", fmt_money(overview.avg_per_delivery));
        kv(
            "Most frequent",
            overview.most_frequent.as_deref().unwrap_or("--"),
        );
        kv(
            "Highest paying",
            overview.highest_paying.as_deref().unwrap_or("--"),
        );

        header("By Type");
        for stats in ranking::stats_by_type(&all) {
            println!(
                "  {:<12} {:>3} merchant(s) {:>5} deliveries {:>10}",
                stats.merchant_type.label(),
                stats.merchants,
                stats.deliveries,
                fmt_money(stats.earnings)
            );
        }

        let mut rows = ranking::filter_by_type(all, filter);
        if let Some(term) = search {
            rows = ranking::filter_by_name(rows, term);
        }
        ranking::sort_by(&mut rows, field, direction);
        if let Some(n) = top {
            rows = ranking::top_n(rows, *n);
        }

        if rows.is_empty() {
            info("No merchants match the given filters.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("Merchant", 28),
            Column::left("Type", 10),
            Column::right("Deliv", 5),
            Column::right("Base", 10),
            Column::right("Tips", 10),
            Column::right("Total", 10),
            Column::right("Avg", 8),
            Column::right("Visits", 6),
        ]);

        for m in &rows {
            table.add_row(vec![
                m.name.clone(),
                m.merchant_type.label().to_string(),
                m.deliveries_count.to_string(),
                fmt_money(m.base_pay_total),
                fmt_money(m.tips_total),
                fmt_money(m.total_earnings),
                fmt_money(m.avg_per_delivery),
                m.visit_count.to_string(),
            ]);
        }

        header("Ranking");
        print!("{}", table.render());
    }

    Ok(())
}
