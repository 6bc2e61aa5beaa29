// src/export/logic.rs

use crate::core::analytics::ranking::build_merchant_summaries;
use crate::core::analytics::weekly::build_weekly_rollups;
use crate::core::logic::Core;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{MerchantExport, SessionExport, WeeklyExport, deliveries_of};
use crate::export::{ExportFormat, ExportTarget};
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use serde::Serialize;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one dataset.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute path of the output file
    /// - `period`: `None`, `"all"` or one of:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - any of the above as `FROM:TO`
    ///
    /// Returns the number of rows written.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        target: ExportTarget,
        file: &str,
        period: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let bounds = parse_period(period)?;
        let sessions = Core::within(Core::snapshot(pool)?, bounds);

        if sessions.is_empty() {
            warning("No sessions found for selected period.");
            return Ok(0);
        }

        let written = match target {
            ExportTarget::Sessions => {
                let rows: Vec<SessionExport> = sessions.iter().map(SessionExport::from).collect();
                write_rows(&rows, format, path)?
            }
            ExportTarget::Deliveries => write_rows(&deliveries_of(&sessions), format, path)?,
            ExportTarget::Merchants => {
                let rows: Vec<MerchantExport> = build_merchant_summaries(&sessions)
                    .iter()
                    .map(MerchantExport::from)
                    .collect();
                write_rows(&rows, format, path)?
            }
            ExportTarget::Weekly => {
                let rows: Vec<WeeklyExport> = build_weekly_rollups(&sessions)
                    .iter()
                    .map(WeeklyExport::from)
                    .collect();
                write_rows(&rows, format, path)?
            }
        };

        let message = format!(
            "Exported {written} {} row(s) as {}",
            target.as_str(),
            format.as_str()
        );
        if let Err(e) = ttlog(&pool.conn, "export", file, &message) {
            tracing::warn!(error = %e, "failed to write internal log");
        }

        Ok(written)
    }
}

fn write_rows<T: Serialize>(rows: &[T], format: ExportFormat, path: &Path) -> AppResult<usize> {
    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }
    Ok(rows.len())
}
