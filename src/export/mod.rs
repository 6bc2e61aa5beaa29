// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;
pub mod model;

pub use logic::ExportLogic;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Which dataset is written.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ExportTarget {
    /// One row per session
    #[default]
    Sessions,
    /// One row per delivery, with its merchant type
    Deliveries,
    /// Per-merchant aggregates
    Merchants,
    /// Monday-based weekly rollups
    Weekly,
}

impl ExportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTarget::Sessions => "sessions",
            ExportTarget::Deliveries => "deliveries",
            ExportTarget::Merchants => "merchants",
            ExportTarget::Weekly => "weekly",
        }
    }
}
