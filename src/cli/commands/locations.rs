use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::provider::LocationProvider;
use crate::db::initialize::open_initialized;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};

/// Top locations, counted by the store.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Locations { limit } = cmd {
        let mut pool = open_initialized(&cfg.database)?;
        let limit = limit.unwrap_or(cfg.top_locations);

        let locations = pool.top_locations(limit)?;

        if locations.is_empty() {
            info("No location data available");
            return Ok(());
        }

        header("Top Delivery Locations");
        for (i, loc) in locations.iter().enumerate() {
            println!("  {}. {:<30} {:>4}", i + 1, loc.name, loc.count);
        }
    }

    Ok(())
}
