use crate::core::analytics::downsample::MAX_INTERPOLATION_FACTOR;
use crate::export::{ExportFormat, ExportTarget};
use clap::{Parser, Subcommand};

/// Command-line interface definition for dashlogger
/// CLI application to log delivery sessions and analyze earnings with SQLite
#[derive(Parser)]
#[command(
    name = "dashlogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A delivery session logger: track earnings, merchants and time efficiency using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Log a delivery session
    Add {
        /// Date of the session (YYYY-MM-DD)
        date: String,

        /// Session start time (HH:MM)
        #[arg(long = "start", help = "Session start time (HH:MM)")]
        start: Option<String>,

        /// Session end time (HH:MM)
        #[arg(long = "end", help = "Session end time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "active", help = "Minutes spent on deliveries")]
        active: Option<i64>,

        #[arg(
            long = "dash",
            help = "Minutes logged in (defaults to the span between --start and --end)"
        )]
        dash: Option<i64>,

        #[arg(long = "gas", help = "Gas cost for the session, e.g. 4.75 or $4.75")]
        gas: Option<String>,

        /// One delivery, repeatable: MERCHANT=BASE[+TIP]
        #[arg(
            long = "delivery",
            short = 'd',
            value_name = "MERCHANT=BASE[+TIP]",
            help = "Delivery as MERCHANT=BASE[+TIP], e.g. \"Kroger=6.00+1.50\" (repeatable)"
        )]
        deliveries: Vec<String>,
    },

    /// Delete a session (and its deliveries) by ID
    Del {
        /// Session id, as shown by `list`
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List sessions
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "details", help = "Show the deliveries of each session")]
        details: bool,
    },

    /// Show totals, weekly figures and top locations
    Summary {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        /// Show one week in detail (no value = current week)
        #[arg(long = "week", value_name = "ID", num_args = 0..=1)]
        week: Option<Option<usize>>,
    },

    /// Show the Monday-based weekly rollups
    Weekly {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Rank merchants by deliveries, pay or visits
    Merchants {
        #[arg(
            long,
            default_value = "deliveries",
            help = "Sort field: name, type, deliveries, base_pay, tips, earnings, avg, visits"
        )]
        sort: String,

        #[arg(long, help = "Sort ascending (default: descending)")]
        asc: bool,

        #[arg(
            long = "type",
            default_value = "all",
            help = "Filter by type: all, shopping, grocery, fast-food, restaurant"
        )]
        merchant_type: String,

        #[arg(long, help = "Case-insensitive substring filter on the merchant name")]
        search: Option<String>,

        #[arg(long, help = "Show only the first N merchants")]
        top: Option<usize>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Most frequently visited merchants
    Locations {
        #[arg(long, help = "Number of locations (default: top_locations from config)")]
        limit: Option<usize>,
    },

    /// Cumulative earnings, deliveries and time, ready for charting
    Series {
        #[arg(long, default_value = "all", help = "Time window: all, 7d, 30d, 90d")]
        range: String,

        #[arg(long = "max-points", help = "Downsample to at most N points")]
        max_points: Option<usize>,

        /// Densify instead of downsampling (no value = config factor)
        #[arg(
            long = "interpolate",
            value_name = "FACTOR",
            num_args = 0..=1,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_INTERPOLATION_FACTOR as u64)
        )]
        interpolate: Option<Option<usize>>,

        #[arg(long, help = "Print the series as JSON")]
        json: bool,
    },

    /// Export session data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_enum, default_value = "sessions")]
        what: ExportTarget,

        #[arg(
            long,
            value_name = "PERIOD",
            help = "Filter export by year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import sessions from a JSON data file
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}
