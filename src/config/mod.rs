use crate::core::analytics::downsample::{
    DEFAULT_INTERPOLATION_FACTOR, DEFAULT_MAX_POINTS, EndpointPolicy, MAX_INTERPOLATION_FACTOR,
};
use crate::core::analytics::summary::ChallengeBonus;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_challenge_bonus")]
    pub challenge_bonus: f64,
    #[serde(default = "default_max_chart_points")]
    pub max_chart_points: usize,
    #[serde(default = "default_interpolation_factor")]
    pub interpolation_factor: usize,
    #[serde(default)]
    pub keep_last_point: bool,
    #[serde(default = "default_top_locations")]
    pub top_locations: usize,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_challenge_bonus() -> f64 {
    ChallengeBonus::DEFAULT.amount()
}
fn default_max_chart_points() -> usize {
    DEFAULT_MAX_POINTS
}
fn default_interpolation_factor() -> usize {
    DEFAULT_INTERPOLATION_FACTOR
}
fn default_top_locations() -> usize {
    5
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            challenge_bonus: default_challenge_bonus(),
            max_chart_points: default_max_chart_points(),
            interpolation_factor: default_interpolation_factor(),
            keep_last_point: false,
            top_locations: default_top_locations(),
            currency: default_currency(),
            log_level: default_log_level(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("dashlogger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".dashlogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("dashlogger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("dashlogger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            let mut cfg: Config = serde_yaml::from_str(&content)?;
            if cfg.interpolation_factor > MAX_INTERPOLATION_FACTOR {
                warning(format!(
                    "interpolation_factor {} is above the maximum, using {}",
                    cfg.interpolation_factor, MAX_INTERPOLATION_FACTOR
                ));
                cfg.interpolation_factor = MAX_INTERPOLATION_FACTOR;
            }
            Ok(cfg)
        } else {
            Ok(Self::default())
        }
    }

    /// The flat bonus added once to display totals.
    pub fn bonus(&self) -> ChallengeBonus {
        ChallengeBonus::new(self.challenge_bonus)
    }

    pub fn endpoint_policy(&self) -> EndpointPolicy {
        if self.keep_last_point {
            EndpointPolicy::KeepLast
        } else {
            EndpointPolicy::Stride
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("dashlogger.sqlite")
        };

        let config = Self::with_database(db_path.clone());

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
