use crate::errors::{AppError, AppResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_working_days")]
    pub working_days_per_month: u32,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    #[serde(default = "default_standard_hours")]
    pub standard_hours: Decimal,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_working_days() -> u32 {
    22
}
fn default_hours_per_day() -> u32 {
    8
}
fn default_overtime_multiplier() -> Decimal {
    dec!(1.25)
}
fn default_standard_hours() -> Decimal {
    dec!(8.00)
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            working_days_per_month: default_working_days(),
            hours_per_day: default_hours_per_day(),
            overtime_multiplier: default_overtime_multiplier(),
            standard_hours: default_standard_hours(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rpayroll")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rpayroll")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpayroll.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rpayroll.sqlite")
    }

    /// Hours in a salaried month: the divisor for the standard hourly rate.
    pub fn monthly_hours(&self) -> Decimal {
        Decimal::from(self.working_days_per_month) * Decimal::from(self.hours_per_day)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.database = crate::utils::path::expand_tilde(&cfg.database)
            .to_string_lossy()
            .to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make the payroll arithmetic meaningless.
    pub fn validate(&self) -> AppResult<()> {
        if self.working_days_per_month == 0 || self.hours_per_day == 0 {
            return Err(AppError::Config(
                "working_days_per_month and hours_per_day must be greater than zero".into(),
            ));
        }
        if self.overtime_multiplier < Decimal::ONE {
            return Err(AppError::Config(
                "overtime_multiplier must be at least 1".into(),
            ));
        }
        if self.standard_hours <= Decimal::ZERO || self.standard_hours > dec!(24) {
            return Err(AppError::Config(
                "standard_hours must be between 0 and 24".into(),
            ));
        }
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the resolved database path.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else if is_test {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join("rpayroll.sqlite"),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;

            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };

            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
