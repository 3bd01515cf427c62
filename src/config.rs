use std::env;

use chrono::NaiveDate;
use dotenvy::dotenv;

/// Batch-runner configuration, read from the environment.
#[derive(Clone)]
pub struct Config {
    pub schedules_file: String,
    pub records_file: String,
    pub permissions_file: String,

    /// Records dated here or later are never touched. Defaults to the
    /// current local date.
    pub today: Option<NaiveDate>,

    /// Compute and log corrections without writing the records file back.
    pub dry_run: bool,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            schedules_file: env::var("SCHEDULES_FILE").expect("SCHEDULES_FILE must be set"),
            records_file: env::var("RECORDS_FILE").expect("RECORDS_FILE must be set"),
            permissions_file: env::var("PERMISSIONS_FILE").expect("PERMISSIONS_FILE must be set"),

            today: env::var("TODAY")
                .ok()
                .map(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").expect("TODAY must be YYYY-MM-DD")),

            dry_run: env::var("DRY_RUN")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap(),

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}
