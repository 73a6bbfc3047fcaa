use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    cli::GlobalArgs,
    error::{AppError, Result},
};

const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the ledger file.
    pub data_dir: String,
    /// Name of the slot the ledger is stored under.
    pub storage_key: String,
    /// Log level for the `tally` and `engine` targets.
    pub level: String,
    /// IANA timezone used for "today"; the system local time when unset.
    pub timezone: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            storage_key: engine::DEFAULT_STORAGE_KEY.to_string(),
            level: "info".to_string(),
            timezone: None,
        }
    }
}

impl AppConfig {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Current calendar date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        match self.timezone.as_deref() {
            Some(name) => {
                let tz: chrono_tz::Tz = name
                    .parse()
                    .map_err(|_| AppError::Timezone(name.to_string()))?;
                Ok(Utc::now().with_timezone(&tz).date_naive())
            }
            None => Ok(Local::now().date_naive()),
        }
    }
}

/// Layers defaults, the TOML file, `TALLY_*` environment variables and CLI
/// flags, in that order.
pub fn load(args: &GlobalArgs) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("TALLY"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = &args.data_dir {
        settings.data_dir = data_dir.clone();
    }
    if let Some(timezone) = &args.timezone {
        settings.timezone = Some(timezone.clone());
    }

    Ok(settings)
}
