//! Policy tables, contribution periods and settings stored on disk.

mod config;
mod loader;
mod periods;

pub use config::{AppConfig, ConfigError, LoggingConfig, PolicyConfig, ServerConfig};
pub use loader::{
    POLICY_FILE, PolicyLoader, PolicyLoaderError, PolicyRecord, REGIONAL_WAGES_FILE,
    RegionalWageRecord, TAX_BRACKETS_FILE, TaxBracketRecord,
};
pub use periods::{PeriodLoaderError, load_periods, periods_from_str};
