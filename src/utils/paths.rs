use std::{env, path::PathBuf};

use expense_config::manager::default_home_dir;

/// Environment variable overriding the application directory.
pub const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";

/// Returns the application-specific data directory, defaulting to `~/.expense_tracker`.
pub fn app_home() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    default_home_dir()
}
