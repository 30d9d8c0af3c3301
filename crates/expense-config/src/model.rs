use std::fmt::Write;
use std::path::PathBuf;

use chrono::{
    format::{Item, StrftimeItems},
    NaiveDate,
};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const DEFAULT_SHEET_NAME: &str = "controle_despesas";
const DEFAULT_DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// User-configurable settings. Missing fields fall back to defaults so older
/// files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Directory holding sheet files. Defaults to `<home>/sheets`.
    pub data_dir: Option<PathBuf>,
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_display_format: String,
    pub cache_ttl_seconds: u64,
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.into(),
            data_dir: None,
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            grouping_separator: '.',
            date_display_format: DEFAULT_DATE_DISPLAY_FORMAT.into(),
            cache_ttl_seconds: 60,
            ui_color_enabled: true,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 8] = [
        "sheet_name",
        "data_dir",
        "currency_symbol",
        "decimal_separator",
        "grouping_separator",
        "date_display_format",
        "cache_ttl_seconds",
        "ui_color_enabled",
    ];

    pub fn resolve_data_dir(&self, home: &std::path::Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| home.join("sheets"))
    }

    /// Current value of `key` rendered as text.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "sheet_name" => self.sheet_name.clone(),
            "data_dir" => self
                .data_dir
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            "currency_symbol" => self.currency_symbol.clone(),
            "decimal_separator" => self.decimal_separator.to_string(),
            "grouping_separator" => self.grouping_separator.to_string(),
            "date_display_format" => self.date_display_format.clone(),
            "cache_ttl_seconds" => self.cache_ttl_seconds.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses `value` and assigns it to `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };
        let value = value.trim();
        match key {
            "sheet_name" => {
                if value.is_empty() {
                    return Err(invalid("sheet name cannot be empty"));
                }
                self.sheet_name = value.to_string();
            }
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "decimal_separator" => {
                self.decimal_separator =
                    single_char(value).ok_or_else(|| invalid("expected a single character"))?;
            }
            "grouping_separator" => {
                self.grouping_separator =
                    single_char(value).ok_or_else(|| invalid("expected a single character"))?;
            }
            "date_display_format" => {
                if !is_valid_date_format(value) {
                    return Err(invalid("expected a strftime date format such as %d/%m/%Y"));
                }
                self.date_display_format = value.to_string();
            }
            "cache_ttl_seconds" => {
                self.cache_ttl_seconds = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number of seconds"))?;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid("expected true or false")),
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

impl Config {
    /// Replaces values a hand-edited file may carry but nothing can render.
    /// Returns the keys that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();
        if !is_valid_date_format(&self.date_display_format) {
            self.date_display_format = DEFAULT_DATE_DISPLAY_FORMAT.into();
            reset.push("date_display_format");
        }
        reset
    }
}

/// True when `format` parses as strftime and renders a plain date. Time and
/// offset specifiers (`%H`, `%z`) fail on dates, so they are rejected too.
pub fn is_valid_date_format(format: &str) -> bool {
    if format.trim().is_empty() {
        return false;
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let Some(sample) = NaiveDate::from_ymd_opt(2000, 1, 31) else {
        return false;
    };
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).is_ok()
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_round_trip_known_keys() {
        let mut config = Config::default();
        config.set("cache_ttl_seconds", "120").unwrap();
        config.set("ui_color_enabled", "off").unwrap();
        config.set("decimal_separator", ".").unwrap();

        assert_eq!(config.get("cache_ttl_seconds").unwrap(), "120");
        assert_eq!(config.get("ui_color_enabled").unwrap(), "false");
        assert_eq!(config.decimal_separator, '.');
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("colour", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("cache_ttl_seconds", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("grouping_separator", ".."),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_date_formats_are_rejected() {
        let mut config = Config::default();
        for format in ["%Q", "%d/%m/%", "%H:%M", "   "] {
            assert!(
                matches!(
                    config.set("date_display_format", format),
                    Err(ConfigError::InvalidValue { .. })
                ),
                "{format:?}"
            );
        }
        assert_eq!(config.date_display_format, "%d/%m/%Y");

        config.set("date_display_format", "%Y-%m-%d").unwrap();
        assert_eq!(config.date_display_format, "%Y-%m-%d");
    }

    #[test]
    fn sanitize_resets_unrenderable_formats() {
        let mut config = Config {
            date_display_format: "%Q".into(),
            ..Config::default()
        };
        assert_eq!(config.sanitize(), vec!["date_display_format"]);
        assert_eq!(config, Config::default());
        assert!(config.sanitize().is_empty());
    }

    #[test]
    fn every_listed_key_is_readable() {
        let config = Config::default();
        for key in Config::KEYS {
            assert!(config.get(key).is_ok(), "{key}");
        }
    }
}
