use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CoreError;

/// Date formats tried in order when parsing the ledger's `Date` column.
/// A date-only format yields midnight.
pub const DEFAULT_DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y/%m/%d",
    "%d.%m.%Y",
];

/// Default width (in characters) of the longest month bar.
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// User-configurable settings, optionally read from a TOML file.
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// chrono format strings tried in order for the `Date` column.
    /// RFC 3339 timestamps are always accepted as a last resort.
    pub date_formats: Vec<String>,

    /// Label printed next to amounts (e.g., "USD", "€"). Empty by default.
    pub currency: String,

    /// Year to show first when none is given on the command line.
    pub default_year: Option<i32>,

    /// Width of the longest bar in the monthly charts.
    pub bar_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            currency: String::new(),
            default_year: None,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, CoreError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file. A path that does not exist is an error:
    /// callers that want defaults should not pass a path at all.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.date_formats.is_empty() {
            return Err(CoreError::Config(
                "date_formats must list at least one format".into(),
            ));
        }
        if self.bar_width == 0 {
            return Err(CoreError::Config("bar_width must be greater than 0".into()));
        }
        Ok(())
    }
}
