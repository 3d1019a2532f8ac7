use thiserror::Error;

/// Unified error type for the entire finance-dashboard-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger file ─────────────────────────────────────────────────
    #[error("Failed to load ledger: {0}")]
    Load(String),

    #[error("Ledger is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ── Selection ───────────────────────────────────────────────────
    #[error("No transactions recorded for year {0}")]
    YearNotAvailable(i32),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Load(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        // Row-level failures carry a position; keep it so the user can find the line.
        match e.position() {
            Some(pos) => CoreError::Parse {
                line: pos.line(),
                message: e.to_string(),
            },
            None => CoreError::Load(e.to_string()),
        }
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
