use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::settings::Settings;
use crate::models::transaction::{Kind, Transaction};

/// Column headers the ledger must carry, matched exactly.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Income/Expense", "Category", "Amount"];

/// Raw ledger row as it appears in the CSV. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Income/Expense")]
    kind: String,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Reads a CSV ledger into immutable `Transaction` records.
///
/// Loading is all-or-nothing: the first unparseable date or amount aborts the
/// load with the offending file line (the header is line 1). Blank cells are
/// not errors: a row with no date belongs to no year and is dropped, and a
/// blank amount counts as zero. Unknown `Income/Expense` labels load as
/// `Kind::Other`.
pub struct LedgerLoader {
    date_formats: Vec<String>,
}

impl LedgerLoader {
    pub fn new(settings: &Settings) -> Self {
        Self {
            date_formats: settings.date_formats.clone(),
        }
    }

    /// Load the ledger from a file on disk.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Ledger, CoreError> {
        let path = path.as_ref();
        info!("Loading ledger from {}", path.display());
        let file = std::fs::File::open(path)
            .map_err(|e| CoreError::Load(format!("cannot open {}: {e}", path.display())))?;
        let mut ledger = self.load_from_reader(file)?;
        ledger.source = Some(path.to_path_buf());
        Ok(ledger)
    }

    /// Load the ledger from any reader (in-memory text, stdin, ...).
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Ledger, CoreError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        debug!("Ledger headers: {:?}", headers.iter().collect::<Vec<_>>());
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(CoreError::MissingColumn(column.to_string()));
            }
        }

        let mut transactions = Vec::new();
        let mut undated_rows = 0;
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: LedgerRow = record
                .deserialize(Some(&headers))
                .map_err(|e| CoreError::Parse {
                    line,
                    message: e.to_string(),
                })?;
            match self.build_transaction(row, line)? {
                Some(transaction) => transactions.push(transaction),
                None => {
                    debug!("Line {line}: blank date, row belongs to no year");
                    undated_rows += 1;
                }
            }
        }

        info!(
            "Loaded {} transactions ({} undated rows dropped)",
            transactions.len(),
            undated_rows
        );
        let mut ledger = Ledger::new(transactions);
        ledger.undated_rows = undated_rows;
        Ok(ledger)
    }

    /// `Ok(None)` for a row whose date cell is blank.
    fn build_transaction(
        &self,
        row: LedgerRow,
        line: u64,
    ) -> Result<Option<Transaction>, CoreError> {
        if row.date.trim().is_empty() {
            return Ok(None);
        }
        let date = self.parse_date(&row.date).ok_or_else(|| CoreError::Parse {
            line,
            message: format!("unrecognised date '{}'", row.date),
        })?;
        let amount = parse_amount(&row.amount).ok_or_else(|| CoreError::Parse {
            line,
            message: format!("invalid amount '{}'", row.amount),
        })?;
        let category = row.category.filter(|c| !c.is_empty());

        Ok(Some(Transaction::new(
            date,
            Kind::from_label(&row.kind),
            category,
            amount,
        )))
    }

    /// Try each configured format in order, then RFC 3339. First match wins.
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        for format in &self.date_formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt);
            }
            if let Ok(d) = NaiveDate::parse_from_str(raw, format) {
                return d.and_hms_opt(0, 0, 0);
            }
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.naive_local())
    }
}

impl Default for LedgerLoader {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

/// A blank cell contributes nothing to any sum.
fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
