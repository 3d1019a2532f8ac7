use serde::Serialize;
use std::path::PathBuf;

use super::transaction::Transaction;

/// The loaded transaction ledger. Built once by the loader and never
/// mutated afterwards; every aggregate is derived from it on demand.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    /// Rows in file order
    pub transactions: Vec<Transaction>,

    /// File the rows came from, if they came from disk
    pub source: Option<PathBuf>,

    /// Rows dropped at load because their date cell was blank
    pub undated_rows: usize,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            source: None,
            undated_rows: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
