pub mod errors;
pub mod models;
pub mod services;

use log::info;
use std::path::Path;

use errors::CoreError;
use models::{
    dashboard::YearDashboard, ledger::Ledger, settings::Settings, transaction::Transaction,
};
use services::{
    aggregation_service::AggregationService, dashboard_service::DashboardService,
    loader::LedgerLoader,
};

/// Main entry point for the finance dashboard core library.
/// Owns the loaded ledger and the services that aggregate it.
///
/// The ledger is read once and never changes; each year selection
/// recomputes its aggregates from the full ledger.
#[must_use]
pub struct FinanceDashboard {
    ledger: Ledger,
    aggregation_service: AggregationService,
    dashboard_service: DashboardService,
    years: Vec<i32>,
}

impl std::fmt::Debug for FinanceDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceDashboard")
            .field("transactions", &self.ledger.len())
            .field("source", &self.ledger.source)
            .field("years", &self.years)
            .finish()
    }
}

impl FinanceDashboard {
    /// Load a ledger CSV from disk. Any unreadable file, missing column,
    /// bad date or bad amount aborts the whole load.
    pub fn load_from_file(path: impl AsRef<Path>, settings: &Settings) -> Result<Self, CoreError> {
        let ledger = LedgerLoader::new(settings).load(path)?;
        Ok(Self::build(ledger))
    }

    /// Wrap records that were already built in memory.
    pub fn from_records(transactions: Vec<Transaction>) -> Self {
        Self::build(Ledger::new(transactions))
    }

    fn build(ledger: Ledger) -> Self {
        let aggregation_service = AggregationService::new();
        let years = aggregation_service.available_years(&ledger.transactions);
        info!(
            "Ledger ready: {} transactions across {} year(s)",
            ledger.len(),
            years.len()
        );
        Self {
            ledger,
            aggregation_service,
            dashboard_service: DashboardService::new(),
            years,
        }
    }

    // ── Ledger ──────────────────────────────────────────────────────

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// All loaded rows, in file order.
    #[must_use]
    pub fn records(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    // ── Year selection ──────────────────────────────────────────────

    /// Years that can be selected, ascending.
    #[must_use]
    pub fn available_years(&self) -> &[i32] {
        &self.years
    }

    /// The year a fresh selector shows: the earliest one. `None` for an empty ledger.
    #[must_use]
    pub fn default_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    /// Year-selection handler: recompute every aggregate for `year`.
    pub fn select_year(&self, year: i32) -> Result<YearDashboard, CoreError> {
        if self.years.binary_search(&year).is_err() {
            return Err(CoreError::YearNotAvailable(year));
        }
        Ok(self.dashboard_service.build(&self.ledger.transactions, year))
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Rows recorded in `year`, in file order.
    #[must_use]
    pub fn transactions_in_year(&self, year: i32) -> Vec<&Transaction> {
        self.aggregation_service
            .filter_year(&self.ledger.transactions, year)
    }
}
