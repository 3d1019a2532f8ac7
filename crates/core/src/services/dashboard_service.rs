use log::debug;

use crate::models::dashboard::YearDashboard;
use crate::models::transaction::Transaction;
use crate::services::aggregation_service::AggregationService;

/// Builds the per-year dashboard the presenter draws.
///
/// The core computes all the numbers — the presenter only renders.
/// A dashboard includes:
/// - Income and expense totals by category, with percentage shares
/// - Income and expense totals per month, Jan..Dec
/// - Yearly totals and the saving rate
pub struct DashboardService {
    aggregation: AggregationService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self {
            aggregation: AggregationService::new(),
        }
    }

    /// Compute every aggregate for `year` from the full set of rows.
    ///
    /// A year with no rows produces an empty dashboard (zero totals, twelve
    /// zero months); deciding whether such a year is selectable is the
    /// caller's job.
    pub fn build(&self, records: &[Transaction], year: i32) -> YearDashboard {
        let agg = &self.aggregation;

        let year_rows = agg.filter_year(records, year);
        let (income, expense) = agg.split_by_kind(year_rows.iter().copied());
        let ignored_count = year_rows.len() - income.len() - expense.len();
        if ignored_count > 0 {
            debug!("{ignored_count} rows in {year} are neither Income nor Expense");
        }

        let total_income = agg.total_amount(income.iter().copied());
        let total_expense = agg.total_amount(expense.iter().copied());

        let income_totals = agg.category_totals(income.iter().copied());
        let expense_totals = agg.category_totals(expense.iter().copied());

        YearDashboard {
            year,
            transaction_count: year_rows.len(),
            ignored_count,
            total_income,
            total_expense,
            saving_rate: agg.saving_rate(total_income, total_expense),
            income_by_category: agg.category_shares(&income_totals),
            expense_by_category: agg.category_shares(&expense_totals),
            income_by_month: agg.month_totals(income),
            expense_by_month: agg.month_totals(expense),
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
