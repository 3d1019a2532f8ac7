use serde::{Deserialize, Serialize};

/// Total for one category, with its share of the grouped sum.
///
/// The core computes the numbers — the presenter only draws the slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,

    /// Sum of `amount` over the rows in this category
    pub amount: f64,

    /// This category's amount / sum of all category amounts × 100, rounded to 2 places
    pub share_pct: f64,
}

/// Total for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// 1-based month number
    pub month: u32,

    /// Three-letter abbreviation (`Jan`..`Dec`)
    pub month_name: String,

    /// Sum of `amount` for the month; zero when no rows fell in it
    pub amount: f64,
}

/// Everything the presenter needs to draw one year of the dashboard.
///
/// Rebuilt from the full ledger on every year selection; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearDashboard {
    /// The selected year
    pub year: i32,

    /// Rows in the selected year, whatever their kind
    pub transaction_count: usize,

    /// Rows in the selected year whose kind is neither Income nor Expense
    pub ignored_count: usize,

    pub total_income: f64,
    pub total_expense: f64,

    /// (income − expense) / income × 100, rounded to 2 places; 0 when there is no income
    pub saving_rate: f64,

    /// Ascending by category name
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,

    /// Always 12 entries, Jan..Dec
    pub income_by_month: Vec<MonthTotal>,
    pub expense_by_month: Vec<MonthTotal>,
}
