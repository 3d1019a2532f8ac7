use std::collections::{BTreeMap, BTreeSet};

use crate::models::dashboard::{CategoryTotal, MonthTotal};
use crate::models::transaction::{Kind, Transaction, MONTH_NAMES};

/// Grouping and summation over ledger rows.
///
/// Pure business logic — no I/O, no state. Every method takes the rows it
/// works on and returns a fresh view, so results never depend on call order.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Distinct years present in the rows, ascending.
    pub fn available_years<'a, I>(&self, records: I) -> Vec<i32>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let years: BTreeSet<i32> = records.into_iter().map(|t| t.year()).collect();
        years.into_iter().collect()
    }

    /// Rows whose derived year equals `year`, in their original order.
    pub fn filter_year<'a, I>(&self, records: I, year: i32) -> Vec<&'a Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        records.into_iter().filter(|t| t.year() == year).collect()
    }

    /// Partition into (income, expense). Rows of any other kind land in neither.
    pub fn split_by_kind<'a, I>(&self, records: I) -> (Vec<&'a Transaction>, Vec<&'a Transaction>)
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut income = Vec::new();
        let mut expense = Vec::new();
        for t in records {
            match t.kind() {
                Kind::Income => income.push(t),
                Kind::Expense => expense.push(t),
                Kind::Other(_) => {}
            }
        }
        (income, expense)
    }

    /// Sum of `amount` per category. Only categories that occur in the rows are
    /// keys; rows without a category are skipped.
    pub fn category_totals<'a, I>(&self, records: I) -> BTreeMap<String, f64>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for t in records {
            if let Some(category) = t.category() {
                *totals.entry(category.to_string()).or_insert(0.0) += t.amount();
            }
        }
        totals
    }

    /// Attach each category's percentage of the grouped sum.
    /// When the sum is zero every share is zero.
    pub fn category_shares(&self, totals: &BTreeMap<String, f64>) -> Vec<CategoryTotal> {
        let sum: f64 = totals.values().sum();
        totals
            .iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.clone(),
                amount: *amount,
                share_pct: if sum == 0.0 {
                    0.0
                } else {
                    round2(amount / sum * 100.0)
                },
            })
            .collect()
    }

    /// Twelve entries, Jan..Dec, whatever order the rows come in.
    /// Months without rows total zero.
    pub fn month_totals<'a, I>(&self, records: I) -> Vec<MonthTotal>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut sums = [0.0_f64; 12];
        for t in records {
            sums[(t.month() - 1) as usize] += t.amount();
        }
        sums.iter()
            .zip(MONTH_NAMES)
            .enumerate()
            .map(|(idx, (amount, name))| MonthTotal {
                month: idx as u32 + 1,
                month_name: name.to_string(),
                amount: *amount,
            })
            .collect()
    }

    /// Plain sum of `amount`.
    pub fn total_amount<'a, I>(&self, records: I) -> f64
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        records.into_iter().map(|t| t.amount()).sum()
    }

    /// Percentage of income not spent, rounded to 2 places.
    /// Returns exactly `0.0` when there is no positive income.
    pub fn saving_rate(&self, total_income: f64, total_expense: f64) -> f64 {
        if total_income > 0.0 {
            round2((total_income - total_expense) / total_income * 100.0)
        } else {
            0.0
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to 2 decimal places on the exact binary value, ties to even
/// (`1.125` → `1.12`, `0.375` → `0.38`).
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
