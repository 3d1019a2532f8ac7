use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Three-letter month abbreviations in calendar order.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Abbreviation for a 1-based month number, or `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
}

/// Classification of a ledger row, taken from the `Income/Expense` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Income,
    Expense,
    /// Any label other than exactly `Income` or `Expense`.
    /// Kept so the row survives loading; aggregation ignores it.
    Other(String),
}

impl Kind {
    /// Case-sensitive: `"income"` is an `Other`, same as the raw ledger comparison.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Income" => Kind::Income,
            "Expense" => Kind::Expense,
            other => Kind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Income => write!(f, "Income"),
            Kind::Expense => write!(f, "Expense"),
            Kind::Other(label) => write!(f, "{label}"),
        }
    }
}

/// One row of the ledger.
///
/// The calendar fields (`year`, `month`, `month_name`) are derived from `date`
/// when the record is built and cannot drift from it afterwards, which is why
/// the fields are private.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    date: NaiveDateTime,
    kind: Kind,
    /// `None` when the ledger cell was blank; such rows are left out of
    /// category groupings but still count toward totals.
    category: Option<String>,
    amount: f64,

    year: i32,
    month: u32,
    month_name: &'static str,
}

impl Transaction {
    pub fn new(
        date: NaiveDateTime,
        kind: Kind,
        category: Option<String>,
        amount: f64,
    ) -> Self {
        let month = date.month();
        Self {
            date,
            kind,
            category,
            amount,
            year: date.year(),
            month,
            // chrono guarantees 1..=12
            month_name: month_name(month).unwrap_or_default(),
        }
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based calendar month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        self.month_name
    }
}
