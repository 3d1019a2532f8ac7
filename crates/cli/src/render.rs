use comfy_table::{Cell, CellAlignment, Table, TableComponent};
use finance_dashboard_core::models::dashboard::{CategoryTotal, MonthTotal, YearDashboard};

pub const TITLE: &str = "Income Expense analysis";
pub const DESCRIPTION: &str = "Overview of income and expense based on your bank transactions. \
Categories are obtained using local LLMs.";

const BAR_GLYPH: char = '█';

/// Title block shown above every dashboard.
pub fn render_header() -> String {
    format!("{TITLE}\n{}\n{DESCRIPTION}\n", "=".repeat(TITLE.len()))
}

/// The four panels for one year: two category breakdowns, then two month charts.
pub fn render_dashboard(dashboard: &YearDashboard, currency: &str, bar_width: usize) -> String {
    let year = dashboard.year;
    let mut out = String::new();

    out.push_str(&format!("Income Breakdown {year}\n"));
    out.push_str(&category_table(&dashboard.income_by_category, currency).to_string());
    out.push_str("\n\n");

    out.push_str(&format!(
        "Expense Breakdown {year}: Saving rate {:.2}%\n",
        dashboard.saving_rate
    ));
    out.push_str(&category_table(&dashboard.expense_by_category, currency).to_string());
    out.push_str("\n\n");

    out.push_str("Income per month\n");
    out.push_str(&month_table(&dashboard.income_by_month, currency, bar_width).to_string());
    out.push_str("\n\n");

    out.push_str("Expense per month\n");
    out.push_str(&month_table(&dashboard.expense_by_month, currency, bar_width).to_string());
    out.push('\n');

    if dashboard.ignored_count > 0 {
        out.push_str(&format!(
            "\n{} transaction(s) in {year} were neither Income nor Expense and are not shown.\n",
            dashboard.ignored_count
        ));
    }
    out
}

fn base_table() -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

fn category_table(rows: &[CategoryTotal], currency: &str) -> Table {
    let mut table = base_table();
    table.set_header(vec!["Category", "Amount", "Share"]);
    if rows.is_empty() {
        table.add_row(vec![Cell::new("(none)"), Cell::new(""), Cell::new("")]);
        return table;
    }
    for row in rows {
        table.add_row(vec![
            Cell::new(row.category.as_str()),
            Cell::new(format_amount(row.amount, currency)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}%", row.share_pct)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn month_table(rows: &[MonthTotal], currency: &str, bar_width: usize) -> Table {
    let max = rows.iter().map(|m| m.amount).fold(0.0_f64, f64::max);
    let mut table = base_table();
    table.set_header(vec!["Month", "Amount", ""]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.month_name.as_str()),
            Cell::new(format_amount(row.amount, currency)).set_alignment(CellAlignment::Right),
            Cell::new(bar(row.amount, max, bar_width)),
        ]);
    }
    table
}

/// Horizontal bar scaled so that `max` fills `width`. Non-positive values draw nothing.
pub fn bar(amount: f64, max: f64, width: usize) -> String {
    if amount <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let len = ((amount / max) * width as f64).round() as usize;
    std::iter::repeat(BAR_GLYPH).take(len.min(width)).collect()
}

pub fn format_amount(amount: f64, currency: &str) -> String {
    if currency.is_empty() {
        format!("{amount:.2}")
    } else {
        format!("{amount:.2} {currency}")
    }
}
