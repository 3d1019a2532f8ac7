use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use finance_dashboard_core::models::settings::Settings;
use finance_dashboard_core::FinanceDashboard;

mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable tables and bars
    Table,
    /// The computed dashboard as JSON
    Json,
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Transaction ledger (CSV with Date, Income/Expense, Category, Amount columns)
    #[clap(default_value = "expense_data_1.csv")]
    ledger: PathBuf,

    /// Year to show; defaults to the config's default_year, then the earliest year
    #[clap(short, long)]
    year: Option<i32>,

    /// TOML settings file
    #[clap(short, long, env = "FINANCE_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Prompt for further years after the first one is shown
    #[clap(short, long)]
    interactive: bool,

    /// Print the selectable years and exit
    #[clap(long)]
    list_years: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let dashboard = FinanceDashboard::load_from_file(&cli.ledger, &settings)
        .with_context(|| format!("loading ledger {}", cli.ledger.display()))?;

    if cli.list_years {
        for year in dashboard.available_years() {
            println!("{year}");
        }
        return Ok(());
    }

    let Some(year) = choose_year(cli.year, &settings, &dashboard) else {
        bail!("ledger {} has no transactions", cli.ledger.display());
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.format == OutputFormat::Table {
        writeln!(out, "{}", render::render_header())?;
    }
    show_year(&dashboard, year, cli.format, &settings, &mut out)?;

    if cli.interactive {
        run_selector(&dashboard, cli.format, &settings, io::stdin().lock(), &mut out)?;
    }
    Ok(())
}

/// The year shown first: `--year`, else the configured `default_year`,
/// else the earliest year in the ledger. `None` only for an empty ledger.
fn choose_year(requested: Option<i32>, settings: &Settings, dashboard: &FinanceDashboard) -> Option<i32> {
    requested
        .or(settings.default_year)
        .or_else(|| dashboard.default_year())
}

fn show_year<W: Write>(
    dashboard: &FinanceDashboard,
    year: i32,
    format: OutputFormat,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let view = dashboard.select_year(year)?;
    match format {
        OutputFormat::Table => {
            writeln!(
                out,
                "{}",
                render::render_dashboard(&view, &settings.currency, settings.bar_width)
            )?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        }
    }
    Ok(())
}

/// Year-selection loop: every entered year recomputes and redraws the dashboard.
/// A blank line, `q`, or end of input leaves the loop. A year with no
/// transactions is reported and the prompt comes back.
fn run_selector<R: BufRead, W: Write>(
    dashboard: &FinanceDashboard,
    format: OutputFormat,
    settings: &Settings,
    input: R,
    out: &mut W,
) -> Result<()> {
    let years: Vec<String> = dashboard
        .available_years()
        .iter()
        .map(|y| y.to_string())
        .collect();
    let mut lines = input.lines();

    loop {
        write!(out, "Select Year [{}] (q to quit): ", years.join(", "))?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() || entry.eq_ignore_ascii_case("q") {
            break;
        }

        let year: i32 = match entry.parse() {
            Ok(year) => year,
            Err(_) => {
                warn!("'{entry}' is not a year");
                continue;
            }
        };
        info!("Year selected: {year}");
        if let Err(err) = show_year(dashboard, year, format, settings, out) {
            writeln!(out, "{err}")?;
        }
    }
    Ok(())
}
