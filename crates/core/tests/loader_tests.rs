// ═══════════════════════════════════════════════════════════════════
// Loader Tests — CSV parsing, date formats, fatal and tolerated errors
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, Timelike};
use std::io::Write;
use tempfile::NamedTempFile;

use finance_dashboard_core::errors::CoreError;
use finance_dashboard_core::models::settings::Settings;
use finance_dashboard_core::models::transaction::Kind;
use finance_dashboard_core::services::loader::{LedgerLoader, REQUIRED_COLUMNS};

const HEADER: &str = "Date,Income/Expense,Category,Amount";

fn write_temp_csv(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
    write!(tmp, "{}", contents).expect("Failed to write test CSV");
    tmp
}

fn load_str(contents: &str) -> Result<finance_dashboard_core::models::ledger::Ledger, CoreError> {
    LedgerLoader::default().load_from_reader(contents.as_bytes())
}

// ═══════════════════════════════════════════════════════════════════
// Happy path
// ═══════════════════════════════════════════════════════════════════

mod happy_path {
    use super::*;

    #[test]
    fn loads_rows_in_file_order() {
        let csv = format!(
            "{HEADER}\n\
             2023-01-15,Income,Salary,1000\n\
             2023-02-10,Expense,Rent,400\n\
             2023-02-20,Expense,Food,100\n"
        );
        let ledger = load_str(&csv).unwrap();
        assert_eq!(ledger.len(), 3);

        let first = &ledger.transactions[0];
        assert_eq!(first.kind(), &Kind::Income);
        assert_eq!(first.category(), Some("Salary"));
        assert_eq!(first.amount(), 1000.0);
        assert_eq!(first.year(), 2023);
        assert_eq!(first.month(), 1);
        assert_eq!(first.month_name(), "Jan");

        assert_eq!(ledger.transactions[2].category(), Some("Food"));
        assert_eq!(ledger.transactions[2].month_name(), "Feb");
    }

    #[test]
    fn load_from_file_records_source() {
        let tmp = write_temp_csv(&format!("{HEADER}\n2022-03-01,Income,Salary,10\n"));
        let ledger = LedgerLoader::default().load(tmp.path()).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.source.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn extra_columns_in_any_order() {
        let csv = "Account,Amount,Currency,Category,Date,Note,Income/Expense\n\
                   Card,12.5,USD,Food,2022-05-05,lunch,Expense\n";
        let ledger = load_str(csv).unwrap();
        let t = &ledger.transactions[0];
        assert_eq!(t.amount(), 12.5);
        assert_eq!(t.category(), Some("Food"));
        assert_eq!(t.kind(), &Kind::Expense);
        assert_eq!(t.year(), 2022);
    }

    #[test]
    fn header_only_file_is_empty_ledger() {
        let ledger = load_str(&format!("{HEADER}\n")).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn amount_with_surrounding_spaces() {
        let ledger = load_str(&format!("{HEADER}\n2022-01-01,Income,Salary, 42.25 \n")).unwrap();
        assert_eq!(ledger.transactions[0].amount(), 42.25);
    }

    #[test]
    fn negative_amount_loads() {
        let ledger = load_str(&format!("{HEADER}\n2022-01-01,Expense,Refund,-15\n")).unwrap();
        assert_eq!(ledger.transactions[0].amount(), -15.0);
    }

    #[test]
    fn blank_category_becomes_none() {
        let ledger = load_str(&format!("{HEADER}\n2022-01-01,Expense,,15\n")).unwrap();
        assert_eq!(ledger.transactions[0].category(), None);
    }

    #[test]
    fn blank_date_row_is_dropped() {
        let csv = format!(
            "{HEADER}\n\
             ,Income,Salary,100\n\
             1/4/2021 09:00,Income,Salary,200\n\
             \x20 ,Expense,Rent,50\n"
        );
        let ledger = load_str(&csv).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.undated_rows, 2);
        assert_eq!(ledger.transactions[0].year(), 2021);
        assert_eq!(ledger.transactions[0].amount(), 200.0);
    }

    #[test]
    fn blank_amount_counts_as_zero() {
        let csv = format!(
            "{HEADER}\n\
             2023-01-15,Income,Salary,\n\
             2023-01-20,Income,Salary,300\n"
        );
        let ledger = load_str(&csv).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions[0].amount(), 0.0);
        assert_eq!(ledger.transactions[0].category(), Some("Salary"));
        assert_eq!(ledger.transactions[1].amount(), 300.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Kinds
// ═══════════════════════════════════════════════════════════════════

mod kinds {
    use super::*;

    #[test]
    fn unknown_kind_is_not_an_error() {
        let csv = format!(
            "{HEADER}\n\
             2022-01-01,Transfer-Out,Allowance,500\n\
             2022-01-02,income,Salary,10\n"
        );
        let ledger = load_str(&csv).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.transactions[0].kind(),
            &Kind::Other("Transfer-Out".into())
        );
        assert_eq!(ledger.transactions[1].kind(), &Kind::Other("income".into()));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Date formats
// ═══════════════════════════════════════════════════════════════════

mod dates {
    use super::*;

    fn parse(raw: &str) -> Option<chrono::NaiveDateTime> {
        LedgerLoader::default().parse_date(raw)
    }

    #[test]
    fn iso_date_is_midnight() {
        let dt = parse("2023-01-15").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn iso_datetime() {
        let dt = parse("2023-01-15 08:30:15").unwrap();
        assert_eq!(dt.hour(), 8);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.second(), 15);
    }

    #[test]
    fn iso_datetime_with_t() {
        assert!(parse("2023-01-15T08:30:00").is_some());
    }

    #[test]
    fn us_date_with_time() {
        let dt = parse("3/2/2022 10:11").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2022, 3, 2).unwrap());
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn us_date_without_time() {
        let dt = parse("12/31/2021").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2021, 12, 31).unwrap());
    }

    #[test]
    fn rfc3339_fallback() {
        let dt = parse("2023-06-01T09:00:00+02:00").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("yesterday").is_none());
        assert!(parse("").is_none());
        assert!(parse("2023-13-01").is_none());
    }

    #[test]
    fn configured_formats_replace_defaults() {
        let settings = Settings {
            date_formats: vec!["%d/%m/%Y".into()],
            ..Settings::default()
        };
        let loader = LedgerLoader::new(&settings);
        let dt = loader.parse_date("03/02/2022").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2022, 2, 3).unwrap());
        assert!(loader.parse_date("2022-02-03").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Fatal errors
// ═══════════════════════════════════════════════════════════════════

mod failures {
    use super::*;

    #[test]
    fn missing_file() {
        let err = LedgerLoader::default()
            .load("definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, CoreError::Load(_)));
    }

    #[test]
    fn each_required_column_is_checked() {
        for missing in REQUIRED_COLUMNS {
            let header: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|c| *c != missing)
                .collect();
            let csv = format!("{}\n", header.join(","));
            match load_str(&csv) {
                Err(CoreError::MissingColumn(col)) => assert_eq!(col, missing),
                other => panic!("expected MissingColumn({missing}), got {other:?}"),
            }
        }
    }

    #[test]
    fn column_names_are_exact() {
        let csv = "date,Income/Expense,Category,Amount\n2022-01-01,Income,Salary,1\n";
        assert!(matches!(load_str(csv), Err(CoreError::MissingColumn(c)) if c == "Date"));
    }

    #[test]
    fn empty_input_is_missing_columns() {
        assert!(matches!(load_str(""), Err(CoreError::MissingColumn(_))));
    }

    #[test]
    fn bad_date_aborts_whole_load() {
        let csv = format!(
            "{HEADER}\n\
             2023-01-15,Income,Salary,1000\n\
             not-a-date,Expense,Rent,400\n\
             2023-02-20,Expense,Food,100\n"
        );
        match load_str(&csv) {
            Err(CoreError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("not-a-date"));
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_amount_aborts_load() {
        let csv = format!("{HEADER}\n2023-01-15,Income,Salary,lots\n");
        match load_str(&csv) {
            Err(CoreError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("lots"));
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn line_numbers_count_the_header() {
        let csv = format!("{HEADER}\n2023-01-15,Income,Salary,1\n2023-01-16,Income,Salary,x\n");
        assert!(matches!(load_str(&csv), Err(CoreError::Parse { line: 3, .. })));
    }

    #[test]
    fn whitespace_date_with_garbage_is_still_fatal() {
        let csv = format!("{HEADER}\n  soon  ,Income,Salary,1\n");
        assert!(matches!(load_str(&csv), Err(CoreError::Parse { line: 2, .. })));
    }

    #[test]
    fn uneven_row_aborts_load() {
        let csv = format!("{HEADER}\n2023-01-15,Income,Salary,1,extra\n");
        assert!(matches!(load_str(&csv), Err(CoreError::Parse { line: 2, .. })));
    }
}
