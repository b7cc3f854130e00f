// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use rust_decimal::Decimal;
use spendboard::models::{Role, TxKind};
use spendboard::records::{load_csv, Snapshot};
use spendboard::{cli, commands};
use tempfile::NamedTempFile;

const SNAPSHOT: &str = r#"{
  "users": [
    {"id": 1, "username": "asha", "email": "asha@example.com", "role": "USER"},
    {"id": 2, "username": "root", "role": "admin"}
  ],
  "expenses": [
    {"id": 10, "userId": 1, "amount": 100.5, "category": "food", "date": "2025-08-01"},
    {"id": 11, "userId": 1, "amount": "20", "date": "2025-08-02", "description": "misc"}
  ],
  "incomes": [
    {"id": 20, "userId": 1, "amount": 5000, "source": "salary", "date": "2025-08-01"}
  ],
  "limits": [{"userId": 1, "monthlyLimit": 4000}],
  "monthlyExpense": {"2025-08": 120.5, "2025-07": 30},
  "monthlyExpenseUser": 1
}"#;

#[test]
fn snapshot_tags_record_kinds() {
    let snap = Snapshot::from_json(SNAPSHOT).unwrap();
    assert_eq!(snap.users[1].role, Role::Admin);
    assert!(snap.expenses.iter().all(|t| t.kind == TxKind::Expense));
    assert_eq!(snap.incomes[0].kind, TxKind::Income);
    assert_eq!(snap.incomes[0].category.as_deref(), Some("salary"));
    assert_eq!(snap.expenses[1].category, None);
    assert_eq!(snap.records().len(), 3);
    assert_eq!(snap.records_for(Some(2)).len(), 0);
}

#[test]
fn snapshot_limit_lookup_and_chart_order() {
    let snap = Snapshot::from_json(SNAPSHOT).unwrap();
    assert_eq!(snap.limit_for(1), Some(Decimal::from(4000)));
    assert_eq!(snap.limit_for(2), None);
    let months: Vec<String> = snap
        .monthly_source(Some(1))
        .iter()
        .map(|(m, _)| m.to_string())
        .collect();
    assert_eq!(months, vec!["2025-08", "2025-07"]);
}

#[test]
fn snapshot_without_chart_buckets_expenses() {
    let snap = Snapshot::from_json(
        r#"{"expenses": [
            {"id": 1, "userId": 1, "amount": 5, "date": "2025-02-01"},
            {"id": 2, "userId": 1, "amount": 7, "date": "2025-01-15"},
            {"id": 3, "userId": 2, "amount": 9, "date": "2025-01-15"}
        ]}"#,
    )
    .unwrap();
    let src = snap.monthly_source(Some(1));
    let got: Vec<(String, Decimal)> = src.iter().map(|(m, a)| (m.to_string(), a)).collect();
    assert_eq!(
        got,
        vec![
            ("2025-01".to_string(), Decimal::from(7)),
            ("2025-02".to_string(), Decimal::from(5)),
        ]
    );
}

#[test]
fn csv_records_load_with_kind() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "id,userId,amount,category,date,description\n1,3, 250.75 ,travel,2025-03-04,taxi\n2,3,10,,2025-03-05,"
    )
    .unwrap();
    file.flush().unwrap();

    let rows = load_csv(file.path(), TxKind::Expense).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].amount, Decimal::new(25075, 2));
    assert_eq!(rows[0].description.as_deref(), Some("taxi"));
    assert_eq!(rows[1].category, None);
    assert!(rows.iter().all(|r| r.kind == TxKind::Expense && r.user_id == 3));
}

#[test]
fn csv_rejects_bad_amount() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,userId,amount,category,date,description\n1,3,lots,food,2025-03-04,").unwrap();
    file.flush().unwrap();
    let err = load_csv(file.path(), TxKind::Expense).unwrap_err();
    assert!(format!("{:#}", err).contains("row 2"));
}

#[test]
fn report_args_load_snapshot_and_csv() {
    let mut snap = NamedTempFile::new().unwrap();
    write!(snap, "{}", SNAPSHOT).unwrap();
    snap.flush().unwrap();
    let mut csv = NamedTempFile::new().unwrap();
    writeln!(csv, "id,userId,amount,source,date,description\n30,1,100,bonus,2025-08-20,").unwrap();
    csv.flush().unwrap();

    let snap_path = format!("  {}  ", snap.path().to_str().unwrap());
    let csv_path = csv.path().to_str().unwrap().to_string();
    let matches = cli::build_cli().get_matches_from([
        "spendboard",
        "report",
        "summary",
        "--data",
        snap_path.as_str(),
        "--incomes-csv",
        csv_path.as_str(),
        "--user",
        "1",
    ]);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("report command not parsed");
    };
    let Some(("summary", sub)) = report_m.subcommand() else {
        panic!("summary subcommand not parsed");
    };
    assert_eq!(sub.get_one::<i64>("user"), Some(&1));
    let data = commands::load_data(sub).unwrap();
    assert_eq!(data.incomes.len(), 2);
    assert_eq!(data.incomes[1].kind, TxKind::Income);
}

#[test]
fn report_without_records_is_rejected() {
    let matches = cli::build_cli().get_matches_from(["spendboard", "report", "admin"]);
    let (_, report_m) = matches.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();
    assert!(commands::load_data(sub).is_err());
}

#[test]
fn chart_mapping_of_another_user_is_not_reused() {
    let snap = Snapshot::from_json(SNAPSHOT).unwrap();
    assert_eq!(snap.chart_user(None), Some(1));
    assert_eq!(snap.chart_user(Some(3)), Some(3));
    // User 3 has no expenses, so nothing is charted for them.
    assert!(snap.monthly_source(Some(3)).is_empty());

    let mut unowned = snap.clone();
    unowned.monthly_expense_user = None;
    assert_eq!(unowned.monthly_source(None).len(), 2);
    let own: Vec<(String, Decimal)> = unowned
        .monthly_source(Some(1))
        .iter()
        .map(|(m, a)| (m.to_string(), a))
        .collect();
    assert_eq!(own, vec![("2025-08".to_string(), Decimal::new(1205, 1))]);
}

#[test]
fn snapshot_with_untotalable_amounts_is_rejected() {
    let err = Snapshot::from_json(
        r#"{"expenses": [
            {"id": 1, "userId": 1, "amount": "50000000000000000000000000000", "date": "2025-01-01"},
            {"id": 2, "userId": 1, "amount": "50000000000000000000000000000", "date": "2025-01-02"}
        ]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("too large"));
}

#[test]
fn csv_extras_that_overflow_totals_are_rejected() {
    let mut snap = NamedTempFile::new().unwrap();
    write!(
        snap,
        r#"{{"expenses": [{{"id": 1, "userId": 1, "amount": "70000000000000000000000000000", "date": "2025-01-01"}}]}}"#
    )
    .unwrap();
    snap.flush().unwrap();
    let mut csv = NamedTempFile::new().unwrap();
    writeln!(
        csv,
        "id,userId,amount,category,date,description\n2,1,70000000000000000000000000000,food,2025-01-02,"
    )
    .unwrap();
    csv.flush().unwrap();

    let snap_path = snap.path().to_str().unwrap().to_string();
    let csv_path = csv.path().to_str().unwrap().to_string();
    let matches = cli::build_cli().get_matches_from([
        "spendboard",
        "report",
        "admin",
        "--data",
        snap_path.as_str(),
        "--expenses-csv",
        csv_path.as_str(),
    ]);
    let (_, report_m) = matches.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();
    assert!(commands::load_data(sub).is_err());
}

#[test]
fn first_limit_entry_wins() {
    let snap = Snapshot::from_json(
        r#"{"limits": [{"userId": 1, "monthlyLimit": 100}, {"userId": 1, "monthlyLimit": 900}]}"#,
    )
    .unwrap();
    assert_eq!(snap.limit_for(1), Some(Decimal::from(100)));
}
