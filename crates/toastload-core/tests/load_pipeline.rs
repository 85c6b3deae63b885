use std::env;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use toastload_core::loaders::{menus, orders, time_entries};
use toastload_core::resolver;
use toastload_core::{db, schema};
use toastload_parser::{CheckRow, MenuRecord, OrderRow, RowSet, TimeEntryRow};

fn ts(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 10)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn rowset<T>(rows: Vec<T>) -> RowSet<T> {
    RowSet {
        rows,
        failures: Vec::new(),
    }
}

fn order_row(
    order_id: i64,
    location: &str,
    server: Option<&str>,
    checks: Option<&str>,
) -> OrderRow {
    OrderRow {
        order_id,
        order_number: order_id,
        location: location.to_string(),
        server: server.map(str::to_string),
        opened_at: ts(17, 12),
        closed_at: Some(ts(18, 5)),
        paid_at: Some(ts(18, 1)),
        guest_count: Some(2),
        tab_names: None,
        table_number: Some("12".to_string()),
        revenue_center: Some("Restaurant".to_string()),
        dining_area: Some("Dining Room".to_string()),
        service_period: Some("Dinner".to_string()),
        dining_option: Some("Dine In".to_string()),
        discount_amount: Some(Decimal::ZERO),
        subtotal: Some(Decimal::new(5450, 2)),
        tax: Some(Decimal::new(436, 2)),
        tip: Some(Decimal::new(1000, 2)),
        gratuity: Some(Decimal::ZERO),
        total: Some(Decimal::new(6886, 2)),
        is_voided: false,
        duration: Some("0:49:23".to_string()),
        checks: checks.map(str::to_string),
        order_source: Some("In Store".to_string()),
    }
}

fn check_row(check_id: i64, check_number: i64) -> CheckRow {
    CheckRow {
        check_id,
        check_number,
        customer_id: None,
        customer_name: None,
        customer_phone: None,
        customer_email: None,
        customer_family: None,
        location_code: Some("MAIN".to_string()),
        opened_date: NaiveDate::from_ymd_opt(2024, 4, 10),
        opened_time: None,
        item_description: Some("Burger; Fries".to_string()),
        table_size: Some(2),
        discount: Some(Decimal::ZERO),
        discount_reason: None,
        tax: Some(Decimal::new(218, 2)),
        tender: Some("Credit".to_string()),
        total: Some(Decimal::new(3443, 2)),
        receipt_link: None,
    }
}

fn time_entry_row(employee_id: i64, employee_name: &str) -> TimeEntryRow {
    TimeEntryRow {
        location: "Main St".to_string(),
        location_code: Some("MAIN".to_string()),
        entry_id: 700001,
        entry_guid: Uuid::parse_str("0b0f4f0e-6f1b-4f3c-9b5a-1d2e3f4a5b6c").unwrap(),
        employee_id,
        employee_guid: Uuid::parse_str("189b038f-c0ab-4750-bf7d-f41f525b3620").unwrap(),
        employee_external_id: Some("EMP-4286".to_string()),
        employee_name: employee_name.to_string(),
        job_id: 900000004018475556,
        job_guid: Uuid::parse_str("b8f86cb1-dac3-404d-9829-dbbd57878b17").unwrap(),
        job_code: Some("SRV".to_string()),
        job_title: "Server".to_string(),
        in_date: ts(15, 57),
        out_date: ts(21, 1),
        auto_clock_out: false,
        total_hours: Decimal::new(507, 2),
        unpaid_break_time: Some(Decimal::ZERO),
        paid_break_time: Some(Decimal::ZERO),
        payable_hours: Decimal::new(507, 2),
        cash_tips_declared: Some(Decimal::new(2500, 2)),
        non_cash_tips: Some(Decimal::new(7500, 2)),
        total_gratuity: Some(Decimal::ZERO),
        total_tips: Some(Decimal::new(10000, 2)),
        tips_withheld: Some(Decimal::ZERO),
        wage: Decimal::new(1400, 2),
        regular_hours: Some(Decimal::new(507, 2)),
        overtime_hours: Some(Decimal::ZERO),
        regular_pay: Some(Decimal::new(7098, 2)),
        overtime_pay: Some(Decimal::ZERO),
        total_pay: Decimal::new(7098, 2),
    }
}

fn menu_record() -> MenuRecord {
    MenuRecord {
        guid: Uuid::parse_str("adddeea2-4ff3-46e6-840b-5b8fa9fad1db").unwrap(),
        name: "Soft Drinks".to_string(),
        description: Some(String::new()),
        id_string: "400000000123".to_string(),
        orderable_online: true,
        orderable_online_status: Some("YES".to_string()),
        visibility: Some("ALL".to_string()),
        start_time: None,
        end_time: None,
        start_time_hhmm: None,
        end_time_hhmm: None,
        start_time_local_standard_time: None,
        end_time_local_standard_time: None,
        start_time_hhmm_local_standard_time: None,
        end_time_hhmm_local_standard_time: None,
        available_all_times: true,
        available_all_days: true,
        days_available_bits: Some(127),
        days_available_string: Some(vec!["Mon".to_string(), "Tue".to_string()]),
    }
}

#[tokio::test]
async fn load_pipeline_is_idempotent_when_database_available() -> Result<()> {
    let database_url = match env::var("TOASTLOAD_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping load pipeline test because TOASTLOAD_TEST_DATABASE_URL is not set"
            );
            return Ok(());
        }
    };

    let pool = db::connect_url(&database_url).await?;
    schema::drop_tables(&pool).await?;
    schema::ensure_schema(&pool).await?;

    // Dimension get-or-create returns a stable id and creates exactly one row.
    let first = resolver::resolve_location(&pool, "Main St").await?;
    let second = resolver::resolve_location(&pool, "Main St").await?;
    assert_eq!(first, second);
    let location_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(location_count, 1);

    let order_rows = rowset(vec![order_row(
        100,
        "Main St",
        Some("Jane Doe"),
        Some("5,6"),
    )]);
    let check_rows = rowset(vec![check_row(9000001, 5), check_row(9000002, 6)]);

    let outcome = orders::load_orders(&pool, &order_rows, &check_rows).await;
    assert_eq!(outcome.orders.inserted, 1);
    assert_eq!(outcome.orders.errors, 0);
    assert_eq!(outcome.checks.inserted, 2);

    let employee_name: String = sqlx::query_scalar("SELECT employee_name FROM employees")
        .fetch_one(&pool)
        .await?;
    assert_eq!(employee_name, "Doe, Jane");

    let location_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(location_count, 1, "order load must reuse the existing location");

    let linked_checks: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM checks c JOIN orders o ON c.order_id = o.id WHERE o.order_id = 100",
    )
    .fetch_one(&pool)
    .await?;
    assert_eq!(linked_checks, 2);

    // Re-running the same load inserts nothing and reports the duplicates.
    let rerun = orders::load_orders(&pool, &order_rows, &check_rows).await;
    assert_eq!(rerun.orders.inserted, 0);
    assert_eq!(rerun.orders.skipped, 1);
    assert_eq!(rerun.checks.inserted, 0);
    assert_eq!(rerun.checks.skipped, 2);

    // An order without a resolvable server is skipped, never raised.
    let nameless = rowset(vec![order_row(101, "Main St", None, Some("7"))]);
    let skipped = orders::load_orders(&pool, &nameless, &rowset(Vec::new())).await;
    assert_eq!(skipped.orders.inserted, 0);
    assert_eq!(skipped.orders.skipped, 1);
    assert_eq!(skipped.orders.errors, 0);
    let unresolved_orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE order_id = 101")
            .fetch_one(&pool)
            .await?;
    assert_eq!(unresolved_orders, 0);

    // The time-clock path claims the name-only employee row and backfills
    // its numeric identity instead of creating a second row.
    let entries = rowset(vec![time_entry_row(4286, "Doe, Jane")]);
    let entry_summary = time_entries::load_time_entries(&pool, &entries).await;
    assert_eq!(entry_summary.inserted, 1);
    assert_eq!(entry_summary.errors, 0);

    let employee_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(&pool)
        .await?;
    assert_eq!(employee_count, 1);
    let backfilled: Option<i64> =
        sqlx::query_scalar("SELECT employee_id FROM employees WHERE employee_name = 'Doe, Jane'")
            .fetch_one(&pool)
            .await?;
    assert_eq!(backfilled, Some(4286));

    let entry_rerun = time_entries::load_time_entries(&pool, &entries).await;
    assert_eq!(entry_rerun.inserted, 0);
    assert_eq!(entry_rerun.skipped, 1);

    // Menus insert once; the second pass is all conflict-skips.
    let menu = menu_record();
    let menu_summary = menus::load_menus(&pool, std::slice::from_ref(&menu)).await;
    assert_eq!(menu_summary.inserted, 1);
    let menu_rerun = menus::load_menus(&pool, std::slice::from_ref(&menu)).await;
    assert_eq!(menu_rerun.inserted, 0);
    assert_eq!(menu_rerun.skipped, 1);

    Ok(())
}
