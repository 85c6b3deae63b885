use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{read_check_rows, read_menu_export, read_order_rows, read_time_entries};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn parses_order_rows_with_typed_fields() {
    let orders = read_order_rows(&fixture("OrderDetails.csv")).expect("orders fixture");
    assert_eq!(orders.rows.len(), 2);
    assert_eq!(orders.failures.len(), 1);
    assert_eq!(orders.total(), 3);

    let first = &orders.rows[0];
    assert_eq!(first.order_id, 100);
    assert_eq!(first.order_number, 45);
    assert_eq!(first.location, "Main St");
    assert_eq!(first.server.as_deref(), Some("Jane Doe"));
    assert_eq!(first.checks.as_deref(), Some("5,6"));
    assert_eq!(
        first.opened_at,
        NaiveDate::from_ymd_opt(2024, 4, 10)
            .unwrap()
            .and_hms_opt(17, 12, 0)
            .unwrap()
    );
    assert_eq!(first.total, Some(Decimal::new(6886, 2)));
    assert_eq!(first.guest_count, Some(2));
    assert_eq!(first.tab_names, None);
    assert!(!first.is_voided);
    assert_eq!(first.duration.as_deref(), Some("0:49:23"));

    let second = &orders.rows[1];
    assert_eq!(second.server.as_deref(), Some("John James Smith"));
    assert_eq!(second.tip, None);
    assert_eq!(second.discount_amount, Some(Decimal::new(500, 2)));
}

#[test]
fn order_row_failures_carry_line_numbers() {
    let orders = read_order_rows(&fixture("OrderDetails.csv")).expect("orders fixture");
    let failure = &orders.failures[0];
    assert_eq!(failure.line, 4);
    assert!(!failure.message.is_empty());
}

#[test]
fn parses_check_rows() {
    let checks = read_check_rows(&fixture("CheckDetails.csv")).expect("checks fixture");
    assert_eq!(checks.rows.len(), 3);
    assert!(checks.failures.is_empty());

    let anonymous = &checks.rows[0];
    assert_eq!(anonymous.check_id, 9000001);
    assert_eq!(anonymous.check_number, 5);
    assert_eq!(anonymous.customer_id, None);
    assert_eq!(anonymous.customer_name, None);
    assert_eq!(
        anonymous.opened_date,
        NaiveDate::from_ymd_opt(2024, 4, 10)
    );
    assert_eq!(
        anonymous.opened_time,
        NaiveTime::from_hms_opt(17, 12, 0)
    );
    assert_eq!(anonymous.total, Some(Decimal::new(3443, 2)));

    let named = &checks.rows[1];
    assert_eq!(named.customer_id, Some(12345));
    assert_eq!(named.customer_name.as_deref(), Some("Pat Muller"));
    assert_eq!(named.tender.as_deref(), Some("Cash"));
}

#[test]
fn parses_time_entries() {
    let entries = read_time_entries(&fixture("TimeEntries.csv")).expect("time entries fixture");
    assert_eq!(entries.rows.len(), 2);
    assert!(entries.failures.is_empty());

    let server = &entries.rows[0];
    assert_eq!(server.location, "Main St");
    assert_eq!(server.employee_id, 4286);
    assert_eq!(
        server.employee_guid,
        Uuid::parse_str("189b038f-c0ab-4750-bf7d-f41f525b3620").unwrap()
    );
    assert_eq!(server.employee_external_id.as_deref(), Some("EMP-4286"));
    assert_eq!(server.employee_name, "Doe, Jane");
    assert_eq!(server.job_id, 900000004018475556);
    assert_eq!(server.job_title, "Server");
    assert_eq!(
        server.in_date,
        NaiveDate::from_ymd_opt(2024, 4, 10)
            .unwrap()
            .and_hms_opt(15, 57, 0)
            .unwrap()
    );
    assert!(!server.auto_clock_out);
    assert_eq!(server.total_hours, Decimal::new(507, 2));
    assert_eq!(server.wage, Decimal::new(1400, 2));

    let cook = &entries.rows[1];
    assert_eq!(cook.employee_external_id, None);
    assert_eq!(cook.employee_name, "Marco Cook");
    assert!(cook.auto_clock_out);
    assert_eq!(cook.overtime_pay, Some(Decimal::new(1350, 2)));
}

#[test]
fn parses_menu_export() {
    let menus = read_menu_export(&fixture("MenuExport_sample.json")).expect("menu fixture");
    assert_eq!(menus.len(), 2);

    let drinks = &menus[0];
    assert_eq!(
        drinks.guid,
        Uuid::parse_str("adddeea2-4ff3-46e6-840b-5b8fa9fad1db").unwrap()
    );
    assert_eq!(drinks.name, "Soft Drinks");
    assert!(drinks.orderable_online);
    assert!(drinks.available_all_times);
    assert_eq!(drinks.days_available_bits, Some(127));
    assert_eq!(
        drinks.days_available_string.as_ref().map(Vec::len),
        Some(7)
    );
    assert_eq!(drinks.start_time, None);

    let dinner = &menus[1];
    assert_eq!(dinner.start_time, Some(61_200_000));
    assert_eq!(dinner.start_time_hhmm.as_deref(), Some("17:00"));
    assert_eq!(dinner.visibility.as_deref(), Some("POS_ONLY"));
    assert!(!dinner.available_all_days);
}

#[test]
fn menu_export_rejects_malformed_json() {
    let missing = fixture("OrderDetails.csv");
    assert!(read_menu_export(&missing).is_err());
}
