use anyhow::{Context, Result};
use tracing::info;

use toastload_parser as parser;

use crate::config::ExportBundle;
use crate::db::DbPool;
use crate::loaders::{menus, orders, time_entries};
use crate::report::RunReport;
use crate::schema;

/// Execute one full load: ensure the schema, then run the menu,
/// order/check and time-entry loaders in sequence. Source files are read up
/// front so an unreadable export aborts the run before any rows are
/// touched; after that point every failure is recovered at row level.
pub async fn run(pool: &DbPool, exports: &ExportBundle) -> Result<RunReport> {
    schema::ensure_schema(pool)
        .await
        .context("schema creation failed")?;

    let menu_records = parser::read_menu_export(&exports.menus)
        .with_context(|| format!("failed to read {}", exports.menus.display()))?;
    let order_rows = parser::read_order_rows(&exports.orders)
        .with_context(|| format!("failed to read {}", exports.orders.display()))?;
    let check_rows = parser::read_check_rows(&exports.checks)
        .with_context(|| format!("failed to read {}", exports.checks.display()))?;
    let entry_rows = parser::read_time_entries(&exports.time_entries)
        .with_context(|| format!("failed to read {}", exports.time_entries.display()))?;

    info!(
        menus = menu_records.len(),
        orders = order_rows.total(),
        checks = check_rows.total(),
        time_entries = entry_rows.total(),
        "Exports read"
    );

    let menu_summary = menus::load_menus(pool, &menu_records).await;
    info!(
        inserted = menu_summary.inserted,
        skipped = menu_summary.skipped,
        errors = menu_summary.errors,
        "Menus loaded"
    );

    let orders_outcome = orders::load_orders(pool, &order_rows, &check_rows).await;
    info!(
        inserted = orders_outcome.orders.inserted,
        skipped = orders_outcome.orders.skipped,
        errors = orders_outcome.orders.errors,
        "Orders loaded"
    );
    info!(
        inserted = orders_outcome.checks.inserted,
        skipped = orders_outcome.checks.skipped,
        errors = orders_outcome.checks.errors,
        "Checks loaded"
    );

    let entries_summary = time_entries::load_time_entries(pool, &entry_rows).await;
    info!(
        inserted = entries_summary.inserted,
        skipped = entries_summary.skipped,
        errors = entries_summary.errors,
        "Time entries loaded"
    );

    Ok(RunReport {
        menus: menu_summary,
        orders: orders_outcome.orders,
        checks: orders_outcome.checks,
        time_entries: entries_summary,
    })
}
