use std::collections::HashMap;

use tracing::{debug, error, warn};

use toastload_parser::{CheckRow, OrderRow, RowSet};

use crate::db::DbPool;
use crate::error::{PipelineError, Result};
use crate::report::LoadSummary;
use crate::resolver;

const INSERT_ORDER: &str = r#"
    INSERT INTO orders (
        location_id, order_id, order_number, opened_at, closed_at, paid_at,
        guest_count, tab_names, server_id, table_number, revenue_center,
        dining_area, service_period, dining_option, discount_amount,
        subtotal, tax, tip, gratuity, total, is_voided, duration_minutes,
        order_source
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
        $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23
    )
    ON CONFLICT (order_id) DO NOTHING
    RETURNING id
"#;

const INSERT_CHECK: &str = r#"
    INSERT INTO checks (
        order_id, check_id, check_number, customer_id, customer_name,
        customer_phone, customer_email, customer_family, location_code,
        opened_date, opened_time, item_description, table_size, discount,
        discount_reason, tax, tender, total, receipt_link
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
        $11, $12, $13, $14, $15, $16, $17, $18, $19
    )
    ON CONFLICT (order_id, check_number) DO NOTHING
"#;

#[derive(Debug, Default, Clone, Copy)]
pub struct OrdersOutcome {
    pub orders: LoadSummary,
    pub checks: LoadSummary,
}

/// Load orders and their checks. Each order and its matched checks form one
/// transaction; a failed order never aborts the batch or touches rows
/// committed for earlier orders.
pub async fn load_orders(
    pool: &DbPool,
    orders: &RowSet<OrderRow>,
    checks: &RowSet<CheckRow>,
) -> OrdersOutcome {
    let mut outcome = OrdersOutcome::default();

    for failure in &orders.failures {
        error!(line = failure.line, "Unreadable order row: {}", failure.message);
        outcome.orders.errors += 1;
    }
    for failure in &checks.failures {
        error!(line = failure.line, "Unreadable check row: {}", failure.message);
        outcome.checks.errors += 1;
    }

    let checks_by_number = index_checks(&checks.rows);

    for row in &orders.rows {
        match load_order(pool, row, &checks_by_number).await {
            Ok((orders_delta, checks_delta)) => {
                outcome.orders.absorb(orders_delta);
                outcome.checks.absorb(checks_delta);
            }
            Err(err) => {
                error!(order_id = row.order_id, "Failed to load order: {err}");
                outcome.orders.errors += 1;
            }
        }
    }

    outcome
}

fn index_checks(rows: &[CheckRow]) -> HashMap<i64, Vec<&CheckRow>> {
    let mut by_number: HashMap<i64, Vec<&CheckRow>> = HashMap::new();
    for row in rows {
        by_number.entry(row.check_number).or_default().push(row);
    }
    by_number
}

/// Load one order row and its checks, returning the (orders, checks) count
/// deltas. Counts are only reported after the transaction commits, so a
/// rolled-back row contributes nothing.
async fn load_order(
    pool: &DbPool,
    row: &OrderRow,
    checks_by_number: &HashMap<i64, Vec<&CheckRow>>,
) -> Result<(LoadSummary, LoadSummary)> {
    let mut orders = LoadSummary::default();
    let mut checks = LoadSummary::default();

    let location_id = match resolver::resolve_location(pool, &row.location).await {
        Ok(id) => id,
        Err(PipelineError::Resolution(reason)) => {
            warn!(order_id = row.order_id, "Skipping order: {reason}");
            orders.skipped += 1;
            return Ok((orders, checks));
        }
        Err(err) => return Err(err),
    };

    let server_id = match resolver::resolve_server(pool, row.server.as_deref().unwrap_or("")).await
    {
        Ok(id) => id,
        Err(PipelineError::Resolution(reason)) => {
            warn!(order_id = row.order_id, "Skipping order: {reason}");
            orders.skipped += 1;
            return Ok((orders, checks));
        }
        Err(err) => return Err(err),
    };

    let duration = row.duration.as_deref().and_then(duration_minutes);
    let matched = matched_checks(row, checks_by_number);

    let mut tx = pool.begin().await?;

    let order_pk: Option<i32> = sqlx::query_scalar(INSERT_ORDER)
        .bind(location_id)
        .bind(row.order_id)
        .bind(row.order_number)
        .bind(row.opened_at)
        .bind(row.closed_at)
        .bind(row.paid_at)
        .bind(row.guest_count)
        .bind(&row.tab_names)
        .bind(server_id)
        .bind(&row.table_number)
        .bind(&row.revenue_center)
        .bind(&row.dining_area)
        .bind(&row.service_period)
        .bind(&row.dining_option)
        .bind(row.discount_amount)
        .bind(row.subtotal)
        .bind(row.tax)
        .bind(row.tip)
        .bind(row.gratuity)
        .bind(row.total)
        .bind(row.is_voided)
        .bind(duration)
        .bind(&row.order_source)
        .fetch_optional(&mut *tx)
        .await?;

    match order_pk {
        Some(order_pk) => {
            debug!(order_id = row.order_id, order_pk, "Inserted order");
            orders.inserted += 1;

            for check in &matched {
                let result = sqlx::query(INSERT_CHECK)
                    .bind(order_pk)
                    .bind(check.check_id)
                    .bind(check.check_number)
                    .bind(check.customer_id)
                    .bind(&check.customer_name)
                    .bind(&check.customer_phone)
                    .bind(&check.customer_email)
                    .bind(&check.customer_family)
                    .bind(&check.location_code)
                    .bind(check.opened_date)
                    .bind(check.opened_time)
                    .bind(&check.item_description)
                    .bind(check.table_size)
                    .bind(check.discount)
                    .bind(&check.discount_reason)
                    .bind(check.tax)
                    .bind(&check.tender)
                    .bind(check.total)
                    .bind(&check.receipt_link)
                    .execute(&mut *tx)
                    .await?;

                if result.rows_affected() > 0 {
                    debug!(check_id = check.check_id, order_id = row.order_id, "Inserted check");
                    checks.inserted += 1;
                } else {
                    checks.skipped += 1;
                }
            }
        }
        None => {
            // The surrogate id of the already-loaded order is deliberately
            // not recovered; its checks are counted as skipped this run.
            debug!(order_id = row.order_id, "Order already loaded");
            orders.skipped += 1;
            checks.skipped += matched.len();
        }
    }

    tx.commit().await?;
    Ok((orders, checks))
}

fn matched_checks<'a>(
    row: &OrderRow,
    by_number: &HashMap<i64, Vec<&'a CheckRow>>,
) -> Vec<&'a CheckRow> {
    let Some(raw) = row.checks.as_deref().filter(|raw| !raw.trim().is_empty()) else {
        warn!(order_id = row.order_id, "No checks listed for order");
        return Vec::new();
    };

    let mut matched = Vec::new();
    for number in parse_check_numbers(raw) {
        match by_number.get(&number) {
            Some(rows) => matched.extend(rows.iter().copied()),
            None => warn!(
                order_id = row.order_id,
                check_number = number,
                "No check row matches the listed check number"
            ),
        }
    }
    matched
}

/// Parse the comma-separated `Checks` field into check numbers. Tokens that
/// are not numeric are logged and dropped.
pub fn parse_check_numbers(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<i64>() {
            Ok(number) => Some(number),
            Err(_) => {
                warn!(token, "Ignoring unparseable check number");
                None
            }
        })
        .collect()
}

/// Convert an `"H:MM:SS"` duration into whole minutes; seconds are
/// discarded. Returns `None` for anything that does not match the format.
pub fn duration_minutes(raw: &str) -> Option<i32> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return None;
    };

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    seconds.parse::<i32>().ok()?;

    Some(hours * 60 + minutes)
}
