use tracing::{debug, error, warn};

use toastload_parser::{RowSet, TimeEntryRow};

use crate::db::DbPool;
use crate::error::{PipelineError, Result};
use crate::report::LoadSummary;
use crate::resolver::{self, EmployeeIdentity};

const INSERT_TIME_ENTRY: &str = r#"
    INSERT INTO time_entries (
        location_id, employee_id, job_id, in_date, out_date, auto_clock_out,
        total_hours, unpaid_break_time, paid_break_time, payable_hours,
        cash_tips_declared, non_cash_tips, total_gratuity, total_tips,
        tips_withheld, wage, regular_hours, overtime_hours, regular_pay,
        overtime_pay, total_pay
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
        $12, $13, $14, $15, $16, $17, $18, $19, $20, $21
    )
    ON CONFLICT (employee_id, in_date) DO NOTHING
"#;

enum EntryOutcome {
    Inserted,
    Duplicate,
    Unresolved,
}

/// Load time-clock entries, resolving the location, employee and job for
/// every row. The natural key is (employee, clock-in time).
pub async fn load_time_entries(pool: &DbPool, entries: &RowSet<TimeEntryRow>) -> LoadSummary {
    let mut summary = LoadSummary::default();

    for failure in &entries.failures {
        error!(line = failure.line, "Unreadable time entry row: {}", failure.message);
        summary.errors += 1;
    }

    for row in &entries.rows {
        match load_entry(pool, row).await {
            Ok(EntryOutcome::Inserted) => summary.inserted += 1,
            Ok(EntryOutcome::Duplicate) | Ok(EntryOutcome::Unresolved) => summary.skipped += 1,
            Err(err) => {
                error!(
                    employee = %row.employee_name,
                    in_date = %row.in_date,
                    "Failed to load time entry: {err}"
                );
                summary.errors += 1;
            }
        }
    }

    summary
}

async fn load_entry(pool: &DbPool, row: &TimeEntryRow) -> Result<EntryOutcome> {
    let location_id = match resolver::resolve_location(pool, &row.location).await {
        Ok(id) => id,
        Err(PipelineError::Resolution(reason)) => {
            warn!(employee = %row.employee_name, "Skipping time entry: {reason}");
            return Ok(EntryOutcome::Unresolved);
        }
        Err(err) => return Err(err),
    };

    let identity = EmployeeIdentity {
        employee_id: row.employee_id,
        guid: row.employee_guid,
        external_id: row.employee_external_id.as_deref(),
        name: &row.employee_name,
    };
    let employee_id = match resolver::resolve_employee(pool, &identity).await {
        Ok(id) => id,
        Err(PipelineError::Resolution(reason)) => {
            warn!(employee = %row.employee_name, "Skipping time entry: {reason}");
            return Ok(EntryOutcome::Unresolved);
        }
        Err(err) => return Err(err),
    };

    let job_id = match resolver::resolve_job(
        pool,
        row.job_id,
        row.job_guid,
        row.job_code.as_deref(),
        &row.job_title,
    )
    .await
    {
        Ok(id) => id,
        Err(PipelineError::Resolution(reason)) => {
            warn!(employee = %row.employee_name, "Skipping time entry: {reason}");
            return Ok(EntryOutcome::Unresolved);
        }
        Err(err) => return Err(err),
    };

    let result = sqlx::query(INSERT_TIME_ENTRY)
        .bind(location_id)
        .bind(employee_id)
        .bind(job_id)
        .bind(row.in_date)
        .bind(row.out_date)
        .bind(row.auto_clock_out)
        .bind(row.total_hours)
        .bind(row.unpaid_break_time)
        .bind(row.paid_break_time)
        .bind(row.payable_hours)
        .bind(row.cash_tips_declared)
        .bind(row.non_cash_tips)
        .bind(row.total_gratuity)
        .bind(row.total_tips)
        .bind(row.tips_withheld)
        .bind(row.wage)
        .bind(row.regular_hours)
        .bind(row.overtime_hours)
        .bind(row.regular_pay)
        .bind(row.overtime_pay)
        .bind(row.total_pay)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        debug!(employee = %row.employee_name, in_date = %row.in_date, "Inserted time entry");
        Ok(EntryOutcome::Inserted)
    } else {
        debug!(employee = %row.employee_name, in_date = %row.in_date, "Time entry already loaded");
        Ok(EntryOutcome::Duplicate)
    }
}
