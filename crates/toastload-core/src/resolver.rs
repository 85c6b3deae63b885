use tracing::debug;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{PipelineError, Result};
use crate::names::format_name;

/// Identity fields for an employee as they appear in the time-clock export.
#[derive(Debug, Clone)]
pub struct EmployeeIdentity<'a> {
    pub employee_id: i64,
    pub guid: Uuid,
    pub external_id: Option<&'a str>,
    pub name: &'a str,
}

/// Look up a location by exact name, creating it on first sighting.
/// Location text is never normalized.
pub async fn resolve_location(pool: &DbPool, name: &str) -> Result<i32> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PipelineError::Resolution("location name is empty".into()));
    }

    if let Some(id) = sqlx::query_scalar::<_, i32>("SELECT id FROM locations WHERE location = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }

    let inserted = sqlx::query_scalar::<_, i32>(
        "INSERT INTO locations (location) VALUES ($1) ON CONFLICT (location) DO NOTHING RETURNING id",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(id) => {
            debug!(location = name, id, "Created location");
            Ok(id)
        }
        // The insert conflicted, so the row exists; read it back.
        None => sqlx::query_scalar::<_, i32>("SELECT id FROM locations WHERE location = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                PipelineError::Resolution(format!("location '{name}' could not be created"))
            }),
    }
}

/// Look up a job by its external numeric id, creating the full record on
/// first sighting. Existing jobs are never updated.
pub async fn resolve_job(
    pool: &DbPool,
    job_id: i64,
    guid: Uuid,
    code: Option<&str>,
    title: &str,
) -> Result<i32> {
    if let Some(id) = sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE job_id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }

    let inserted = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO jobs (job_id, job_guid, job_code, job_title)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (job_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(job_id)
    .bind(guid)
    .bind(code)
    .bind(title)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(id) => {
            debug!(job_id, title, id, "Created job");
            Ok(id)
        }
        None => sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE job_id = $1")
            .bind(job_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                PipelineError::Resolution(format!("job {job_id} could not be created"))
            }),
    }
}

/// Resolve an employee from the full identity the time-clock export
/// carries. Lookup precedence is `employee_id`, then guid, then canonical
/// name: the numeric id is the authoritative key, and the canonical name is
/// a secondary key that lets order records (which only carry a display
/// name) reach the same row. A hit refreshes the stored identity fields
/// last-writer-wins, claiming name-only rows created by the orders path.
pub async fn resolve_employee(pool: &DbPool, identity: &EmployeeIdentity<'_>) -> Result<i32> {
    let canonical = format_name(identity.name);

    let mut found = sqlx::query_scalar::<_, i32>("SELECT id FROM employees WHERE employee_id = $1")
        .bind(identity.employee_id)
        .fetch_optional(pool)
        .await?;

    if found.is_none() {
        found = sqlx::query_scalar::<_, i32>("SELECT id FROM employees WHERE employee_guid = $1")
            .bind(identity.guid)
            .fetch_optional(pool)
            .await?;
    }

    if found.is_none() {
        if let Some(name) = canonical.as_deref() {
            found =
                sqlx::query_scalar::<_, i32>("SELECT id FROM employees WHERE employee_name = $1")
                    .bind(name)
                    .fetch_optional(pool)
                    .await?;
        }
    }

    if let Some(id) = found {
        sqlx::query(
            r#"
            UPDATE employees
            SET employee_id = $2,
                employee_guid = $3,
                employee_external_id = $4,
                employee_name = COALESCE($5, employee_name)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(identity.employee_id)
        .bind(identity.guid)
        .bind(identity.external_id)
        .bind(canonical.as_deref())
        .execute(pool)
        .await?;
        return Ok(id);
    }

    let Some(name) = canonical else {
        return Err(PipelineError::Resolution(format!(
            "employee {} has no usable name",
            identity.employee_id
        )));
    };

    let inserted = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO employees (employee_id, employee_guid, employee_external_id, employee_name)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (employee_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(identity.employee_id)
    .bind(identity.guid)
    .bind(identity.external_id)
    .bind(&name)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(id) => {
            debug!(employee = %name, id, "Created employee");
            Ok(id)
        }
        None => sqlx::query_scalar::<_, i32>("SELECT id FROM employees WHERE employee_id = $1")
            .bind(identity.employee_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                PipelineError::Resolution(format!(
                    "employee {} could not be created",
                    identity.employee_id
                ))
            }),
    }
}

/// Resolve the server an order names. Order records identify servers by
/// display name only, so resolution goes through the canonical name and
/// creates a name-only employee row when none exists; the time-clock loader
/// backfills the numeric identity later.
pub async fn resolve_server(pool: &DbPool, raw_name: &str) -> Result<i32> {
    let canonical = format_name(raw_name).ok_or_else(|| {
        PipelineError::Resolution(format!("unusable server name '{raw_name}'"))
    })?;

    if let Some(id) =
        sqlx::query_scalar::<_, i32>("SELECT id FROM employees WHERE employee_name = $1")
            .bind(&canonical)
            .fetch_optional(pool)
            .await?
    {
        return Ok(id);
    }

    let inserted = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO employees (employee_name)
        VALUES ($1)
        ON CONFLICT (employee_name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(&canonical)
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(id) => {
            debug!(employee = %canonical, id, "Created employee from server name");
            Ok(id)
        }
        None => sqlx::query_scalar::<_, i32>("SELECT id FROM employees WHERE employee_name = $1")
            .bind(&canonical)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                PipelineError::Resolution(format!("employee '{canonical}' could not be created"))
            }),
    }
}
