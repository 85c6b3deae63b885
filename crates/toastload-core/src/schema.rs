use tracing::{debug, info};

use crate::db::DbPool;
use crate::error::Result;

const CREATE_TABLES: &[(&str, &str)] = &[
    (
        "menus",
        r#"
        CREATE TABLE IF NOT EXISTS menus (
            guid UUID PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            description TEXT DEFAULT '',
            id_string VARCHAR(50) NOT NULL,
            orderable_online BOOLEAN NOT NULL DEFAULT TRUE,
            orderable_online_status VARCHAR(10) DEFAULT 'YES',
            visibility VARCHAR(10) DEFAULT 'ALL',
            start_time BIGINT DEFAULT NULL,
            end_time BIGINT DEFAULT NULL,
            start_time_hhmm VARCHAR(5) DEFAULT NULL,
            end_time_hhmm VARCHAR(5) DEFAULT NULL,
            start_time_local_standard_time BIGINT DEFAULT NULL,
            end_time_local_standard_time BIGINT DEFAULT NULL,
            start_time_hhmm_local_standard_time VARCHAR(5) DEFAULT NULL,
            end_time_hhmm_local_standard_time VARCHAR(5) DEFAULT NULL,
            available_all_times BOOLEAN NOT NULL DEFAULT TRUE,
            available_all_days BOOLEAN NOT NULL DEFAULT TRUE,
            days_available_bits SMALLINT DEFAULT 127,
            days_available_string TEXT[] DEFAULT NULL
        )
        "#,
    ),
    (
        "locations",
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id SERIAL PRIMARY KEY,
            location VARCHAR(255) UNIQUE NOT NULL
        )
        "#,
    ),
    (
        "jobs",
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id SERIAL PRIMARY KEY,
            job_id BIGINT UNIQUE NOT NULL,
            job_guid UUID UNIQUE NOT NULL,
            job_code VARCHAR(50),
            job_title VARCHAR(255) NOT NULL
        )
        "#,
    ),
    // employee_id and employee_guid are nullable: the orders export only
    // carries a display name, and rows created from it are claimed and
    // backfilled by the time-entry loader later.
    (
        "employees",
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id SERIAL PRIMARY KEY,
            employee_id BIGINT UNIQUE,
            employee_guid UUID UNIQUE,
            employee_external_id VARCHAR(50),
            employee_name VARCHAR(255) UNIQUE NOT NULL
        )
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id SERIAL PRIMARY KEY,
            order_id BIGINT UNIQUE NOT NULL,
            order_number BIGINT,
            location_id INT NOT NULL,
            server_id INT NOT NULL,
            opened_at TIMESTAMP NOT NULL,
            closed_at TIMESTAMP,
            paid_at TIMESTAMP,
            guest_count INT,
            tab_names TEXT,
            table_number VARCHAR(50),
            revenue_center VARCHAR(100),
            dining_area VARCHAR(100),
            service_period VARCHAR(100),
            dining_option VARCHAR(100),
            discount_amount NUMERIC(10, 2),
            subtotal NUMERIC(10, 2),
            tax NUMERIC(10, 2),
            tip NUMERIC(10, 2),
            gratuity NUMERIC(10, 2),
            total NUMERIC(10, 2),
            is_voided BOOLEAN NOT NULL DEFAULT FALSE,
            duration_minutes INT,
            order_source VARCHAR(100),
            CONSTRAINT fk_order_location FOREIGN KEY (location_id) REFERENCES locations (id),
            CONSTRAINT fk_order_server FOREIGN KEY (server_id) REFERENCES employees (id)
        )
        "#,
    ),
    (
        "checks",
        r#"
        CREATE TABLE IF NOT EXISTS checks (
            id SERIAL PRIMARY KEY,
            order_id INT NOT NULL,
            check_id BIGINT UNIQUE NOT NULL,
            check_number BIGINT NOT NULL,
            customer_id BIGINT,
            customer_name VARCHAR(255),
            customer_phone VARCHAR(50),
            customer_email VARCHAR(255),
            customer_family VARCHAR(255),
            location_code VARCHAR(50),
            opened_date DATE,
            opened_time TIME,
            item_description TEXT,
            table_size INT,
            discount NUMERIC(10, 2),
            discount_reason TEXT,
            tax NUMERIC(10, 2),
            tender VARCHAR(50),
            total NUMERIC(10, 2),
            receipt_link TEXT,
            CONSTRAINT fk_check_order FOREIGN KEY (order_id) REFERENCES orders (id) ON DELETE CASCADE,
            CONSTRAINT uq_check_per_order UNIQUE (order_id, check_number)
        )
        "#,
    ),
    (
        "time_entries",
        r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id SERIAL PRIMARY KEY,
            location_id INT NOT NULL,
            employee_id INT NOT NULL,
            job_id INT NOT NULL,
            in_date TIMESTAMP NOT NULL,
            out_date TIMESTAMP NOT NULL,
            auto_clock_out BOOLEAN NOT NULL,
            total_hours NUMERIC(5, 2) NOT NULL,
            unpaid_break_time NUMERIC(5, 2),
            paid_break_time NUMERIC(5, 2),
            payable_hours NUMERIC(5, 2) NOT NULL,
            cash_tips_declared NUMERIC(10, 2),
            non_cash_tips NUMERIC(10, 2),
            total_gratuity NUMERIC(10, 2),
            total_tips NUMERIC(10, 2),
            tips_withheld NUMERIC(10, 2),
            wage NUMERIC(10, 2) NOT NULL,
            regular_hours NUMERIC(5, 2),
            overtime_hours NUMERIC(5, 2),
            regular_pay NUMERIC(10, 2),
            overtime_pay NUMERIC(10, 2),
            total_pay NUMERIC(10, 2) NOT NULL,
            CONSTRAINT fk_entry_location FOREIGN KEY (location_id) REFERENCES locations (id) ON DELETE CASCADE,
            CONSTRAINT fk_entry_employee FOREIGN KEY (employee_id) REFERENCES employees (id) ON DELETE CASCADE,
            CONSTRAINT fk_entry_job FOREIGN KEY (job_id) REFERENCES jobs (id) ON DELETE CASCADE,
            CONSTRAINT uq_entry_per_shift UNIQUE (employee_id, in_date)
        )
        "#,
    ),
];

/// Tables in drop order: facts before the dimensions they reference.
const DROP_ORDER: &[&str] = &[
    "checks",
    "orders",
    "time_entries",
    "jobs",
    "employees",
    "locations",
    "menus",
];

/// Create any missing tables. Safe to run at the start of every load.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    for (table, ddl) in CREATE_TABLES {
        sqlx::query(ddl).execute(pool).await?;
        debug!(table, "Ensured table exists");
    }
    Ok(())
}

/// Drop every managed table. Schema management only; the loaders never
/// delete rows.
pub async fn drop_tables(pool: &DbPool) -> Result<()> {
    for table in DROP_ORDER {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table} CASCADE"))
            .execute(pool)
            .await?;
        info!(table, "Dropped table");
    }
    Ok(())
}

pub fn managed_tables() -> &'static [&'static str] {
    DROP_ORDER
}
