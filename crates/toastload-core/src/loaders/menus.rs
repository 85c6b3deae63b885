use tracing::{debug, error};

use toastload_parser::MenuRecord;

use crate::db::DbPool;
use crate::error::Result;
use crate::report::LoadSummary;

const INSERT_MENU: &str = r#"
    INSERT INTO menus (
        guid,
        name,
        description,
        id_string,
        orderable_online,
        orderable_online_status,
        visibility,
        start_time,
        end_time,
        start_time_hhmm,
        end_time_hhmm,
        start_time_local_standard_time,
        end_time_local_standard_time,
        start_time_hhmm_local_standard_time,
        end_time_hhmm_local_standard_time,
        available_all_times,
        available_all_days,
        days_available_bits,
        days_available_string
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
        $11, $12, $13, $14, $15, $16, $17, $18, $19
    )
    ON CONFLICT (guid) DO NOTHING
"#;

/// Load menu records. Menus have no dimension references; the guid is the
/// natural key and an existing menu is never updated.
pub async fn load_menus(pool: &DbPool, menus: &[MenuRecord]) -> LoadSummary {
    let mut summary = LoadSummary::default();

    for menu in menus {
        match insert_menu(pool, menu).await {
            Ok(true) => {
                debug!(menu = %menu.name, "Inserted menu");
                summary.inserted += 1;
            }
            Ok(false) => {
                debug!(guid = %menu.guid, menu = %menu.name, "Menu already loaded");
                summary.skipped += 1;
            }
            Err(err) => {
                error!(guid = %menu.guid, menu = %menu.name, "Failed to insert menu: {err}");
                summary.errors += 1;
            }
        }
    }

    summary
}

async fn insert_menu(pool: &DbPool, menu: &MenuRecord) -> Result<bool> {
    let result = sqlx::query(INSERT_MENU)
        .bind(menu.guid)
        .bind(&menu.name)
        .bind(&menu.description)
        .bind(&menu.id_string)
        .bind(menu.orderable_online)
        .bind(&menu.orderable_online_status)
        .bind(&menu.visibility)
        .bind(menu.start_time)
        .bind(menu.end_time)
        .bind(&menu.start_time_hhmm)
        .bind(&menu.end_time_hhmm)
        .bind(menu.start_time_local_standard_time)
        .bind(menu.end_time_local_standard_time)
        .bind(&menu.start_time_hhmm_local_standard_time)
        .bind(&menu.end_time_hhmm_local_standard_time)
        .bind(menu.available_all_times)
        .bind(menu.available_all_days)
        .bind(menu.days_available_bits)
        .bind(&menu.days_available_string)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
