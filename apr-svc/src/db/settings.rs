//! Report setting queries

use apr_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};

use crate::models::Setting;

const SELECT_SETTINGS: &str = r#"
    SELECT id, section_name, description, display_order, active,
           created_by, creation_datetime, update_by, update_datetime
    FROM annual_program_report_setting
"#;

fn setting_from_row(row: &SqliteRow) -> Result<Setting> {
    Ok(Setting {
        id: Some(row.try_get("id")?),
        section_name: row.try_get("section_name")?,
        description: row.try_get("description")?,
        display_order: row.try_get("display_order")?,
        active: row.try_get("active")?,
        created_by: row.try_get("created_by")?,
        creation_datetime: row.try_get("creation_datetime")?,
        updated_by: row.try_get("update_by")?,
        update_datetime: row.try_get("update_datetime")?,
    })
}

pub async fn find_all(db: &SqlitePool) -> Result<Vec<Setting>> {
    let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_SETTINGS))
        .fetch_all(db)
        .await?;

    rows.iter().map(setting_from_row).collect()
}

pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<Setting>> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_SETTINGS))
        .bind(id)
        .fetch_optional(db)
        .await?;

    row.as_ref().map(setting_from_row).transpose()
}

/// Fetch settings by id, ordered by id
pub async fn find_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> Result<Vec<Setting>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_SETTINGS);
    builder.push(" WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY id");

    let rows = builder.build().fetch_all(&mut *conn).await?;
    rows.iter().map(setting_from_row).collect()
}

/// Insert or update one setting, returning its id
pub async fn save(conn: &mut SqliteConnection, setting: &Setting) -> Result<i64> {
    match setting.id {
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO annual_program_report_setting (
                    section_name, description, display_order, active,
                    created_by, creation_datetime, update_by, update_datetime
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&setting.section_name)
            .bind(&setting.description)
            .bind(setting.display_order)
            .bind(setting.active)
            .bind(&setting.created_by)
            .bind(setting.creation_datetime)
            .bind(&setting.updated_by)
            .bind(setting.update_datetime)
            .execute(&mut *conn)
            .await?;

            Ok(result.last_insert_rowid())
        }
        Some(id) => {
            sqlx::query(
                r#"
                INSERT INTO annual_program_report_setting (
                    id, section_name, description, display_order, active,
                    created_by, creation_datetime, update_by, update_datetime
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (id) DO UPDATE SET
                    section_name = excluded.section_name,
                    description = excluded.description,
                    display_order = excluded.display_order,
                    active = excluded.active,
                    created_by = COALESCE(excluded.created_by, created_by),
                    creation_datetime = COALESCE(excluded.creation_datetime, creation_datetime),
                    update_by = excluded.update_by,
                    update_datetime = excluded.update_datetime
                "#,
            )
            .bind(id)
            .bind(&setting.section_name)
            .bind(&setting.description)
            .bind(setting.display_order)
            .bind(setting.active)
            .bind(&setting.created_by)
            .bind(setting.creation_datetime)
            .bind(&setting.updated_by)
            .bind(setting.update_datetime)
            .execute(&mut *conn)
            .await?;

            Ok(id)
        }
    }
}

/// Save a batch of settings and return them as stored
pub async fn save_all(conn: &mut SqliteConnection, settings: &[Setting]) -> Result<Vec<Setting>> {
    let mut ids = Vec::with_capacity(settings.len());
    for setting in settings {
        ids.push(save(&mut *conn, setting).await?);
    }

    find_by_ids(&mut *conn, &ids).await
}

/// Delete every setting whose id is listed; unknown ids are ignored
pub async fn delete_by_ids(db: &SqlitePool, ids: &[i64]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("DELETE FROM annual_program_report_setting WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let result = builder.build().execute(db).await?;
    Ok(result.rows_affected())
}
