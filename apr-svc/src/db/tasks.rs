//! Task detail queries

use apr_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::models::{ReportKey, TaskDetail};

const SELECT_TASKS: &str = r#"
    SELECT id, report_id, program_id, department_id, college_id, academic_year,
           responsible, section_id, active,
           created_by, creation_datetime, update_by, update_datetime
    FROM annual_program_report_task_detail
"#;

fn task_from_row(row: &SqliteRow) -> Result<TaskDetail> {
    let report_id: String = row.try_get("report_id")?;

    Ok(TaskDetail {
        id: Some(row.try_get("id")?),
        report_id: super::parse_uuid(&report_id)?,
        key: ReportKey {
            program_id: row.try_get("program_id")?,
            department_id: row.try_get("department_id")?,
            college_id: row.try_get("college_id")?,
            academic_year: row.try_get("academic_year")?,
        },
        responsible: row.try_get("responsible")?,
        section_id: row.try_get("section_id")?,
        active: row.try_get("active")?,
        created_by: row.try_get("created_by")?,
        creation_datetime: row.try_get("creation_datetime")?,
        updated_by: row.try_get("update_by")?,
        update_datetime: row.try_get("update_datetime")?,
    })
}

pub async fn find_all(db: &SqlitePool) -> Result<Vec<TaskDetail>> {
    let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_TASKS))
        .fetch_all(db)
        .await?;

    rows.iter().map(task_from_row).collect()
}

pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<TaskDetail>> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_TASKS))
        .bind(id)
        .fetch_optional(db)
        .await?;

    row.as_ref().map(task_from_row).transpose()
}

pub async fn find_by_report_id(db: &SqlitePool, report_id: &str) -> Result<Vec<TaskDetail>> {
    let rows = sqlx::query(&format!("{} WHERE report_id = ? ORDER BY id", SELECT_TASKS))
        .bind(report_id)
        .fetch_all(db)
        .await?;

    rows.iter().map(task_from_row).collect()
}

/// Fetch rows by id, ordered by id
pub async fn find_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> Result<Vec<TaskDetail>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_TASKS);
    builder.push(" WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY id");

    let rows = builder.build().fetch_all(&mut *conn).await?;
    rows.iter().map(task_from_row).collect()
}

/// Insert or update one row, returning its id
///
/// Rows without an id are inserted and get a store-assigned id. Rows with an
/// id are upserted; a missing creation stamp keeps the stored one.
pub async fn save(conn: &mut SqliteConnection, task: &TaskDetail) -> Result<i64> {
    match task.id {
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO annual_program_report_task_detail (
                    report_id, program_id, department_id, college_id, academic_year,
                    responsible, section_id, active,
                    created_by, creation_datetime, update_by, update_datetime
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(task.report_id.to_string())
            .bind(task.key.program_id)
            .bind(&task.key.department_id)
            .bind(&task.key.college_id)
            .bind(task.key.academic_year)
            .bind(&task.responsible)
            .bind(task.section_id)
            .bind(task.active)
            .bind(&task.created_by)
            .bind(task.creation_datetime)
            .bind(&task.updated_by)
            .bind(task.update_datetime)
            .execute(&mut *conn)
            .await?;

            Ok(result.last_insert_rowid())
        }
        Some(id) => {
            sqlx::query(
                r#"
                INSERT INTO annual_program_report_task_detail (
                    id, report_id, program_id, department_id, college_id, academic_year,
                    responsible, section_id, active,
                    created_by, creation_datetime, update_by, update_datetime
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (id) DO UPDATE SET
                    report_id = excluded.report_id,
                    program_id = excluded.program_id,
                    department_id = excluded.department_id,
                    college_id = excluded.college_id,
                    academic_year = excluded.academic_year,
                    responsible = excluded.responsible,
                    section_id = excluded.section_id,
                    active = excluded.active,
                    created_by = COALESCE(excluded.created_by, created_by),
                    creation_datetime = COALESCE(excluded.creation_datetime, creation_datetime),
                    update_by = excluded.update_by,
                    update_datetime = excluded.update_datetime
                "#,
            )
            .bind(id)
            .bind(task.report_id.to_string())
            .bind(task.key.program_id)
            .bind(&task.key.department_id)
            .bind(&task.key.college_id)
            .bind(task.key.academic_year)
            .bind(&task.responsible)
            .bind(task.section_id)
            .bind(task.active)
            .bind(&task.created_by)
            .bind(task.creation_datetime)
            .bind(&task.updated_by)
            .bind(task.update_datetime)
            .execute(&mut *conn)
            .await?;

            Ok(id)
        }
    }
}

/// Save a batch of rows and return them as stored
///
/// Runs on the caller's connection; wrap in a transaction for all-or-nothing.
pub async fn save_all(
    conn: &mut SqliteConnection,
    tasks: &[TaskDetail],
) -> Result<Vec<TaskDetail>> {
    let mut ids = Vec::with_capacity(tasks.len());
    for task in tasks {
        ids.push(save(&mut *conn, task).await?);
    }
    debug!("Saved {} task rows", ids.len());

    find_by_ids(&mut *conn, &ids).await
}

/// Delete every row whose id is listed; unknown ids are ignored
pub async fn delete_by_ids(db: &SqlitePool, ids: &[i64]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("DELETE FROM annual_program_report_task_detail WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let result = builder.build().execute(db).await?;
    Ok(result.rows_affected())
}
