//! Report master queries

use apr_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::models::{ReportKey, ReportMaster};

fn master_from_row(row: &SqliteRow) -> Result<ReportMaster> {
    let report_id: String = row.try_get("report_id")?;

    Ok(ReportMaster {
        report_id: super::parse_uuid(&report_id)?,
        key: ReportKey {
            program_id: row.try_get("program_id")?,
            department_id: row.try_get("department_id")?,
            college_id: row.try_get("college_id")?,
            academic_year: row.try_get("academic_year")?,
        },
    })
}

/// Look up the report master for a key
pub async fn find_by_key(
    conn: &mut SqliteConnection,
    key: &ReportKey,
) -> Result<Option<ReportMaster>> {
    let row = sqlx::query(
        r#"
        SELECT report_id, program_id, department_id, college_id, academic_year
        FROM report_master
        WHERE program_id = ? AND department_id = ? AND college_id = ? AND academic_year = ?
        "#,
    )
    .bind(key.program_id)
    .bind(&key.department_id)
    .bind(&key.college_id)
    .bind(key.academic_year)
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(master_from_row).transpose()
}

/// Resolve the report master for a key, creating it when absent
///
/// The insert is a no-op when the key already exists, so a concurrent
/// creator of the same key wins and both callers re-fetch the same row.
pub async fn find_or_create(conn: &mut SqliteConnection, key: &ReportKey) -> Result<ReportMaster> {
    if let Some(existing) = find_by_key(&mut *conn, key).await? {
        return Ok(existing);
    }

    let report_id = Uuid::new_v4();
    let inserted = sqlx::query(
        r#"
        INSERT INTO report_master (report_id, program_id, department_id, college_id, academic_year)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (program_id, department_id, college_id, academic_year) DO NOTHING
        "#,
    )
    .bind(report_id.to_string())
    .bind(key.program_id)
    .bind(&key.department_id)
    .bind(&key.college_id)
    .bind(key.academic_year)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    if inserted > 0 {
        info!("Report master {} created for {:?}", report_id, key);
    }

    find_by_key(&mut *conn, key)
        .await?
        .ok_or_else(|| Error::Internal(format!("Report master vanished after insert: {:?}", key)))
}

pub async fn count(db: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM report_master")
        .fetch_one(db)
        .await?;
    Ok(count)
}
