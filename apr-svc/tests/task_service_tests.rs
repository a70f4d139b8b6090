//! Task service integration tests against in-memory and file databases

use apr_common::db::{connect_readonly, init_database, init_memory_database};
use apr_svc::db::{report_master, tasks};
use apr_svc::models::{ReportKey, SaveTasksRequest, Setting, TaskDetailPatch, TaskEntry};
use apr_svc::services::{Actor, SettingService, TaskService};
use apr_svc::{Resource, ServiceError};
use sqlx::SqlitePool;
use std::time::Duration;
use uuid::Uuid;

fn key(program_id: i64, academic_year: i32) -> ReportKey {
    ReportKey {
        program_id,
        department_id: "CS".to_string(),
        college_id: "ENG".to_string(),
        academic_year,
    }
}

fn entry(section_id: i64, responsible: &str) -> TaskEntry {
    TaskEntry {
        id: None,
        responsible: Some(responsible.to_string()),
        section_id,
        active: true,
        created_by: None,
        creation_datetime: None,
        updated_by: None,
        update_datetime: None,
    }
}

fn alice() -> Actor {
    Actor::new("alice")
}

/// Create one setting for tasks to reference
async fn seed_section(pool: &SqlitePool) -> i64 {
    let saved = SettingService::new(pool.clone())
        .save(
            vec![Setting {
                id: None,
                section_name: "Program Statistics".to_string(),
                description: None,
                display_order: Some(1),
                active: true,
                created_by: None,
                creation_datetime: None,
                updated_by: None,
                update_datetime: None,
            }],
            &alice(),
        )
        .await
        .unwrap();
    saved[0].id.unwrap()
}

async fn setup() -> (SqlitePool, TaskService, i64) {
    let pool = init_memory_database().await.unwrap();
    let section = seed_section(&pool).await;
    (pool.clone(), TaskService::new(pool), section)
}

#[tokio::test]
async fn test_save_returns_one_group_with_assigned_ids() {
    let (_pool, service, section) = setup().await;

    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean"), entry(section, "Chair")],
            },
            &alice(),
        )
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].key, key(1, 2024));
    assert_eq!(groups[0].tasks.len(), 2);
    assert!(groups[0].tasks.iter().all(|t| t.id.is_some()));
    assert!(groups[0]
        .tasks
        .iter()
        .all(|t| t.created_by.as_deref() == Some("alice") && t.creation_datetime.is_some()));
    assert!(groups[0].tasks.iter().all(|t| t.updated_by.is_none()));
}

#[tokio::test]
async fn test_two_saves_with_same_key_share_one_report_master() {
    let (pool, service, section) = setup().await;

    let first = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean")],
            },
            &alice(),
        )
        .await
        .unwrap();
    let second = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Chair")],
            },
            &Actor::new("bob"),
        )
        .await
        .unwrap();

    assert_eq!(first[0].report_id, second[0].report_id);
    assert_eq!(report_master::count(&pool).await.unwrap(), 1);

    let all = service.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].tasks.len(), 2);
}

#[tokio::test]
async fn test_list_groups_by_key() {
    let (_pool, service, section) = setup().await;

    for (program, year) in [(1, 2024), (2, 2024), (1, 2024)] {
        service
            .save(
                SaveTasksRequest {
                    key: key(program, year),
                    tasks: vec![entry(section, "Dean")],
                },
                &alice(),
            )
            .await
            .unwrap();
    }

    let groups = service.list().await.unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, key(1, 2024));
    assert_eq!(groups[0].tasks.len(), 2);
    assert_eq!(groups[1].key, key(2, 2024));
    assert_eq!(groups[1].tasks.len(), 1);
}

#[tokio::test]
async fn test_list_of_empty_store_is_empty() {
    let (_pool, service, _section) = setup().await;
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resubmitted_task_keeps_creation_stamp() {
    let (_pool, service, section) = setup().await;

    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean")],
            },
            &alice(),
        )
        .await
        .unwrap();
    let created = groups[0].tasks[0].clone();

    let mut resubmitted = created.clone();
    resubmitted.responsible = Some("Vice Dean".to_string());
    resubmitted.created_by = None;
    resubmitted.creation_datetime = None;

    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![resubmitted],
            },
            &Actor::new("bob"),
        )
        .await
        .unwrap();
    let saved = &groups[0].tasks[0];

    assert_eq!(saved.id, created.id);
    assert_eq!(saved.responsible.as_deref(), Some("Vice Dean"));
    assert_eq!(saved.created_by.as_deref(), Some("alice"));
    assert_eq!(saved.creation_datetime, created.creation_datetime);
    assert_eq!(saved.updated_by.as_deref(), Some("bob"));
    assert!(saved.update_datetime.is_some());
}

#[tokio::test]
async fn test_blank_actor_is_unauthorized() {
    let (pool, service, section) = setup().await;

    let result = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean")],
            },
            &Actor::new("  "),
        )
        .await;

    assert_eq!(result.unwrap_err(), ServiceError::UnauthorizedAccess(Resource::Task));
    assert_eq!(report_master::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_blank_key_field_is_invalid() {
    let (_pool, service, section) = setup().await;
    let mut bad_key = key(1, 2024);
    bad_key.department_id = " ".to_string();

    let result = service
        .save(
            SaveTasksRequest {
                key: bad_key,
                tasks: vec![entry(section, "Dean")],
            },
            &alice(),
        )
        .await;

    assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
}

#[tokio::test]
async fn test_failed_batch_persists_nothing() {
    let (pool, service, section) = setup().await;

    let result = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean"), entry(9_999, "Nobody")],
            },
            &alice(),
        )
        .await;

    assert_eq!(result.unwrap_err(), ServiceError::CreationFailed(Resource::Task));
    assert!(tasks::find_all(&pool).await.unwrap().is_empty());
    assert_eq!(report_master::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_get_by_id() {
    let (_pool, service, section) = setup().await;
    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean")],
            },
            &alice(),
        )
        .await
        .unwrap();
    let id = groups[0].tasks[0].id.unwrap();

    let task = service.get(id).await.unwrap();
    assert_eq!(task.id, Some(id));
    assert_eq!(task.key, key(1, 2024));
    assert_eq!(task.report_id, groups[0].report_id);

    assert_eq!(
        service.get(id + 100).await.unwrap_err(),
        ServiceError::NotFound(Resource::Task)
    );
}

#[tokio::test]
async fn test_read_by_unknown_report_id_is_not_found() {
    let (_pool, service, _section) = setup().await;

    let result = service.list_by_report(&Uuid::new_v4().to_string()).await;
    assert_eq!(result.unwrap_err(), ServiceError::NotFound(Resource::Task));

    let result = service.tasks_for_report("not-a-uuid").await;
    assert_eq!(result.unwrap_err(), ServiceError::NotFound(Resource::Task));
}

#[tokio::test]
async fn test_tasks_for_report_returns_single_group() {
    let (_pool, service, section) = setup().await;
    let saved = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean"), entry(section, "Chair")],
            },
            &alice(),
        )
        .await
        .unwrap();
    service
        .save(
            SaveTasksRequest {
                key: key(2, 2024),
                tasks: vec![entry(section, "Registrar")],
            },
            &alice(),
        )
        .await
        .unwrap();

    let report_id = saved[0].report_id.to_string();
    let groups = service.list_by_report(&report_id).await.unwrap();
    assert_eq!(groups.len(), 1);

    let group = service.tasks_for_report(&report_id).await.unwrap();
    assert_eq!(group, saved[0]);
}

#[tokio::test]
async fn test_update_only_active_leaves_other_fields() {
    let (_pool, service, section) = setup().await;
    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean")],
            },
            &alice(),
        )
        .await
        .unwrap();
    let id = groups[0].tasks[0].id.unwrap();
    let before = service.get(id).await.unwrap();

    let patch = TaskDetailPatch {
        active: Some(false),
        ..Default::default()
    };
    let after = service.update(id, patch, &Actor::new("bob")).await.unwrap();

    assert!(!after.active);
    assert_eq!(after.id, before.id);
    assert_eq!(after.report_id, before.report_id);
    assert_eq!(after.key, before.key);
    assert_eq!(after.responsible, before.responsible);
    assert_eq!(after.section_id, before.section_id);
    assert_eq!(after.created_by, before.created_by);
    assert_eq!(after.creation_datetime, before.creation_datetime);
    assert_eq!(after.updated_by.as_deref(), Some("bob"));
    assert_eq!(service.get(id).await.unwrap(), after);
}

#[tokio::test]
async fn test_update_key_moves_task_to_matching_report() {
    let (pool, service, section) = setup().await;
    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean")],
            },
            &alice(),
        )
        .await
        .unwrap();
    let id = groups[0].tasks[0].id.unwrap();

    let patch = TaskDetailPatch {
        academic_year: Some(2025),
        ..Default::default()
    };
    let moved = service.update(id, patch, &alice()).await.unwrap();

    assert_eq!(moved.key, key(1, 2025));
    assert_ne!(moved.report_id, groups[0].report_id);
    assert_eq!(report_master::count(&pool).await.unwrap(), 2);

    let group = service
        .tasks_for_report(&moved.report_id.to_string())
        .await
        .unwrap();
    assert_eq!(group.key, key(1, 2025));
}

#[tokio::test]
async fn test_update_missing_task_is_not_found() {
    let (_pool, service, _section) = setup().await;

    let result = service
        .update(42, TaskDetailPatch::default(), &alice())
        .await;
    assert_eq!(result.unwrap_err(), ServiceError::NotFound(Resource::Task));
}

#[tokio::test]
async fn test_delete_existing_and_missing_ids() {
    let (pool, service, section) = setup().await;
    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean"), entry(section, "Chair")],
            },
            &alice(),
        )
        .await
        .unwrap();
    let gone = groups[0].tasks[0].id.unwrap();
    let kept = groups[0].tasks[1].id.unwrap();

    service.delete(&[gone, 9_999], None).await.unwrap();

    let remaining = tasks::find_all(&pool).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, Some(kept));
    // The report master outlives its tasks
    assert_eq!(report_master::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_writes_to_readonly_store_are_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("apr.db");

    let pool = init_database(&db_path).await.unwrap();
    let section = seed_section(&pool).await;
    let groups = TaskService::new(pool.clone())
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean")],
            },
            &alice(),
        )
        .await
        .unwrap();
    let id = groups[0].tasks[0].id.unwrap();
    pool.close().await;

    let readonly = connect_readonly(&db_path).await.unwrap();
    let service = TaskService::new(readonly);
    let unauthorized = ServiceError::UnauthorizedAccess(Resource::Task);

    let save = service
        .save(
            SaveTasksRequest {
                key: key(2, 2024),
                tasks: vec![entry(section, "Chair")],
            },
            &alice(),
        )
        .await;
    assert_eq!(save.unwrap_err(), unauthorized);

    let patch = TaskDetailPatch {
        active: Some(false),
        ..Default::default()
    };
    assert_eq!(service.update(id, patch, &alice()).await.unwrap_err(), unauthorized);

    assert_eq!(service.delete(&[id], None).await.unwrap_err(), unauthorized);

    // Reads still work
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_task_id_is_saved_as_new() {
    let (pool, service, section) = setup().await;

    let mut stale = entry(section, "Dean");
    stale.id = Some(4242);

    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![stale],
            },
            &alice(),
        )
        .await
        .unwrap();
    let saved = &groups[0].tasks[0];

    assert_ne!(saved.id, Some(4242));
    assert_eq!(saved.created_by.as_deref(), Some("alice"));
    assert!(saved.creation_datetime.is_some());
    assert!(saved.updated_by.is_none());
    assert!(tasks::find_by_id(&pool, 4242).await.unwrap().is_none());
}

#[tokio::test]
async fn test_reads_from_closed_store_fail() {
    let (pool, service, _section) = setup().await;
    pool.close().await;

    assert_eq!(
        service.list().await.unwrap_err(),
        ServiceError::ListFailed(Resource::Task)
    );
    assert_eq!(
        service.get(1).await.unwrap_err(),
        ServiceError::GetFailed(Resource::Task)
    );
    assert_eq!(
        service.list_by_report("any-report").await.unwrap_err(),
        ServiceError::GetFailed(Resource::Task)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("apr.db")).await.unwrap();
    let section = seed_section(&pool).await;
    let service = TaskService::new(pool.clone());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .save(
                        SaveTasksRequest {
                            key: key(1, 2024 + (i % 2)),
                            tasks: vec![entry(section, &format!("Member {}", i))],
                        },
                        &alice(),
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(report_master::count(&pool).await.unwrap(), 2);
    assert_eq!(tasks::find_all(&pool).await.unwrap().len(), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_update_does_not_resurrect_concurrently_deleted_task() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("apr.db")).await.unwrap();
    let section = seed_section(&pool).await;
    let service = TaskService::new(pool.clone());

    let groups = service
        .save(
            SaveTasksRequest {
                key: key(1, 2024),
                tasks: vec![entry(section, "Dean")],
            },
            &alice(),
        )
        .await
        .unwrap();
    let id = groups[0].tasks[0].id.unwrap();

    // Hold the write lock while the delete is pending
    let mut tx = apr_svc::db::begin_immediate(&pool).await.unwrap();
    sqlx::query("DELETE FROM annual_program_report_task_detail WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .unwrap();

    let updater = service.clone();
    let pending = tokio::spawn(async move {
        let patch = TaskDetailPatch {
            active: Some(false),
            ..Default::default()
        };
        updater.update(id, patch, &alice()).await
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.commit().await.unwrap();

    assert_eq!(
        pending.await.unwrap().unwrap_err(),
        ServiceError::NotFound(Resource::Task)
    );
    assert!(tasks::find_by_id(&pool, id).await.unwrap().is_none());
}
