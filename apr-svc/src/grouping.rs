//! Grouping of flat task rows into per-report DTOs
//!
//! Rows are partitioned by their [`ReportKey`]. Groups come out in the order
//! their key is first seen in the input; tasks keep input order within a
//! group. A group's `report_id` is the one on its first row.

use std::collections::HashMap;

use crate::models::{ReportKey, ReportTaskGroup, TaskDetail, TaskEntry};

/// Group task rows by report key
pub fn group_tasks(details: &[TaskDetail]) -> Vec<ReportTaskGroup> {
    let mut index: HashMap<&ReportKey, usize> = HashMap::new();
    let mut groups: Vec<ReportTaskGroup> = Vec::new();

    for detail in details {
        let slot = *index.entry(&detail.key).or_insert_with(|| {
            groups.push(ReportTaskGroup {
                key: detail.key.clone(),
                report_id: detail.report_id,
                tasks: Vec::new(),
            });
            groups.len() - 1
        });

        groups[slot].tasks.push(TaskEntry::from(detail));
    }

    groups
}
