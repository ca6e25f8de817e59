//! Bulk cleanup of groups by name prefix.
//!
//! Deletes every group matching a query prefix. Deletes are independent,
//! so a failure does not stop the sweep: every failure is collected and
//! reported as one aggregate error at the end. This is deliberately the
//! opposite of a reconciliation pass, which aborts on its first fatal
//! error because its mutations all belong to one resource.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use oktide_core::traits::GroupStore;
use oktide_core::{AggregateError, OktaResult};

/// Summary of a completed sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// Correlation id for this sweep run.
    pub run_id: Uuid,
    /// The name prefix the sweep matched against.
    pub query: String,
    /// Groups matched by the query.
    pub matched: usize,
    /// Groups successfully deleted.
    pub deleted: usize,
    /// When the sweep started.
    pub started_at: DateTime<Utc>,
    /// When the sweep finished.
    pub finished_at: DateTime<Utc>,
}

/// Delete every group whose name matches `name_prefix`.
///
/// A listing failure aborts immediately. Individual delete failures are
/// collected; if any occurred, the sweep returns a single
/// [`OktaError::Aggregate`](oktide_core::OktaError::Aggregate) naming each
/// one, after attempting every remaining delete.
pub async fn sweep_groups<D: GroupStore + ?Sized>(
    directory: &D,
    name_prefix: &str,
) -> OktaResult<SweepReport> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();

    info!(run_id = %run_id, prefix = %name_prefix, "Starting group sweep");

    let groups = directory.list_groups(Some(name_prefix)).await?;
    let matched = groups.len();

    let mut failures = AggregateError::new();
    let mut deleted = 0usize;

    for group in &groups {
        match directory.delete_group(&group.id).await {
            Ok(()) => deleted += 1,
            Err(e) => {
                warn!(
                    run_id = %run_id,
                    group_id = %group.id,
                    error = %e,
                    "Failed to delete group during sweep"
                );
                failures.push(e);
            }
        }
    }

    failures.into_result()?;

    let report = SweepReport {
        run_id,
        query: name_prefix.to_string(),
        matched,
        deleted,
        started_at,
        finished_at: Utc::now(),
    };

    info!(
        run_id = %run_id,
        matched = report.matched,
        deleted = report.deleted,
        "Group sweep completed"
    );

    Ok(report)
}
