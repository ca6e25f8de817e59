//! Group membership reconciliation.
//!
//! Converges a group's remote membership toward a desired set of user
//! ids: members missing remotely are added, members present remotely but
//! not desired are removed. The diff is computed fresh on every pass and
//! discarded with it.

use std::collections::BTreeSet;
use tracing::{debug, info};

use oktide_core::traits::GroupMembership;
use oktide_core::{GroupId, OktaResult, UserId};

/// The set difference between actual and desired membership.
///
/// Derived, never persisted: `to_add` is desired minus actual, `to_remove`
/// is actual minus desired. Members present on both sides appear in
/// neither list, so an add for an existing member is never attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipDiff {
    /// Users to add to the group.
    pub to_add: Vec<UserId>,
    /// Users to remove from the group.
    pub to_remove: Vec<UserId>,
}

impl MembershipDiff {
    /// Compute the diff between an actual member list and a desired set.
    #[must_use]
    pub fn between(actual: &[UserId], desired: &BTreeSet<UserId>) -> Self {
        let actual_set: BTreeSet<&UserId> = actual.iter().collect();

        let to_add = desired
            .iter()
            .filter(|user| !actual_set.contains(*user))
            .cloned()
            .collect();

        let to_remove = actual_set
            .iter()
            .filter(|user| !desired.contains(**user))
            .map(|user| (*user).clone())
            .collect();

        Self { to_add, to_remove }
    }

    /// Whether actual membership already equals the desired set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Outcome of one convergence pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergeSummary {
    /// Members added this pass.
    pub added: usize,
    /// Members removed this pass.
    pub removed: usize,
    /// Removals skipped because the membership was already gone remotely.
    pub already_absent: usize,
}

impl ConvergeSummary {
    /// Whether the pass issued no mutations at all.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.already_absent == 0
    }
}

/// Stateless reconciler converging remote membership to a desired set.
pub struct MembershipReconciler;

impl MembershipReconciler {
    /// Converge the group's membership to exactly `desired`.
    ///
    /// Lists actual membership, then issues one add per missing member and
    /// one remove per surplus member. Any add failure aborts the pass.
    /// A remove that fails with not-found is swallowed: the membership is
    /// already gone, which is the state we wanted; adds never hit
    /// not-found because the diff excludes members already present, so an
    /// add error is always real. Any other failure aborts the pass.
    ///
    /// Callers decide whether membership is managed at all; this function
    /// always reads and converges.
    pub async fn converge<D: GroupMembership + ?Sized>(
        directory: &D,
        group: &GroupId,
        desired: &BTreeSet<UserId>,
    ) -> OktaResult<ConvergeSummary> {
        let actual = directory.list_member_ids(group).await?;
        let diff = MembershipDiff::between(&actual, desired);

        if diff.is_empty() {
            debug!(group_id = %group, members = actual.len(), "Membership already converged");
            return Ok(ConvergeSummary::default());
        }

        let mut summary = ConvergeSummary::default();

        for user in &diff.to_add {
            directory.add_member(group, user).await?;
            summary.added += 1;
        }

        for user in &diff.to_remove {
            match directory.remove_member(group, user).await {
                Ok(()) => summary.removed += 1,
                Err(e) if e.is_not_found() => {
                    debug!(
                        group_id = %group,
                        user_id = %user,
                        "Membership already absent, nothing to remove"
                    );
                    summary.already_absent += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            group_id = %group,
            added = summary.added,
            removed = summary.removed,
            "Converged group membership"
        );

        Ok(summary)
    }
}
