//! Bulk lifecycle actions with per-target skip rules.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use usergate_core::events::{AccountEvent, BulkActionKind};
use usergate_core::types::AccountId;
use usergate_database::CredentialStore;

use super::lifecycle::{AccountLifecycle, TransitionOutcome};
use crate::events::EventBus;

/// A lifecycle action applied to many accounts at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkActionRequest {
    /// Targets, possibly with duplicates.
    pub target_ids: Vec<AccountId>,
    /// Submitted ids that are not valid account ids. Each is reported as
    /// a `"not found"` error skip.
    pub unresolved_ids: Vec<String>,
    /// Action to apply.
    pub action: BulkActionKind,
    /// The admin issuing the request.
    pub caller_id: AccountId,
}

/// Why a target was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipKind {
    /// Refused by the admin-protection policy.
    Policy,
    /// Already in the requested state.
    Noop,
    /// Lookup or write failed.
    Error,
}

/// One skipped target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipEntry {
    /// The skipped account id, as submitted.
    pub target_id: String,
    /// Human-readable reason.
    pub reason: String,
    /// Skip category.
    pub kind: SkipKind,
}

/// Aggregated result of a bulk request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionOutcome {
    /// Targets the action was applied to.
    pub applied_count: usize,
    /// Targets skipped for any reason.
    pub skipped_count: usize,
    /// Skips in processing order.
    pub skips: Vec<SkipEntry>,
    /// Skips refused by policy.
    pub policy_skips: usize,
    /// Skips that were already in the requested state.
    pub noop_skips: usize,
    /// Skips caused by failures.
    pub error_skips: usize,
    /// The caller blocked or deleted their own account; their session ends.
    pub caller_session_terminated: bool,
}

impl BulkActionOutcome {
    fn skip(&mut self, target_id: impl ToString, reason: impl Into<String>, kind: SkipKind) {
        match kind {
            SkipKind::Policy => self.policy_skips += 1,
            SkipKind::Noop => self.noop_skips += 1,
            SkipKind::Error => self.error_skips += 1,
        }
        self.skipped_count += 1;
        self.skips.push(SkipEntry {
            target_id: target_id.to_string(),
            reason: reason.into(),
            kind,
        });
    }
}

/// Deduplicate `targets` keeping first occurrences, then move `caller` last.
pub fn processing_order(targets: &[AccountId], caller: AccountId) -> Vec<AccountId> {
    let mut seen = HashSet::with_capacity(targets.len());
    let mut ordered: Vec<AccountId> = targets
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .filter(|id| *id != caller)
        .collect();
    if seen.contains(&caller) {
        ordered.push(caller);
    }
    ordered
}

/// Applies a bulk action sequentially, one target at a time.
///
/// A failure on one target is recorded as a skip and never aborts the
/// batch. The caller's own account is processed last so that the rest of
/// the batch completes before their session is torn down.
#[derive(Clone)]
pub struct BulkActionReconciler {
    store: Arc<dyn CredentialStore>,
    lifecycle: Arc<AccountLifecycle>,
    events: EventBus,
}

impl std::fmt::Debug for BulkActionReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkActionReconciler").finish_non_exhaustive()
    }
}

impl BulkActionReconciler {
    /// Creates a new reconciler.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        lifecycle: Arc<AccountLifecycle>,
        events: EventBus,
    ) -> Self {
        Self {
            store,
            lifecycle,
            events,
        }
    }

    /// Run the whole batch.
    pub async fn reconcile(&self, request: &BulkActionRequest) -> BulkActionOutcome {
        self.reconcile_until(request, &CancellationToken::new())
            .await
    }

    /// Run the batch, stopping between targets once `cancel` fires.
    ///
    /// Targets not reached are recorded as error skips with reason
    /// `"cancelled"`.
    pub async fn reconcile_until(
        &self,
        request: &BulkActionRequest,
        cancel: &CancellationToken,
    ) -> BulkActionOutcome {
        let action = request.action;
        let caller = request.caller_id;
        let order = processing_order(&request.target_ids, caller);
        let mut outcome = BulkActionOutcome::default();

        for raw in &request.unresolved_ids {
            debug!(target_id = %raw, "Bulk target id malformed");
            outcome.skip(raw, "not found", SkipKind::Error);
        }

        for (position, target) in order.iter().copied().enumerate() {
            if cancel.is_cancelled() {
                warn!(
                    remaining = order.len() - position,
                    action = %action,
                    "Bulk action cancelled"
                );
                for rest in &order[position..] {
                    outcome.skip(*rest, "cancelled", SkipKind::Error);
                }
                break;
            }

            let account = match self.store.find_by_id(target).await {
                Ok(Some(account)) => account,
                Ok(None) => {
                    debug!(target_id = %target, "Bulk target not found");
                    outcome.skip(target, "not found", SkipKind::Error);
                    continue;
                }
                Err(e) => {
                    tracing::error!(target_id = %target, error = %e, "Bulk target lookup failed");
                    outcome.skip(target, e.message, SkipKind::Error);
                    continue;
                }
            };

            if account.is_admin() && matches!(action, BulkActionKind::Delete | BulkActionKind::Block)
            {
                debug!(target_id = %target, action = %action, "Admin target protected");
                outcome.skip(
                    target,
                    format!(
                        "{} is an admin and cannot be {}",
                        account.name,
                        action.past_tense()
                    ),
                    SkipKind::Policy,
                );
                continue;
            }

            let already = match action {
                BulkActionKind::Block if account.is_blocked() => Some("blocked"),
                BulkActionKind::Unblock if !account.is_blocked() => Some("active"),
                _ => None,
            };
            if let Some(state) = already {
                debug!(target_id = %target, state, "Bulk target already in state");
                outcome.skip(
                    target,
                    format!("{} is already {state}", account.name),
                    SkipKind::Noop,
                );
                continue;
            }

            match self.lifecycle.apply(caller, account, action).await {
                Ok(TransitionOutcome::Applied) => {
                    outcome.applied_count += 1;
                    if target == caller && action != BulkActionKind::Unblock {
                        outcome.caller_session_terminated = true;
                    }
                }
                Ok(TransitionOutcome::NoOp) => {
                    outcome.skip(target, "no change", SkipKind::Noop);
                }
                Err(e) => {
                    tracing::error!(
                        target_id = %target,
                        action = %action,
                        error = %e,
                        "Bulk transition failed"
                    );
                    outcome.skip(target, e.message, SkipKind::Error);
                }
            }
        }

        info!(
            admin_id = %caller,
            action = %action,
            requested = request.target_ids.len() + request.unresolved_ids.len(),
            applied = outcome.applied_count,
            skipped = outcome.skipped_count,
            caller_session_terminated = outcome.caller_session_terminated,
            "Bulk action completed"
        );
        self.events.publish(
            Some(caller),
            AccountEvent::BulkCompleted {
                action,
                applied: outcome.applied_count,
                skipped: outcome.skipped_count,
            },
        );

        outcome
    }
}
