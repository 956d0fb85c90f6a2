// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Central decision point for resource access.
//!
//! [`decide`] is a pure function over the principal and the facts in
//! [`ResourceCtx`]. It performs no I/O, so callers gather whatever rows the
//! decision needs before asking, and the same inputs always produce the same
//! decision.
//!
//! Inactive principals are rejected here, before any per-resource rule runs,
//! so individual rule tables never need to re-check activity.

use tracing::instrument;

use crate::error::AuthError;
use crate::policy::filter::RowFilter;
use crate::policy::rules;
use crate::policy::types::{Action, Decision, DenyReason, ResourceCtx, ResourceKind};
use crate::types::Principal;

/// Decides whether `principal` may perform `action` on the resource described
/// by `ctx`.
///
/// List decisions carry a [`RowFilter`] describing which rows the caller is
/// allowed to see. Single-row decisions allow or deny outright.
#[instrument(
	level = "debug",
	skip(principal, ctx),
	fields(user_id = %principal.id, role = %principal.role, action = ?action, kind = ?ctx.kind)
)]
pub fn decide(principal: &Principal, action: Action, ctx: &ResourceCtx) -> Decision {
	if !principal.active {
		return Decision::deny(DenyReason::InactivePrincipal);
	}

	match ctx.kind {
		ResourceKind::Project => rules::project::evaluate(principal, action, ctx),
		ResourceKind::Task => rules::task::evaluate(principal, action, ctx),
		ResourceKind::Inventory => rules::inventory::evaluate(principal, action, ctx),
		ResourceKind::Blueprint => rules::blueprint::evaluate(principal, action, ctx),
		ResourceKind::UserSettings => rules::settings::evaluate(principal, action, ctx),
	}
}

/// Returns the row filter scoping a listing of `kind` for `principal`.
///
/// Every allowed list decision must carry a filter. An allow without one is a
/// rule-table bug and surfaces as an internal error rather than an
/// unrestricted listing.
pub fn list_filter(principal: &Principal, kind: ResourceKind) -> Result<RowFilter, AuthError> {
	match decide(principal, Action::List, &ResourceCtx::collection(kind)) {
		Decision::Allow { filter: Some(filter) } => Ok(filter),
		Decision::Allow { filter: None } => Err(AuthError::Internal(format!(
			"list decision for {kind} carried no row filter"
		))),
		Decision::Deny(DenyReason::InactivePrincipal) => Err(AuthError::InactiveUser),
		Decision::Deny(reason) => Err(AuthError::Forbidden(reason.to_string())),
	}
}
