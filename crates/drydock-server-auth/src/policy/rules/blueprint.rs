// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Blueprint access rules.
//!
//! Any active role may upload drawings and edit drawing metadata. Admin and
//! project manager see every drawing and may retire them; engineer and
//! technician only see and download drawings attached to projects whose team
//! they are on.

use crate::policy::filter::RowFilter;
use crate::policy::types::{Action, Decision, DenyReason, ResourceCtx};
use crate::types::Principal;

/// Evaluates blueprint access.
pub fn evaluate(principal: &Principal, action: Action, ctx: &ResourceCtx) -> Decision {
	match action {
		Action::Create | Action::Update => Decision::allow(),
		Action::List => {
			if principal.role.is_privileged() {
				Decision::allow_filtered(RowFilter::All)
			} else {
				Decision::allow_filtered(RowFilter::BlueprintOnTeamOf(principal.id))
			}
		}
		Action::Read | Action::Download => {
			if principal.role.is_privileged() {
				Decision::allow()
			} else {
				team_only(ctx)
			}
		}
		Action::Delete => {
			if principal.role.is_privileged() {
				Decision::allow()
			} else {
				Decision::deny(DenyReason::RoleNotPermitted)
			}
		}
		_ => Decision::deny(DenyReason::RoleNotPermitted),
	}
}

fn team_only(ctx: &ResourceCtx) -> Decision {
	match ctx.principal_is_team_member {
		Some(true) => Decision::allow(),
		_ => Decision::deny(DenyReason::NotTeamMember),
	}
}
