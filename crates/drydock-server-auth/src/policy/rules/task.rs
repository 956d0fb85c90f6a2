// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Task access rules.
//!
//! Admin: full. Project manager: scoped to tasks in projects they created,
//! including creation into those projects. Engineer/technician: may read,
//! update and complete only tasks assigned to them; never create or delete.
//!
//! Moving a task between projects is enforced by the caller evaluating
//! `Action::Update` twice, once against the current project and once against
//! the destination. Both must allow.

use crate::policy::filter::RowFilter;
use crate::policy::types::{Action, Decision, DenyReason, ResourceCtx};
use crate::types::{Principal, Role};

/// Evaluates task access.
pub fn evaluate(principal: &Principal, action: Action, ctx: &ResourceCtx) -> Decision {
	match principal.role {
		Role::Admin => match action {
			Action::List => Decision::allow_filtered(RowFilter::All),
			Action::Create | Action::Read | Action::Update | Action::Delete | Action::Complete => {
				Decision::allow()
			}
			_ => Decision::deny(DenyReason::RoleNotPermitted),
		},
		Role::ProjectManager => match action {
			Action::List => {
				Decision::allow_filtered(RowFilter::TaskInProjectsCreatedBy(principal.id))
			}
			Action::Create | Action::Read | Action::Update | Action::Delete | Action::Complete => {
				project_owner_only(principal, ctx)
			}
			_ => Decision::deny(DenyReason::RoleNotPermitted),
		},
		Role::Engineer | Role::Technician => match action {
			Action::List => Decision::allow_filtered(RowFilter::TaskAssignedTo(principal.id)),
			Action::Read | Action::Update | Action::Complete => assignee_only(principal, ctx),
			_ => Decision::deny(DenyReason::RoleNotPermitted),
		},
	}
}

fn project_owner_only(principal: &Principal, ctx: &ResourceCtx) -> Decision {
	match ctx.project_creator {
		Some(creator) if creator == principal.id => Decision::allow(),
		_ => Decision::deny(DenyReason::NotProjectOwner),
	}
}

fn assignee_only(principal: &Principal, ctx: &ResourceCtx) -> Decision {
	match ctx.task_assignee {
		Some(assignee) if assignee == principal.id => Decision::allow(),
		_ => Decision::deny(DenyReason::NotAssignee),
	}
}
