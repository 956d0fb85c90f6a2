// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project access rules.
//!
//! Admin: full. Project manager: may create; reads, updates and deletes only
//! projects they created. Engineer/technician: read-only, limited to projects
//! whose team they are on.

use crate::policy::filter::RowFilter;
use crate::policy::types::{Action, Decision, DenyReason, ResourceCtx};
use crate::types::{Principal, Role};

/// Evaluates project access.
pub fn evaluate(principal: &Principal, action: Action, ctx: &ResourceCtx) -> Decision {
	match principal.role {
		Role::Admin => match action {
			Action::List => Decision::allow_filtered(RowFilter::All),
			Action::Create | Action::Read | Action::Update | Action::Delete => Decision::allow(),
			_ => Decision::deny(DenyReason::RoleNotPermitted),
		},
		Role::ProjectManager => match action {
			Action::Create => Decision::allow(),
			Action::List => Decision::allow_filtered(RowFilter::ProjectCreatedBy(principal.id)),
			Action::Read | Action::Update | Action::Delete => creator_only(principal, ctx),
			_ => Decision::deny(DenyReason::RoleNotPermitted),
		},
		Role::Engineer | Role::Technician => match action {
			Action::List => Decision::allow_filtered(RowFilter::ProjectTeamMember(principal.id)),
			Action::Read => team_only(ctx),
			_ => Decision::deny(DenyReason::RoleNotPermitted),
		},
	}
}

fn creator_only(principal: &Principal, ctx: &ResourceCtx) -> Decision {
	match ctx.project_creator {
		Some(creator) if creator == principal.id => Decision::allow(),
		_ => Decision::deny(DenyReason::NotProjectOwner),
	}
}

fn team_only(ctx: &ResourceCtx) -> Decision {
	match ctx.principal_is_team_member {
		Some(true) => Decision::allow(),
		_ => Decision::deny(DenyReason::NotTeamMember),
	}
}
