// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User settings access rules.
//!
//! Settings are strictly owner-scoped. No role, admin included, may touch
//! another user's settings.

use crate::policy::filter::RowFilter;
use crate::policy::types::{Action, Decision, DenyReason, ResourceCtx};
use crate::types::Principal;

/// Evaluates settings access.
pub fn evaluate(principal: &Principal, action: Action, ctx: &ResourceCtx) -> Decision {
	match action {
		Action::List => Decision::allow_filtered(RowFilter::SettingsOwnedBy(principal.id)),
		Action::Create | Action::Read | Action::Update | Action::Delete => {
			owner_only(principal, ctx)
		}
		_ => Decision::deny(DenyReason::RoleNotPermitted),
	}
}

fn owner_only(principal: &Principal, ctx: &ResourceCtx) -> Decision {
	match ctx.settings_owner {
		Some(owner) if owner == principal.id => Decision::allow(),
		_ => Decision::deny(DenyReason::NotSettingsOwner),
	}
}
