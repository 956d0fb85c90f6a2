// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Inventory access rules.
//!
//! Every active role may browse the full catalogue. Mutations are limited to
//! admin and project manager.

use crate::policy::filter::RowFilter;
use crate::policy::types::{Action, Decision, DenyReason, ResourceCtx};
use crate::types::Principal;

/// Evaluates inventory access.
pub fn evaluate(principal: &Principal, action: Action, _ctx: &ResourceCtx) -> Decision {
	match action {
		Action::List => Decision::allow_filtered(RowFilter::All),
		Action::Read => Decision::allow(),
		Action::Create | Action::Update | Action::Delete => {
			if principal.role.is_privileged() {
				Decision::allow()
			} else {
				Decision::deny(DenyReason::RoleNotPermitted)
			}
		}
		_ => Decision::deny(DenyReason::RoleNotPermitted),
	}
}
