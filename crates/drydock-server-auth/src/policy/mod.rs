// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-aware authorization engine.
//!
//! This module decides what a principal may do and, for listings, which rows
//! they may see. Decisions are pure functions over explicit facts, so the
//! same checks guard both single-row routes and the dashboard aggregates.
//!
//! # Architecture
//!
//! The engine is structured in three layers:
//!
//! 1. **Types** ([`types`]): actions, resource kinds, fact bundles, decisions
//! 2. **Rules** ([`rules`]): per-resource rule tables (project, task, inventory, blueprint, settings)
//! 3. **Engine** ([`engine`]): entry point that screens the principal and routes to a rule table
//!
//! # Decision Flow
//!
//! ```text
//! decide(principal, action, ctx)
//!     │
//!     ├── Inactive principal → Deny(InactivePrincipal)
//!     │
//!     └── Route on ctx.kind:
//!         ├── Project      → rules::project::evaluate()
//!         ├── Task         → rules::task::evaluate()
//!         ├── Inventory    → rules::inventory::evaluate()
//!         ├── Blueprint    → rules::blueprint::evaluate()
//!         └── UserSettings → rules::settings::evaluate()
//! ```
//!
//! # Example
//!
//! ```
//! use drydock_server_auth::policy::{decide, Action, ResourceCtx};
//! use drydock_server_auth::{Principal, Role, UserId};
//!
//! // A project manager looking at a project they created.
//! let user_id = UserId::generate();
//! let principal = Principal::new(user_id, Role::ProjectManager, true);
//! let resource = ResourceCtx::project(user_id);
//!
//! assert!(decide(&principal, Action::Read, &resource).is_allowed());
//! assert!(decide(&principal, Action::Delete, &resource).is_allowed());
//!
//! // The same manager against someone else's project.
//! let foreign = ResourceCtx::project(UserId::generate());
//! assert!(!decide(&principal, Action::Delete, &foreign).is_allowed());
//! ```

pub mod engine;
pub mod filter;
pub mod rules;
pub mod types;

pub use engine::*;
pub use filter::*;
pub use types::*;
