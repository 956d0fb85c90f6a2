// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-resource rule tables.
//!
//! One module per resource kind. Each exposes
//! `evaluate(principal, action, ctx) -> Decision` and is only ever reached
//! through [`crate::policy::decide`], which has already rejected inactive
//! principals.

pub mod blueprint;
pub mod inventory;
pub mod project;
pub mod settings;
pub mod task;
