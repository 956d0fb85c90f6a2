// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers organized by concern.

pub mod auth;
pub mod blueprints;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod projects;
pub mod settings;
pub mod tasks;
pub mod users;
