// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary


mod blueprints;
mod dashboard;
mod inventory;
mod projects;
mod settings;
mod tasks;
mod users;
