// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Blueprint file storage configuration section.

use serde::{Deserialize, Serialize};

fn default_upload_dir() -> String {
	"./uploads/blueprints".to_string()
}

fn default_max_upload_bytes() -> u64 {
	50 * 1024 * 1024
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfigLayer {
	pub upload_dir: Option<String>,
	pub max_upload_bytes: Option<u64>,
}

impl StorageConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.upload_dir.is_some() {
			self.upload_dir = other.upload_dir;
		}
		if other.max_upload_bytes.is_some() {
			self.max_upload_bytes = other.max_upload_bytes;
		}
	}

	pub fn finalize(self) -> StorageConfig {
		StorageConfig {
			upload_dir: self.upload_dir.unwrap_or_else(default_upload_dir),
			max_upload_bytes: self.max_upload_bytes.unwrap_or_else(default_max_upload_bytes),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
	pub upload_dir: String,
	pub max_upload_bytes: u64,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			upload_dir: default_upload_dir(),
			max_upload_bytes: default_max_upload_bytes(),
		}
	}
}
