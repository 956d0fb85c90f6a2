// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
	"0.0.0.0".to_string()
}

fn default_cors_origins() -> Vec<String> {
	vec![
		"http://localhost:3000".to_string(),
		"http://localhost:3001".to_string(),
		"http://127.0.0.1:3000".to_string(),
	]
}

/// HTTP server configuration (runtime, fully resolved).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
	pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: 8000,
			cors_origins: default_cors_origins(),
		}
	}
}

/// HTTP configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HttpConfigLayer {
	#[serde(default)]
	pub host: Option<String>,
	#[serde(default)]
	pub port: Option<u16>,
	#[serde(default)]
	pub cors_origins: Option<Vec<String>>,
}

impl HttpConfigLayer {
	pub fn merge(&mut self, other: HttpConfigLayer) {
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.port.is_some() {
			self.port = other.port;
		}
		if other.cors_origins.is_some() {
			self.cors_origins = other.cors_origins;
		}
	}

	pub fn finalize(self) -> HttpConfig {
		HttpConfig {
			host: self.host.unwrap_or_else(default_host),
			port: self.port.unwrap_or(8000),
			cors_origins: self.cors_origins.unwrap_or_else(default_cors_origins),
		}
	}
}
