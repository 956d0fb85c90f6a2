// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Blueprint file storage.
//!
//! Uploaded blueprint files live on the local filesystem under the configured
//! upload directory. Each upload gets a unique stored name derived from the
//! project, the upload timestamp, and the submitted filename, so re-uploads
//! of the same file never collide.

use chrono::{DateTime, Utc};
use drydock_server_auth::ProjectId;
use std::path::{Path, PathBuf};

use crate::error::ServerError;

/// Filesystem store for uploaded blueprint files.
#[derive(Debug, Clone)]
pub struct BlueprintStorage {
	root: PathBuf,
}

impl BlueprintStorage {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// The directory uploads are written to.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Create the upload directory if it does not exist yet.
	pub async fn ensure_root(&self) -> Result<(), ServerError> {
		tokio::fs::create_dir_all(&self.root)
			.await
			.map_err(|e| ServerError::Internal(format!("failed to create upload dir: {e}")))
	}

	/// The on-disk name for an upload: `{project_id}_{yyyymmdd_hhmmss}_{name}`.
	///
	/// Only the final path component of the submitted filename is used, so a
	/// crafted name cannot escape the upload directory.
	pub fn stored_name(
		project_id: &ProjectId,
		original_name: &str,
		uploaded_at: DateTime<Utc>,
	) -> String {
		let base = sanitize_filename(original_name);
		format!(
			"{}_{}_{}",
			project_id,
			uploaded_at.format("%Y%m%d_%H%M%S"),
			base
		)
	}

	/// Absolute path a stored name maps to.
	pub fn path_for(&self, stored_name: &str) -> PathBuf {
		self.root.join(stored_name)
	}

	/// Write an upload to disk, returning the path it was stored at.
	#[tracing::instrument(skip(self, bytes), fields(stored_name, size = bytes.len()))]
	pub async fn save(&self, stored_name: &str, bytes: &[u8]) -> Result<PathBuf, ServerError> {
		self.ensure_root().await?;
		let path = self.path_for(stored_name);
		tokio::fs::write(&path, bytes)
			.await
			.map_err(|e| ServerError::Internal(format!("failed to store blueprint file: {e}")))?;
		Ok(path)
	}

	/// Read a stored file back. Returns `None` when the file is missing,
	/// which callers surface as a 404 rather than an internal error.
	#[tracing::instrument(skip(self))]
	pub async fn read(&self, file_path: &str) -> Result<Option<Vec<u8>>, ServerError> {
		match tokio::fs::read(file_path).await {
			Ok(bytes) => Ok(Some(bytes)),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(ServerError::Internal(format!(
				"failed to read blueprint file: {e}"
			))),
		}
	}

	/// Best-effort removal of a stored file. The database row is the source
	/// of truth; a file that cannot be removed is logged and left behind.
	#[tracing::instrument(skip(self))]
	pub async fn remove(&self, file_path: &str) {
		if let Err(e) = tokio::fs::remove_file(file_path).await {
			if e.kind() != std::io::ErrorKind::NotFound {
				tracing::warn!(path = %file_path, error = %e, "failed to remove blueprint file");
			}
		}
	}
}

/// Reduce a submitted filename to its final path component.
fn sanitize_filename(name: &str) -> String {
	let trimmed = name
		.rsplit(['/', '\\'])
		.next()
		.unwrap_or(name)
		.trim();
	if trimmed.is_empty() {
		"blueprint".to_string()
	} else {
		trimmed.to_string()
	}
}
