// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the session model.

use thiserror::Error;

/// Errors that can occur in the session model.
#[derive(Debug, Error)]
pub enum SessionError {
	/// Invalid user type string
	#[error("invalid user type: {0}")]
	InvalidUserType(String),
}
