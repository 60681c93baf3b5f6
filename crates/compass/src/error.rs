// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the tracking SDK.

use thiserror::Error;

/// Tracking SDK errors.
///
/// Tick delivery failures are logged and swallowed by the scheduler, so
/// these surface only from direct transport/RFV calls and from facade
/// calls after the worker has gone away.
#[derive(Debug, Error)]
pub enum CompassError {
	/// HTTP request failed.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// Server returned an error response.
	#[error("server error ({status})")]
	ServerError { status: u16 },

	/// The tracker worker has been shut down.
	#[error("tracker has been shut down")]
	TrackerClosed,
}

/// Result type alias for tracking operations.
pub type Result<T> = std::result::Result<T, CompassError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn server_error_display_includes_status() {
		let err = CompassError::ServerError { status: 503 };
		assert_eq!(err.to_string(), "server error (503)");
	}

	#[test]
	fn tracker_closed_display() {
		assert_eq!(
			CompassError::TrackerClosed.to_string(),
			"tracker has been shut down"
		);
	}
}
