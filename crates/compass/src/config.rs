// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SDK configuration.

/// Default ingest endpoint receiving tick payloads.
pub const DEFAULT_INGEST_URL: &str = "https://events.newsroom.bi/ingest.php";

/// Default endpoint serving RFV segment lookups.
pub const DEFAULT_RFV_URL: &str = "https://events.newsroom.bi/data.php";

/// Configuration for the tracker.
#[derive(Debug, Clone)]
pub struct CompassConfig {
	/// Account identifier issued by Compass; absent means the `ac`
	/// payload field is omitted.
	pub account_id: Option<String>,
	/// Endpoint receiving tick payloads.
	pub ingest_url: String,
	/// Endpoint serving RFV lookups.
	pub rfv_url: String,
}

impl Default for CompassConfig {
	fn default() -> Self {
		Self {
			account_id: None,
			ingest_url: DEFAULT_INGEST_URL.to_string(),
			rfv_url: DEFAULT_RFV_URL.to_string(),
		}
	}
}

impl CompassConfig {
	/// Creates a configuration for the given account against the
	/// production endpoints.
	pub fn new(account_id: impl Into<String>) -> Self {
		Self {
			account_id: Some(account_id.into()),
			..Self::default()
		}
	}
}
