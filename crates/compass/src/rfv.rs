// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recency-frequency-value segment lookup.

use async_trait::async_trait;

use crate::error::{CompassError, Result};

/// Fetches the RFV segment for an identified user.
///
/// Independent of the tick cadence; the tracker calls this on demand.
#[async_trait]
pub trait RfvClient: Send + Sync {
	/// Fetches the segment for the given user/account pair. `None`
	/// means the service has no segment for this user.
	async fn fetch_rfv(&self, user_id: &str, account_id: &str) -> Result<Option<String>>;
}

/// HTTP lookup against the Compass data endpoint.
pub struct HttpRfvClient {
	client: reqwest::Client,
	endpoint: String,
}

impl HttpRfvClient {
	pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
		Self {
			client,
			endpoint: endpoint.into(),
		}
	}
}

#[async_trait]
impl RfvClient for HttpRfvClient {
	async fn fetch_rfv(&self, user_id: &str, account_id: &str) -> Result<Option<String>> {
		let response = self
			.client
			.get(&self.endpoint)
			.query(&[("u", user_id), ("ac", account_id)])
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(CompassError::ServerError {
				status: response.status().as_u16(),
			});
		}

		let body = response.text().await?;
		if body.is_empty() {
			Ok(None)
		} else {
			Ok(Some(body))
		}
	}
}
