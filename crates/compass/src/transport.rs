// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tick payload transport.

use async_trait::async_trait;
use compass_core::TickPayload;

use crate::error::{CompassError, Result};

/// Delivers a serialized tick payload to the ingest endpoint.
///
/// Fire-and-forget from the scheduler's perspective: delivery failures
/// are logged by the caller and never retried.
#[async_trait]
pub trait TickSender: Send + Sync {
	/// Sends one tick payload.
	async fn send_tick(&self, payload: &TickPayload) -> Result<()>;
}

/// HTTP transport POSTing the form-encoded payload body.
pub struct HttpTickSender {
	client: reqwest::Client,
	endpoint: String,
}

impl HttpTickSender {
	pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
		Self {
			client,
			endpoint: endpoint.into(),
		}
	}
}

#[async_trait]
impl TickSender for HttpTickSender {
	async fn send_tick(&self, payload: &TickPayload) -> Result<()> {
		let response = self
			.client
			.post(&self.endpoint)
			.header(
				reqwest::header::CONTENT_TYPE,
				"application/x-www-form-urlencoded",
			)
			.body(payload.encode())
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(CompassError::ServerError {
				status: response.status().as_u16(),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use compass_core::SessionState;
	use tokio_test::assert_ok;
	use wiremock::matchers::{body_string_contains, header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn payload() -> TickPayload {
		let mut state = SessionState::new("2.0");
		state.set_account_id(Some("1234".to_string()));
		state.begin_visit(chrono::Utc::now());
		state.set_page_url(Some("https://example.com/a".to_string()));
		let now = chrono::Utc::now();
		state.start_page(now);
		state.touch(now);
		TickPayload::snapshot(&state, Some(42.0), vec!["signup".to_string()])
	}

	#[tokio::test]
	async fn posts_the_form_encoded_body() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/ingest.php"))
			.and(header("content-type", "application/x-www-form-urlencoded"))
			.and(body_string_contains("a=0"))
			.and(body_string_contains("ac=1234"))
			.and(body_string_contains("sc=42"))
			.and(body_string_contains("conv=signup"))
			.and(body_string_contains("url=https%3A%2F%2Fexample.com%2Fa"))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let sender = HttpTickSender::new(
			reqwest::Client::new(),
			format!("{}/ingest.php", server.uri()),
		);
		assert_ok!(sender.send_tick(&payload()).await);
	}

	#[tokio::test]
	async fn non_success_status_is_an_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(500))
			.mount(&server)
			.await;

		let sender = HttpTickSender::new(reqwest::Client::new(), server.uri());
		let err = sender.send_tick(&payload()).await.unwrap_err();
		assert!(matches!(err, CompassError::ServerError { status: 500 }));
	}

	#[tokio::test]
	async fn connection_failure_is_an_error() {
		// Nothing listens on this port.
		let sender = HttpTickSender::new(reqwest::Client::new(), "http://127.0.0.1:9/ingest");
		let err = sender.send_tick(&payload()).await.unwrap_err();
		assert!(matches!(err, CompassError::RequestFailed(_)));
	}
}
