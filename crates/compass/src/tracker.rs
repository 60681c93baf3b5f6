// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Page-view tracking facade and its background worker.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use compass_core::{ConversionBuffer, SessionState, TickPayload, UserType};

use crate::config::CompassConfig;
use crate::error::{CompassError, Result};
use crate::rfv::{HttpRfvClient, RfvClient};
use crate::scheduler::TickScheduler;
use crate::scroll::ScrollSampler;
use crate::storage::VisitStorage;
use crate::transport::{HttpTickSender, TickSender};
use crate::{http, COMPASS_VERSION};

/// Command sent from the facade to the worker task.
enum TrackerCommand {
	StartPageView {
		url: String,
		scroll: Option<Arc<dyn ScrollSampler>>,
	},
	StopTracking,
	SetUserId(Option<String>),
	SetUserType(Option<UserType>),
	GetRfv(oneshot::Sender<Option<String>>),
}

/// Cloneable handle to the page-view tracker.
///
/// All session mutation is forwarded to one background worker task, so
/// facade calls and tick execution are serialized through a single
/// execution context and never race on session state. Ticks run on the
/// worker strictly one at a time and in index order.
#[derive(Clone)]
pub struct CompassTracker {
	commands: mpsc::UnboundedSender<TrackerCommand>,
	conversions: Arc<ConversionBuffer>,
}

impl CompassTracker {
	/// Creates a tracker with the default HTTP transport and RFV client.
	///
	/// Must be called within a tokio runtime. Construct once at app
	/// start; the worker task lives for the rest of the process, so no
	/// teardown is required.
	pub fn new(config: CompassConfig, storage: Arc<dyn VisitStorage>) -> Self {
		let client = http::new_client();
		let sender = Arc::new(HttpTickSender::new(client.clone(), config.ingest_url.clone()));
		let rfv = Arc::new(HttpRfvClient::new(client, config.rfv_url.clone()));
		Self::with_parts(config, storage, sender, rfv)
	}

	/// Creates a tracker with injected transport and RFV lookup.
	pub fn with_parts(
		config: CompassConfig,
		storage: Arc<dyn VisitStorage>,
		sender: Arc<dyn TickSender>,
		rfv: Arc<dyn RfvClient>,
	) -> Self {
		let (commands, receiver) = mpsc::unbounded_channel();
		let conversions = Arc::new(ConversionBuffer::new());

		storage.record_visit();
		let mut state = SessionState::new(COMPASS_VERSION);
		state.set_account_id(config.account_id);
		state.set_first_visit(storage.first_visit());
		state.begin_visit(Utc::now());
		state.set_session_id(storage.session_id());

		let worker = Worker {
			state,
			scheduler: TickScheduler::new(),
			conversions: Arc::clone(&conversions),
			scroll: None,
			sender,
			rfv,
			commands: receiver,
		};
		tokio::spawn(worker.run());

		Self {
			commands,
			conversions,
		}
	}

	/// Starts tracking a page view, replacing any active one.
	///
	/// Any pending or queued ticks of the previous page are discarded
	/// before the new schedule starts at tick index zero.
	pub fn start_page_view(&self, url: impl Into<String>) -> Result<()> {
		self.send(TrackerCommand::StartPageView {
			url: url.into(),
			scroll: None,
		})
	}

	/// Starts tracking a page view with a scroll surface attached.
	///
	/// The sampler stays attached across subsequent page views until
	/// [`stop_tracking`](Self::stop_tracking) releases it.
	pub fn start_page_view_with_scroll(
		&self,
		url: impl Into<String>,
		scroll: Arc<dyn ScrollSampler>,
	) -> Result<()> {
		self.send(TrackerCommand::StartPageView {
			url: url.into(),
			scroll: Some(scroll),
		})
	}

	/// Stops tracking the active page view.
	///
	/// Cancels the tick schedule and releases the scroll surface.
	pub fn stop_tracking(&self) -> Result<()> {
		self.send(TrackerCommand::StopTracking)
	}

	/// Sets the user identifier reported in tick payloads.
	pub fn set_user_id(&self, user_id: Option<String>) -> Result<()> {
		self.send(TrackerCommand::SetUserId(user_id))
	}

	/// Sets the user type reported in tick payloads.
	pub fn set_user_type(&self, user_type: Option<UserType>) -> Result<()> {
		self.send(TrackerCommand::SetUserType(user_type))
	}

	/// Records a conversion event; delivered with the next tick.
	pub fn track(&self, conversion: impl Into<String>) {
		self.conversions.push(conversion);
	}

	/// Fetches the recency-frequency-value segment for the current user.
	///
	/// Resolves to `None` when no user id or account id is set, and on
	/// lookup failure. Never touches the tick schedule.
	pub async fn get_rfv(&self) -> Result<Option<String>> {
		let (reply, response) = oneshot::channel();
		self.send(TrackerCommand::GetRfv(reply))?;
		response.await.map_err(|_| CompassError::TrackerClosed)
	}

	fn send(&self, command: TrackerCommand) -> Result<()> {
		self.commands
			.send(command)
			.map_err(|_| CompassError::TrackerClosed)
	}
}

/// The worker task owning the session state and the tick schedule.
struct Worker {
	state: SessionState,
	scheduler: TickScheduler,
	conversions: Arc<ConversionBuffer>,
	scroll: Option<Arc<dyn ScrollSampler>>,
	sender: Arc<dyn TickSender>,
	rfv: Arc<dyn RfvClient>,
	commands: mpsc::UnboundedReceiver<TrackerCommand>,
}

impl Worker {
	async fn run(mut self) {
		info!(session_id = %self.state.session_id(), "compass tracker started");
		loop {
			let next_at = self.scheduler.next_at();
			tokio::select! {
				command = self.commands.recv() => match command {
					Some(command) => self.handle(command),
					// All handles dropped; nothing can re-arm the
					// schedule, so stop the worker.
					None => break,
				},
				_ = sleep_until_deadline(next_at), if next_at.is_some() => {
					self.run_tick().await;
				}
			}
		}
		debug!("compass tracker stopped");
	}

	fn handle(&mut self, command: TrackerCommand) {
		match command {
			TrackerCommand::StartPageView { url, scroll } => {
				if let Some(scroll) = scroll {
					self.scroll = Some(scroll);
				}
				self.restart(Some(url));
				self.start();
			}
			TrackerCommand::StopTracking => {
				self.restart(None);
				self.scroll = None;
			}
			TrackerCommand::SetUserId(user_id) => self.state.set_user_id(user_id),
			TrackerCommand::SetUserType(user_type) => self.state.set_user_type(user_type),
			TrackerCommand::GetRfv(reply) => self.get_rfv(reply),
		}
	}

	/// Cancels any pending tick and swaps the active page.
	fn restart(&mut self, page_url: Option<String>) {
		self.scheduler.cancel();
		self.state.set_page_url(page_url);
	}

	/// Arms the first tick of the active page; no-op without one.
	fn start(&mut self) {
		if self.state.page_url().is_none() {
			return;
		}
		self.state.start_page(Utc::now());
		self.scheduler.schedule(self.state.tik());
		debug!(page_id = ?self.state.page_id(), "page view started");
	}

	/// One tick operation: snapshot the session clock, sample scroll,
	/// drain conversions, hand the payload to transport, then advance
	/// the index and re-arm. Transport is fire-and-forget; completion
	/// of the tick operation itself is what triggers rescheduling.
	async fn run_tick(&mut self) {
		if self.state.page_url().is_none() {
			self.scheduler.cancel();
			return;
		}

		self.state.touch(Utc::now());
		let scroll_percent = match &self.scroll {
			Some(sampler) => sampler.sample_scroll_percent().await,
			None => None,
		};
		let conversions = self.conversions.drain();
		let payload = TickPayload::snapshot(&self.state, scroll_percent, conversions);
		debug!(tik = payload.tik, "tick");

		let sender = Arc::clone(&self.sender);
		tokio::spawn(async move {
			// A failed send skips this one heartbeat; the schedule
			// continues regardless.
			if let Err(error) = sender.send_tick(&payload).await {
				warn!(error = %error, tik = payload.tik, "failed to deliver tick");
			}
		});

		self.state.advance_tick();
		self.scheduler.schedule(self.state.tik());
	}

	fn get_rfv(&self, reply: oneshot::Sender<Option<String>>) {
		let (user_id, account_id) = match (self.state.user_id(), self.state.account_id()) {
			(Some(user_id), Some(account_id)) => (user_id.to_owned(), account_id.to_owned()),
			_ => {
				let _ = reply.send(None);
				return;
			}
		};

		let rfv = Arc::clone(&self.rfv);
		tokio::spawn(async move {
			let segment = match rfv.fetch_rfv(&user_id, &account_id).await {
				Ok(segment) => segment,
				Err(error) => {
					warn!(error = %error, "RFV lookup failed");
					None
				}
			};
			let _ = reply.send(segment);
		});
	}
}

async fn sleep_until_deadline(at: Option<tokio::time::Instant>) {
	if let Some(at) = at {
		tokio::time::sleep_until(at).await;
	}
}
