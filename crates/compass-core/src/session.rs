// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session state for the active page view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;

/// Wire value recorded for `ut` when the user identity is cleared.
///
/// The ingest endpoint expects the literal `"0"` rather than an absent
/// field once a previously-identified user goes away.
pub const CLEARED_USER_TYPE: &str = "0";

/// Unique identifier for a page view.
///
/// Regenerated every time a non-null page URL is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(pub Uuid);

impl PageId {
	#[must_use]
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for PageId {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Display for PageId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for PageId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}

/// Unique identifier for a logical visit.
///
/// Renewed once per visit, not per page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
	#[must_use]
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for SessionId {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Display for SessionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::str::FromStr for SessionId {
	type Err = uuid::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}

/// The identity class of the current reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
	/// Signed-in user
	Logged,
	/// Paying subscriber
	Paid,
}

impl std::fmt::Display for UserType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			UserType::Logged => write!(f, "logged"),
			UserType::Paid => write!(f, "paid"),
		}
	}
}

impl std::str::FromStr for UserType {
	type Err = SessionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"logged" => Ok(UserType::Logged),
			"paid" => Ok(UserType::Paid),
			_ => Err(SessionError::InvalidUserType(s.to_string())),
		}
	}
}

/// Mutable record of the current page-view session.
///
/// Derived fields (`page_id`, `session_id`, `visit_duration`) are
/// recomputed by the setters that own them, so every mutation is an
/// explicit commit with no hidden cascades. Invariant: `page_id` is
/// non-null iff `page_url` is non-null.
#[derive(Debug, Clone)]
pub struct SessionState {
	account_id: Option<String>,
	session_id: SessionId,
	page_url: Option<String>,
	page_id: Option<PageId>,
	user_id: Option<String>,
	user_type: Option<String>,
	first_visit: Option<DateTime<Utc>>,
	current_visit: Option<DateTime<Utc>>,
	start_page: Option<DateTime<Utc>>,
	current: Option<DateTime<Utc>>,
	tik: u32,
	pages_viewed: u32,
	sdk_version: String,
}

impl SessionState {
	/// Creates an empty session reporting the given SDK version.
	pub fn new(sdk_version: impl Into<String>) -> Self {
		Self {
			account_id: None,
			session_id: SessionId::new(),
			page_url: None,
			page_id: None,
			user_id: None,
			user_type: None,
			first_visit: None,
			current_visit: None,
			start_page: None,
			current: None,
			tik: 0,
			pages_viewed: 0,
			sdk_version: sdk_version.into(),
		}
	}

	/// Swaps the active page.
	///
	/// A non-null URL issues a fresh [`PageId`], resets the tick index to
	/// zero and bumps `pages_viewed`; a null URL clears the page id.
	pub fn set_page_url(&mut self, url: Option<String>) {
		match url {
			Some(url) => {
				self.page_url = Some(url);
				self.page_id = Some(PageId::new());
				self.tik = 0;
				self.pages_viewed += 1;
			}
			None => {
				self.page_url = None;
				self.page_id = None;
			}
		}
	}

	/// Marks the start of a logical visit, renewing the session id.
	pub fn begin_visit(&mut self, now: DateTime<Utc>) {
		self.current_visit = Some(now);
		self.session_id = SessionId::new();
	}

	/// Overrides the session id with the persisted one.
	pub fn set_session_id(&mut self, session_id: SessionId) {
		self.session_id = session_id;
	}

	pub fn set_account_id(&mut self, account_id: Option<String>) {
		self.account_id = account_id;
	}

	pub fn set_first_visit(&mut self, first_visit: DateTime<Utc>) {
		self.first_visit = Some(first_visit);
	}

	/// Marks the start of the current page view.
	pub fn start_page(&mut self, now: DateTime<Utc>) {
		self.start_page = Some(now);
	}

	/// Moves the session clock forward; called once per tick.
	pub fn touch(&mut self, now: DateTime<Utc>) {
		self.current = Some(now);
	}

	/// Advances the tick index after a tick operation completes.
	pub fn advance_tick(&mut self) {
		self.tik += 1;
	}

	pub fn set_user_id(&mut self, user_id: Option<String>) {
		self.user_id = user_id;
	}

	/// Sets the user type; clearing it records [`CLEARED_USER_TYPE`].
	pub fn set_user_type(&mut self, user_type: Option<UserType>) {
		self.user_type = Some(match user_type {
			Some(user_type) => user_type.to_string(),
			None => CLEARED_USER_TYPE.to_owned(),
		});
	}

	/// Elapsed whole seconds between page start and the session clock.
	pub fn visit_duration(&self) -> Option<i64> {
		Some(self.current?.timestamp() - self.start_page?.timestamp())
	}

	pub fn account_id(&self) -> Option<&str> {
		self.account_id.as_deref()
	}

	pub fn session_id(&self) -> &SessionId {
		&self.session_id
	}

	pub fn page_url(&self) -> Option<&str> {
		self.page_url.as_deref()
	}

	pub fn page_id(&self) -> Option<&PageId> {
		self.page_id.as_ref()
	}

	pub fn user_id(&self) -> Option<&str> {
		self.user_id.as_deref()
	}

	pub fn user_type(&self) -> Option<&str> {
		self.user_type.as_deref()
	}

	pub fn first_visit(&self) -> Option<DateTime<Utc>> {
		self.first_visit
	}

	pub fn current_visit(&self) -> Option<DateTime<Utc>> {
		self.current_visit
	}

	pub fn start_page_date(&self) -> Option<DateTime<Utc>> {
		self.start_page
	}

	pub fn current_date(&self) -> Option<DateTime<Utc>> {
		self.current
	}

	pub fn tik(&self) -> u32 {
		self.tik
	}

	pub fn pages_viewed(&self) -> u32 {
		self.pages_viewed
	}

	pub fn sdk_version(&self) -> &str {
		&self.sdk_version
	}
}
