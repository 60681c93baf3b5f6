// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Visit persistence seam.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use compass_core::SessionId;

/// Persistent visit identity provided by the host platform.
///
/// The tracker reads these once at construction and calls
/// [`record_visit`](VisitStorage::record_visit) as a side effect; how
/// the values persist across launches is the host's concern.
pub trait VisitStorage: Send + Sync {
	/// Timestamp of the very first visit on this install.
	fn first_visit(&self) -> DateTime<Utc>;

	/// Session identifier persisted per logical visit.
	fn session_id(&self) -> SessionId;

	/// Records that a new visit happened.
	fn record_visit(&self);
}

/// In-memory storage for hosts without platform persistence, and tests.
#[derive(Debug)]
pub struct MemoryStorage {
	first_visit: DateTime<Utc>,
	session_id: SessionId,
	visits: AtomicU32,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self {
			first_visit: Utc::now(),
			session_id: SessionId::new(),
			visits: AtomicU32::new(0),
		}
	}

	/// Number of visits recorded so far.
	pub fn visits(&self) -> u32 {
		self.visits.load(Ordering::SeqCst)
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

impl VisitStorage for MemoryStorage {
	fn first_visit(&self) -> DateTime<Utc> {
		self.first_visit
	}

	fn session_id(&self) -> SessionId {
		self.session_id.clone()
	}

	fn record_visit(&self) {
		self.visits.fetch_add(1, Ordering::SeqCst);
	}
}
