// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Adaptive tick scheduling.

use std::time::Duration;

use tokio::time::Instant;

/// Seconds to wait before the tick at the given index fires.
///
/// Early ticks are frequent, then the interval relaxes and plateaus:
/// non-decreasing over the whole index range.
pub fn tick_deadline(tik: u32) -> Duration {
	let secs = match tik {
		0..=1 => 5,
		2 => 10,
		3..=19 => 15,
		_ => 20,
	};
	Duration::from_secs(secs)
}

/// Deadline state for the next tick operation.
///
/// Idle (no deadline armed) or Scheduled. [`cancel`](Self::cancel) is
/// safe at any time, including when nothing is scheduled, and always
/// returns to Idle; a later [`schedule`](Self::schedule) re-arms from
/// the current instant.
#[derive(Debug, Default)]
pub(crate) struct TickScheduler {
	next_at: Option<Instant>,
}

impl TickScheduler {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Arms the deadline for the tick at the given index.
	pub(crate) fn schedule(&mut self, tik: u32) {
		self.next_at = Some(Instant::now() + tick_deadline(tik));
	}

	/// Disarms any pending deadline.
	pub(crate) fn cancel(&mut self) {
		self.next_at = None;
	}

	pub(crate) fn is_scheduled(&self) -> bool {
		self.next_at.is_some()
	}

	pub(crate) fn next_at(&self) -> Option<Instant> {
		self.next_at
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn deadline_matches_the_table_at_boundaries() {
		assert_eq!(tick_deadline(0), Duration::from_secs(5));
		assert_eq!(tick_deadline(1), Duration::from_secs(5));
		assert_eq!(tick_deadline(2), Duration::from_secs(10));
		assert_eq!(tick_deadline(3), Duration::from_secs(15));
		assert_eq!(tick_deadline(19), Duration::from_secs(15));
		assert_eq!(tick_deadline(20), Duration::from_secs(20));
		assert_eq!(tick_deadline(21), Duration::from_secs(20));
	}

	#[test]
	fn scheduler_starts_idle() {
		let scheduler = TickScheduler::new();
		assert!(!scheduler.is_scheduled());
		assert_eq!(scheduler.next_at(), None);
	}

	#[test]
	fn cancel_is_safe_when_idle() {
		let mut scheduler = TickScheduler::new();
		scheduler.cancel();
		assert!(!scheduler.is_scheduled());
	}

	#[tokio::test(start_paused = true)]
	async fn schedule_arms_the_table_deadline() {
		let mut scheduler = TickScheduler::new();
		let now = Instant::now();

		scheduler.schedule(0);
		assert_eq!(scheduler.next_at(), Some(now + Duration::from_secs(5)));

		scheduler.schedule(2);
		assert_eq!(scheduler.next_at(), Some(now + Duration::from_secs(10)));

		scheduler.cancel();
		assert_eq!(scheduler.next_at(), None);
	}

	proptest! {
		#[test]
		fn deadline_is_non_decreasing(tik in 0u32..1000) {
			prop_assert!(tick_deadline(tik) <= tick_deadline(tik + 1));
		}

		#[test]
		fn deadline_is_within_the_plateau(tik: u32) {
			let d = tick_deadline(tik);
			prop_assert!(d >= Duration::from_secs(5));
			prop_assert!(d <= Duration::from_secs(20));
		}
	}
}
