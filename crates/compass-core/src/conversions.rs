// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Conversion names accumulated between ticks.

use std::sync::{Mutex, PoisonError};

/// Ordered buffer of conversion event names.
///
/// Names are appended from facade calls and drained atomically by the
/// tick operation: a name pushed concurrently with a drain lands in the
/// current drain or the next one, never lost and never duplicated.
/// Duplicates are allowed; append order is preserved.
#[derive(Debug, Default)]
pub struct ConversionBuffer {
	inner: Mutex<Vec<String>>,
}

impl ConversionBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a conversion name.
	pub fn push(&self, name: impl Into<String>) {
		self.lock().push(name.into());
	}

	/// Returns all buffered names and clears the buffer atomically.
	pub fn drain(&self) -> Vec<String> {
		std::mem::take(&mut *self.lock())
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;

	#[test]
	fn push_preserves_append_order() {
		let buffer = ConversionBuffer::new();
		buffer.push("signup");
		buffer.push("purchase");
		assert_eq!(buffer.drain(), vec!["signup", "purchase"]);
	}

	#[test]
	fn drain_clears_the_buffer() {
		let buffer = ConversionBuffer::new();
		buffer.push("signup");
		assert_eq!(buffer.drain().len(), 1);
		assert!(buffer.is_empty());
		assert!(buffer.drain().is_empty());
	}

	#[test]
	fn duplicates_are_kept() {
		let buffer = ConversionBuffer::new();
		buffer.push("click");
		buffer.push("click");
		assert_eq!(buffer.drain(), vec!["click", "click"]);
	}

	#[test]
	fn concurrent_pushes_are_never_lost_or_duplicated() {
		let buffer = Arc::new(ConversionBuffer::new());
		let writers: Vec<_> = (0..4)
			.map(|w| {
				let buffer = Arc::clone(&buffer);
				std::thread::spawn(move || {
					for i in 0..250 {
						buffer.push(format!("conv-{w}-{i}"));
					}
				})
			})
			.collect();

		let drainer = {
			let buffer = Arc::clone(&buffer);
			std::thread::spawn(move || {
				let mut drained = Vec::new();
				for _ in 0..50 {
					drained.extend(buffer.drain());
					std::thread::yield_now();
				}
				drained
			})
		};

		for writer in writers {
			writer.join().unwrap();
		}
		let mut all = drainer.join().unwrap();
		all.extend(buffer.drain());

		assert_eq!(all.len(), 1000);
		let unique: std::collections::HashSet<_> = all.iter().collect();
		assert_eq!(unique.len(), 1000);
	}
}
