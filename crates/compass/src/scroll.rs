// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scroll-depth sampling seam.

use async_trait::async_trait;

/// Reports the current scroll depth of the attached surface.
///
/// Implemented by the host over whatever scroll surface it renders; the
/// measurement may hop onto a UI-affinity context as long as the result
/// comes back in a single async round-trip. `None` means no surface is
/// currently measurable and the tick omits the field.
#[async_trait]
pub trait ScrollSampler: Send + Sync {
	/// Returns the current scroll depth as a rounded 0-100 percentage.
	async fn sample_scroll_percent(&self) -> Option<f32>;
}

/// Converts a raw scroll measurement into the rounded 0-100 percentage
/// the ingest payload expects.
///
/// `offset` is the scroll position, `inset_top` the top content inset
/// and `content_height` the total scrollable height.
pub fn scroll_percent(offset: f32, inset_top: f32, content_height: f32) -> f32 {
	if content_height <= 0.0 {
		return 0.0;
	}
	let scrolled = offset + inset_top;
	let fraction = (scrolled / content_height).clamp(0.0, 1.0);
	(fraction * 100.0).round()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn negative_offsets_clamp_to_zero() {
		assert_eq!(scroll_percent(-250.0, 0.0, 1000.0), 0.0);
	}

	#[test]
	fn overscroll_clamps_to_one_hundred() {
		assert_eq!(scroll_percent(1500.0, 0.0, 1000.0), 100.0);
	}

	#[test]
	fn inset_counts_as_scrolled_distance() {
		assert_eq!(scroll_percent(400.0, 100.0, 1000.0), 50.0);
	}

	#[test]
	fn result_is_rounded() {
		assert_eq!(scroll_percent(333.0, 0.0, 1000.0), 33.0);
		assert_eq!(scroll_percent(337.0, 0.0, 1000.0), 34.0);
	}

	#[test]
	fn zero_height_surface_reads_zero() {
		assert_eq!(scroll_percent(100.0, 0.0, 0.0), 0.0);
	}
}
