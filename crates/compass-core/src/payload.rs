// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The tick payload: a point-in-time snapshot of the session.

use serde::Serialize;

use crate::session::{PageId, SessionId, SessionState};
use crate::wire;

/// One heartbeat describing session progress, flattened for the wire.
///
/// Field names mirror the ingest endpoint's short keys. Nullable fields
/// encode as absent, never as empty strings.
#[derive(Debug, Clone, Serialize)]
pub struct TickPayload {
	/// Tick index for the current page, 0-based.
	#[serde(rename = "a")]
	pub tik: u32,
	/// Whole seconds since the page view started.
	#[serde(rename = "l", skip_serializing_if = "Option::is_none")]
	pub visit_duration: Option<i64>,
	/// Scroll depth, 0-100, absent when no scroll surface is attached.
	#[serde(rename = "sc", skip_serializing_if = "Option::is_none")]
	pub scroll_percent: Option<f32>,
	/// Comma-joined conversion names since the previous tick.
	#[serde(rename = "conv", skip_serializing_if = "Option::is_none")]
	pub conversions: Option<String>,
	#[serde(rename = "url", skip_serializing_if = "Option::is_none")]
	pub page_url: Option<String>,
	#[serde(rename = "ac", skip_serializing_if = "Option::is_none")]
	pub account_id: Option<String>,
	#[serde(rename = "u", skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	#[serde(rename = "ut", skip_serializing_if = "Option::is_none")]
	pub user_type: Option<String>,
	/// Page-start timestamp, epoch seconds.
	#[serde(rename = "ps", skip_serializing_if = "Option::is_none")]
	pub start_page_ts: Option<i64>,
	/// First-visit timestamp, epoch seconds.
	#[serde(rename = "fv", skip_serializing_if = "Option::is_none")]
	pub first_visit_ts: Option<i64>,
	/// Snapshot timestamp, epoch seconds.
	#[serde(rename = "n", skip_serializing_if = "Option::is_none")]
	pub current_ts: Option<i64>,
	/// Current-visit timestamp, epoch seconds.
	#[serde(rename = "t", skip_serializing_if = "Option::is_none")]
	pub current_visit_ts: Option<i64>,
	#[serde(rename = "p", skip_serializing_if = "Option::is_none")]
	pub page_id: Option<PageId>,
	#[serde(rename = "v")]
	pub sdk_version: String,
	#[serde(rename = "s")]
	pub session_id: SessionId,
}

impl TickPayload {
	/// Builds a payload from the session snapshot, a sampled scroll
	/// percentage and the conversions drained for this tick.
	///
	/// Pure transformation: reads its inputs once, no side effects.
	pub fn snapshot(
		state: &SessionState,
		scroll_percent: Option<f32>,
		conversions: Vec<String>,
	) -> Self {
		Self {
			tik: state.tik(),
			visit_duration: state.visit_duration(),
			scroll_percent,
			conversions: if conversions.is_empty() {
				None
			} else {
				Some(conversions.join(","))
			},
			page_url: state.page_url().map(str::to_owned),
			account_id: state.account_id().map(str::to_owned),
			user_id: state.user_id().map(str::to_owned),
			user_type: state.user_type().map(str::to_owned),
			start_page_ts: state.start_page_date().map(|d| d.timestamp()),
			first_visit_ts: state.first_visit().map(|d| d.timestamp()),
			current_ts: state.current_date().map(|d| d.timestamp()),
			current_visit_ts: state.current_visit().map(|d| d.timestamp()),
			page_id: state.page_id().copied(),
			sdk_version: state.sdk_version().to_owned(),
			session_id: state.session_id().clone(),
		}
	}

	/// Ordered wire pairs; absent fields are skipped entirely.
	pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![("a", self.tik.to_string())];
		if let Some(l) = self.visit_duration {
			pairs.push(("l", l.to_string()));
		}
		if let Some(sc) = self.scroll_percent {
			pairs.push(("sc", sc.to_string()));
		}
		if let Some(conv) = &self.conversions {
			pairs.push(("conv", conv.clone()));
		}
		if let Some(url) = &self.page_url {
			pairs.push(("url", url.clone()));
		}
		if let Some(ac) = &self.account_id {
			pairs.push(("ac", ac.clone()));
		}
		if let Some(u) = &self.user_id {
			pairs.push(("u", u.clone()));
		}
		if let Some(ut) = &self.user_type {
			pairs.push(("ut", ut.clone()));
		}
		if let Some(ps) = self.start_page_ts {
			pairs.push(("ps", ps.to_string()));
		}
		if let Some(fv) = self.first_visit_ts {
			pairs.push(("fv", fv.to_string()));
		}
		if let Some(n) = self.current_ts {
			pairs.push(("n", n.to_string()));
		}
		if let Some(t) = self.current_visit_ts {
			pairs.push(("t", t.to_string()));
		}
		if let Some(p) = &self.page_id {
			pairs.push(("p", p.to_string()));
		}
		pairs.push(("v", self.sdk_version.clone()));
		pairs.push(("s", self.session_id.to_string()));
		pairs
	}

	/// Encodes the payload as the form body the ingest endpoint expects.
	pub fn encode(&self) -> String {
		wire::encode_pairs(&self.to_pairs())
	}
}
