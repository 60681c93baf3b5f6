// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK client for Compass page-view tracking.
//!
//! The SDK observes one page-view session at a time, emits periodic
//! heartbeat ("tick") payloads on an adaptive, monotonically-relaxing
//! backoff schedule, and serializes every session mutation through a
//! single background worker task so facade calls and tick execution
//! never race.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use compass::{CompassConfig, CompassTracker, MemoryStorage};
//!
//! // Construct once at app start; the worker lives for the process.
//! let tracker = CompassTracker::new(
//!     CompassConfig::new("1234"),
//!     Arc::new(MemoryStorage::new()),
//! );
//!
//! tracker.start_page_view("https://example.com/article")?;
//! tracker.track("newsletter-signup");
//! tracker.stop_tracking()?;
//! # Ok::<(), compass::CompassError>(())
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod rfv;
pub mod scheduler;
pub mod scroll;
pub mod storage;
pub mod tracker;
pub mod transport;

pub use compass_core::{
	ConversionBuffer, PageId, SessionError, SessionId, SessionState, TickPayload, UserType,
};

pub use config::{CompassConfig, DEFAULT_INGEST_URL, DEFAULT_RFV_URL};
pub use error::{CompassError, Result};
pub use rfv::{HttpRfvClient, RfvClient};
pub use scheduler::tick_deadline;
pub use scroll::{scroll_percent, ScrollSampler};
pub use storage::{MemoryStorage, VisitStorage};
pub use tracker::CompassTracker;
pub use transport::{HttpTickSender, TickSender};

/// SDK protocol version reported in the `v` payload field.
pub const COMPASS_VERSION: &str = "2.0";
