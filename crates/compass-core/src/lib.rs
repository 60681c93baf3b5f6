// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Compass page-view tracking SDK.
//!
//! This crate holds the pure, runtime-free half of the SDK:
//! - [`SessionState`]: the mutable record of the active page view
//! - [`ConversionBuffer`]: conversion names accumulated between ticks
//! - [`TickPayload`]: the point-in-time snapshot sent on every tick
//! - [`wire`]: the `key=value` form encoding used by the ingest endpoint
//!
//! The scheduling and transport machinery lives in the `compass` crate.

pub mod conversions;
pub mod error;
pub mod payload;
pub mod session;
pub mod wire;

pub use conversions::ConversionBuffer;
pub use error::SessionError;
pub use payload::TickPayload;
pub use session::{PageId, SessionId, SessionState, UserType, CLEARED_USER_TYPE};
