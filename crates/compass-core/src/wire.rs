// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Form encoding for the ingest wire format.
//!
//! Payload fields travel as `key=value` pairs, percent-escaped and
//! joined with `&`, POSTed as the request body.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped in values: alphanumerics plus `-._*`.
/// Spaces survive escaping and are then emitted as `+`.
const FORM_SAFE: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'*')
	.remove(b' ');

/// Percent-escapes a single value, with spaces as `+`.
pub fn escape(value: &str) -> String {
	utf8_percent_encode(value, FORM_SAFE)
		.to_string()
		.replace(' ', "+")
}

/// Reverses [`escape`].
pub fn unescape(value: &str) -> String {
	let spaced = value.replace('+', " ");
	percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Encodes key/value pairs into a form body. Keys are emitted verbatim.
pub fn encode_pairs(pairs: &[(&str, String)]) -> String {
	pairs
		.iter()
		.map(|(key, value)| format!("{key}={}", escape(value)))
		.collect::<Vec<_>>()
		.join("&")
}

/// Decodes a form body back into key/value pairs.
pub fn decode_form(body: &str) -> Vec<(String, String)> {
	body.split('&')
		.filter(|pair| !pair.is_empty())
		.map(|pair| match pair.split_once('=') {
			Some((key, value)) => (key.to_string(), unescape(value)),
			None => (pair.to_string(), String::new()),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn spaces_become_plus() {
		assert_eq!(escape("front page news"), "front+page+news");
	}

	#[test]
	fn unreserved_characters_pass_through() {
		assert_eq!(escape("a-b.c_d*e42"), "a-b.c_d*e42");
	}

	#[test]
	fn reserved_characters_are_escaped() {
		assert_eq!(escape("https://x/a?q=1&r=2"), "https%3A%2F%2Fx%2Fa%3Fq%3D1%26r%3D2");
		assert_eq!(escape("a+b"), "a%2Bb");
	}

	#[test]
	fn unescape_reverses_escape() {
		for value in ["front page", "https://x/a?q=1", "a+b c", "100%"] {
			assert_eq!(unescape(&escape(value)), value);
		}
	}

	#[test]
	fn encode_pairs_joins_with_ampersand() {
		let body = encode_pairs(&[
			("a", "0".to_string()),
			("url", "https://x/a".to_string()),
			("conv", "signup,purchase".to_string()),
		]);
		assert_eq!(body, "a=0&url=https%3A%2F%2Fx%2Fa&conv=signup%2Cpurchase");
	}

	#[test]
	fn decode_form_recovers_pairs() {
		let decoded = decode_form("a=0&url=https%3A%2F%2Fx%2Fa&note=front+page");
		assert_eq!(
			decoded,
			vec![
				("a".to_string(), "0".to_string()),
				("url".to_string(), "https://x/a".to_string()),
				("note".to_string(), "front page".to_string()),
			]
		);
	}

	#[test]
	fn decode_form_tolerates_empty_body() {
		assert!(decode_form("").is_empty());
	}

	proptest! {
		#[test]
		fn escape_roundtrip(value in "\\PC{0,64}") {
			prop_assert_eq!(unescape(&escape(&value)), value);
		}

		#[test]
		fn pairs_roundtrip(values in proptest::collection::vec("[ -~]{0,32}", 1..8)) {
			let pairs: Vec<(&str, String)> = values.iter().map(|v| ("k", v.clone())).collect();
			let decoded = decode_form(&encode_pairs(&pairs));
			prop_assert_eq!(decoded.len(), pairs.len());
			for ((_, sent), (key, received)) in pairs.iter().zip(decoded) {
				prop_assert_eq!(key, "k");
				prop_assert_eq!(sent, &received);
			}
		}
	}
}
