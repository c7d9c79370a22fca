// Copyright 2019-2021 Parity Technologies (UK) Ltd.
// This file is part of tep64.
//
// tep64 is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
// tep64 is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with tep64.  If not, see <http://www.gnu.org/licenses/>.

//! Decode TEP-64 token and NFT content cells.
//!
//! The first byte of a content cell selects how the rest of it is laid out:
//!
//! - `0x00`: on-chain content, a dictionary from SHA-256 hashed attribute names to values;
//! - `0x01`: off-chain content, a URI pointing at a JSON document, which is fetched.
//!
//! Other prefixes can be given meaning by registering a [`ContentHandler`] for them.
//!
//! # Example
//!
//! ```rust
//! use tep64::{encode, ContentDecoder, DecodedContent};
//! use tep64_resolver::MemoryFetcher;
//!
//! let fetcher = MemoryFetcher::new().with_document("https://example.com/m.json", r#"{"name":"X"}"#);
//! let decoder = ContentDecoder::builder().fetcher(fetcher).build().unwrap();
//!
//! let content = encode::offchain_single_cell("https://example.com/m.json").unwrap();
//! match decoder.decode(&content).unwrap() {
//!     DecodedContent::Offchain(offchain) => assert_eq!(offchain.data, r#"{"name":"X"}"#),
//!     other => panic!("unexpected content {:?}", other),
//! }
//! ```

#![forbid(unsafe_code)]

mod attributes;
mod config;
mod error;
mod handlers;
mod registry;
mod types;

pub mod encode;

pub use attributes::{Attribute, AttributeKey, DefaultValues, ATTRIBUTE_KEY_BITS};
pub use config::{Builder, DecoderConfig};
pub use error::Error;
pub use handlers::{OffchainHandler, OnchainHandler};
pub use registry::{ContentHandler, HandlerRegistry, OFFCHAIN_PREFIX, ONCHAIN_PREFIX};
pub use types::{CustomContent, DecodedContent, Metadata, OffchainContent, OnchainContent};

pub use tep64_cell::{Cell, CellSlice};
pub use tep64_resolver::UriResolver;

/// Decodes content cells by dispatching on their prefix byte.
///
/// A decoder holds no mutable state, so one instance can be shared between threads.
#[derive(Debug, Clone)]
pub struct ContentDecoder {
	registry: HandlerRegistry,
	defaults: DefaultValues,
	resolver: UriResolver,
}

impl ContentDecoder {
	/// Create a decoder with only the built-in handlers, fetching over HTTP.
	pub fn new(config: DecoderConfig) -> Result<Self, Error> {
		Self::builder().config(config).build()
	}

	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Decode a content cell from its first bit.
	pub fn decode(&self, content: &Cell) -> Result<DecodedContent, Error> {
		self.decode_slice(&mut content.parser())
	}

	/// Decode content starting at the current position of `slice`. Exactly one prefix
	/// byte is read before the matching handler takes over.
	pub fn decode_slice(&self, slice: &mut CellSlice<'_>) -> Result<DecodedContent, Error> {
		let prefix = slice.load_u8()?;
		log::trace!("Content prefix 0x{:02x}", prefix);

		let handler = self.registry.get(prefix).ok_or(Error::InvalidPrefix(prefix))?;
		handler.decode(slice)
	}

	pub fn registry(&self) -> &HandlerRegistry {
		&self.registry
	}

	/// Attributes read from on-chain content, with their defaults.
	pub fn default_values(&self) -> &DefaultValues {
		&self.defaults
	}

	pub fn resolver(&self) -> &UriResolver {
		&self.resolver
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use tep64_cell::CellBuilder;
	use tep64_resolver::MemoryFetcher;

	const URI: &str = "https://example.com/m.json";
	const BODY: &str = r#"{"name":"X"}"#;
	const NO_ATTRIBUTES: [(&str, &str); 0] = [];

	fn decoder_with(fetcher: MemoryFetcher) -> ContentDecoder {
		ContentDecoder::builder().fetcher(fetcher).build().unwrap()
	}

	fn tagged(tag: &'static str) -> impl Fn(&mut CellSlice<'_>) -> Result<DecodedContent, Error> {
		move |_: &mut CellSlice<'_>| -> Result<DecodedContent, Error> {
			Ok(CustomContent::new(tag, serde_json::Value::Null).into())
		}
	}

	fn prefixed(prefix: u8) -> Cell {
		let mut builder = CellBuilder::new();
		builder.store_u8(prefix).unwrap();
		builder.build().unwrap()
	}

	#[test]
	fn end_to_end_offchain() {
		let _ = pretty_env_logger::try_init();
		let decoder = decoder_with(MemoryFetcher::new().with_document(URI, BODY));

		let decoded = decoder.decode(&encode::offchain_single_cell(URI).unwrap()).unwrap();
		assert_eq!(decoded, OffchainContent { uri: URI.into(), data: BODY.into() }.into());
		assert_eq!(
			serde_json::to_value(&decoded).unwrap(),
			serde_json::json!({ "type": "offchain", "uri": URI, "data": BODY })
		);
	}

	#[test]
	fn offchain_layouts_decode_to_the_same_uri() {
		let decoder = decoder_with(MemoryFetcher::new().with_document(URI, BODY));
		let single = decoder.decode(&encode::offchain_single_cell(URI).unwrap()).unwrap();
		let snake = decoder.decode(&encode::offchain_snake(URI).unwrap()).unwrap();
		assert_eq!(single, snake);
	}

	#[test]
	fn ipfs_uris_are_fetched_through_the_gateway() {
		let fetcher = Arc::new(MemoryFetcher::new().with_document("https://gateway.example/ipfs/bafy/meta.json", BODY));
		let decoder = ContentDecoder::builder()
			.ipfs_gateway("https://gateway.example/ipfs/")
			.shared_fetcher(fetcher.clone())
			.build()
			.unwrap();

		let decoded = decoder.decode(&encode::offchain_snake("ipfs://bafy/meta.json").unwrap()).unwrap();
		assert_eq!(decoded.as_offchain().unwrap().uri, "ipfs://bafy/meta.json");
		assert_eq!(decoded.as_offchain().unwrap().data, BODY);
		assert_eq!(fetcher.requests(), vec!["https://gateway.example/ipfs/bafy/meta.json".to_string()]);
	}

	#[test]
	fn unknown_prefix_is_rejected() {
		let decoder = decoder_with(MemoryFetcher::new());
		for prefix in [0x02u8, 0x10, 0xff] {
			let err = decoder.decode(&prefixed(prefix)).unwrap_err();
			assert!(matches!(err, Error::InvalidPrefix(p) if p == prefix));
			assert!(err.is_invalid_prefix());
		}
	}

	#[test]
	fn empty_cell_has_no_prefix() {
		let decoder = decoder_with(MemoryFetcher::new());
		let err = decoder.decode(&Cell::default()).unwrap_err();
		assert!(matches!(err, Error::Cell(tep64_cell::CellError::NotEnoughBits { requested: 8, remaining: 0 })));
	}

	#[test]
	fn offchain_prefix_alone_is_not_fetched() {
		let fetcher = Arc::new(MemoryFetcher::new().with_document(URI, BODY));
		let decoder = ContentDecoder::builder().shared_fetcher(fetcher.clone()).build().unwrap();
		let err = decoder.decode(&prefixed(OFFCHAIN_PREFIX)).unwrap_err();
		assert!(matches!(err, Error::Cell(tep64_cell::CellError::NotEnoughBits { requested: 8, remaining: 0 })));
		assert!(fetcher.requests().is_empty());
	}

	#[test]
	fn every_prefix_reaches_its_handler() {
		let decoder = ContentDecoder::builder()
			.fetcher(MemoryFetcher::new())
			.handler_fn(0x02, tagged("two"))
			.handler_fn(0x7f, tagged("seven-f"))
			.build()
			.unwrap();
		assert_eq!(decoder.registry().prefixes(), vec![0x00, 0x01, 0x02, 0x7f]);

		assert_eq!(decoder.decode(&prefixed(0x02)).unwrap().kind(), "two");
		assert_eq!(decoder.decode(&prefixed(0x7f)).unwrap().kind(), "seven-f");
		assert_eq!(decoder.decode(&encode::onchain(NO_ATTRIBUTES).unwrap()).unwrap().kind(), "onchain");
	}

	#[test]
	fn custom_handlers_override_builtins() {
		let decoder = ContentDecoder::builder()
			.fetcher(MemoryFetcher::new())
			.handler_fn(ONCHAIN_PREFIX, tagged("replaced"))
			.build()
			.unwrap();
		assert_eq!(decoder.decode(&encode::onchain([("name", "X")]).unwrap()).unwrap().kind(), "replaced");
	}

	#[test]
	fn handlers_start_right_after_the_prefix() {
		let decoder = ContentDecoder::builder()
			.fetcher(MemoryFetcher::new())
			.handler_fn(0x05, |slice| {
				let value = slice.load_uint(16)?;
				Ok(CustomContent::new("number", value.into()).into())
			})
			.build()
			.unwrap();

		let mut builder = CellBuilder::new();
		builder.store_u8(0x05).unwrap().store_uint(16, 0xbeef).unwrap();
		let decoded = decoder.decode(&builder.build().unwrap()).unwrap();
		assert_eq!(decoded, CustomContent::new("number", serde_json::json!(0xbeef)).into());
	}

	#[test]
	fn custom_handler_errors_are_passed_through() {
		let decoder = ContentDecoder::builder()
			.fetcher(MemoryFetcher::new())
			.handler_fn(0x03, |_| Err(Error::custom("unsupported layout")))
			.build()
			.unwrap();
		let err = decoder.decode(&prefixed(0x03)).unwrap_err();
		assert_eq!(err.to_string(), "Content handler failed: unsupported layout");
	}

	#[test]
	fn onchain_defaults_and_overrides() {
		let decoder = ContentDecoder::builder().fetcher(MemoryFetcher::new()).default_value("decimals", Some("6")).build().unwrap();

		let decoded = decoder.decode(&encode::onchain(NO_ATTRIBUTES).unwrap()).unwrap();
		let metadata = &decoded.as_onchain().unwrap().metadata;
		assert_eq!(metadata, &decoder.default_values().to_metadata());
		assert_eq!(metadata["decimals"].as_deref(), Some("6"));
		assert_eq!(metadata.len(), 9);

		let decoded = decoder.decode(&encode::onchain([("decimals", "2")]).unwrap()).unwrap();
		assert_eq!(decoded.as_onchain().unwrap().metadata["decimals"].as_deref(), Some("2"));
	}

	#[test]
	fn decoding_is_deterministic() {
		let decoder = decoder_with(MemoryFetcher::new());
		let content = encode::onchain([("name", "Pablocoin"), ("symbol", "PBC")]).unwrap();
		assert_eq!(decoder.decode(&content).unwrap(), decoder.decode(&content).unwrap());
	}
}
