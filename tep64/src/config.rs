// Copyright 2021 Parity Technologies (UK) Ltd.
// This file is part of tep64.
//
// tep64 is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// tep64 is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with tep64.  If not, see <http://www.gnu.org/licenses/>.

//! Configuration of a [`ContentDecoder`].

use crate::{
	handlers::{OffchainHandler, OnchainHandler},
	ContentDecoder, ContentHandler, DecodedContent, DefaultValues, Error, HandlerRegistry,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tep64_cell::CellSlice;
use tep64_resolver::{Fetch, HttpFetcher, UriResolver, DEFAULT_IPFS_GATEWAY};

/// The serialisable part of the decoder setup. Missing fields take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
	/// Base URL substituted for `ipfs://`.
	pub ipfs_gateway: String,
	/// Defaults for on-chain attributes, on top of the standard ones.
	pub extra_default_values: BTreeMap<String, Option<String>>,
	/// Require the `0x00` marker in front of single cell off-chain URIs.
	pub offchain_marker_check: bool,
	/// Timeout for fetching off-chain documents over HTTP. `0` disables it.
	pub http_timeout_secs: u64,
}

impl Default for DecoderConfig {
	fn default() -> Self {
		Self {
			ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
			extra_default_values: BTreeMap::new(),
			offchain_marker_check: true,
			http_timeout_secs: tep64_resolver::DEFAULT_TIMEOUT.as_secs(),
		}
	}
}

impl DecoderConfig {
	pub fn from_json(json: &str) -> Result<Self, Error> {
		Ok(serde_json::from_str(json)?)
	}

	/// The HTTP request timeout, if there is one.
	pub fn http_timeout(&self) -> Option<Duration> {
		match self.http_timeout_secs {
			0 => None,
			secs => Some(Duration::from_secs(secs)),
		}
	}
}

/// Builds a [`ContentDecoder`]. Obtained through [`ContentDecoder::builder`].
#[derive(Default)]
pub struct Builder {
	config: DecoderConfig,
	handlers: Vec<(u8, Arc<dyn ContentHandler>)>,
	fetcher: Option<Arc<dyn Fetch>>,
}

impl Builder {
	/// Replace the whole configuration. Handlers and the fetcher are left alone.
	pub fn config(mut self, config: DecoderConfig) -> Self {
		self.config = config;
		self
	}

	pub fn ipfs_gateway(mut self, gateway: impl Into<String>) -> Self {
		self.config.ipfs_gateway = gateway.into();
		self
	}

	/// Set the default of an on-chain attribute, adding the attribute if it isn't standard.
	pub fn default_value(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
		self.config.extra_default_values.insert(name.into(), value.map(str::to_string));
		self
	}

	pub fn offchain_marker_check(mut self, enabled: bool) -> Self {
		self.config.offchain_marker_check = enabled;
		self
	}

	/// Fetch off-chain documents with `fetcher` rather than over HTTP.
	pub fn fetcher(self, fetcher: impl Fetch + 'static) -> Self {
		self.shared_fetcher(Arc::new(fetcher))
	}

	pub fn shared_fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
		self.fetcher = Some(fetcher);
		self
	}

	/// Decode content starting with `prefix` using `handler`. This takes precedence over
	/// the built-in handlers and over handlers registered earlier for the same prefix.
	pub fn handler(mut self, prefix: u8, handler: impl ContentHandler + 'static) -> Self {
		self.handlers.push((prefix, Arc::new(handler)));
		self
	}

	/// Like [`Builder::handler`], for closures.
	pub fn handler_fn<F>(self, prefix: u8, handler: F) -> Self
	where
		F: Fn(&mut CellSlice<'_>) -> Result<DecodedContent, Error> + Send + Sync + 'static,
	{
		self.handler(prefix, handler)
	}

	pub fn build(self) -> Result<ContentDecoder, Error> {
		let fetcher = match self.fetcher {
			Some(fetcher) => fetcher,
			None => {
				Arc::new(HttpFetcher::with_timeout(self.config.http_timeout()).map_err(Error::Fetcher)?)
			}
		};
		let resolver = UriResolver::with_shared_fetcher(self.config.ipfs_gateway.clone(), fetcher);
		let defaults = DefaultValues::with_overrides(self.config.extra_default_values.clone());

		let mut registry = HandlerRegistry::with_builtins(
			OnchainHandler::new(defaults.clone()),
			OffchainHandler::new(resolver.clone(), self.config.offchain_marker_check),
		);
		for (prefix, handler) in self.handlers {
			if registry.insert(prefix, handler).is_some() {
				log::debug!("Custom handler replaces the handler for prefix 0x{:02x}", prefix);
			}
		}

		Ok(ContentDecoder { registry, defaults, resolver })
	}
}
