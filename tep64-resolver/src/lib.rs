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

//! Resolves the URIs found in off-chain content to the text they point at.
//!
//! `ipfs://` URIs are rewritten to go through an HTTP gateway; everything else is
//! fetched as is. The actual network access sits behind the [`Fetch`] trait so that
//! it can be swapped out (see [`MemoryFetcher`]).

#![forbid(unsafe_code)]

mod error;
mod fetch;

pub use error::FetchError;
pub use fetch::{Fetch, HttpFetcher, MemoryFetcher, DEFAULT_TIMEOUT};

use std::{borrow::Cow, fmt, sync::Arc};

/// Scheme prefix of content addressed URIs.
pub const IPFS_SCHEME: &str = "ipfs://";

/// Gateway used for `ipfs://` URIs unless another one is configured.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Turns content URIs into fetchable URLs and fetches them.
#[derive(Clone)]
pub struct UriResolver {
	gateway: String,
	fetcher: Arc<dyn Fetch>,
}

impl UriResolver {
	pub fn new(gateway: impl Into<String>, fetcher: impl Fetch + 'static) -> Self {
		Self::with_shared_fetcher(gateway, Arc::new(fetcher))
	}

	pub fn with_shared_fetcher(gateway: impl Into<String>, fetcher: Arc<dyn Fetch>) -> Self {
		Self { gateway: gateway.into(), fetcher }
	}

	/// The base URL that replaces `ipfs://`.
	pub fn gateway(&self) -> &str {
		&self.gateway
	}

	/// The URL that will actually be requested for `uri`.
	///
	/// Only a leading `ipfs://` is replaced; the rest of the URI is appended to the
	/// gateway untouched.
	pub fn resolve_url<'u>(&self, uri: &'u str) -> Cow<'u, str> {
		match uri.strip_prefix(IPFS_SCHEME) {
			Some(path) => Cow::Owned(format!("{}{}", self.gateway, path)),
			None => Cow::Borrowed(uri),
		}
	}

	/// Fetch the document `uri` points at, returning the response body as text.
	pub fn fetch(&self, uri: &str) -> Result<String, FetchError> {
		let url = self.resolve_url(uri);
		log::debug!("Fetching {} from {}", uri, url);
		self.fetcher.get(&url)
	}
}

impl fmt::Debug for UriResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("UriResolver").field("gateway", &self.gateway).finish_non_exhaustive()
	}
}
