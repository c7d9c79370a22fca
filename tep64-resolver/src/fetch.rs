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

use crate::FetchError;
use std::{
	collections::HashMap,
	sync::{Mutex, PoisonError},
	time::Duration,
};

/// Timeout applied to a whole request by [`HttpFetcher::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can GET a URL and hand back the body as text.
///
/// Implementations report non-2xx responses as errors.
pub trait Fetch: Send + Sync {
	fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher. A single attempt is made per request; there is no retrying.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
	client: reqwest::blocking::Client,
}

impl HttpFetcher {
	pub fn new() -> Result<Self, FetchError> {
		Self::with_timeout(DEFAULT_TIMEOUT)
	}

	/// Requests time out after `timeout`; `None` lets them run for as long as it takes.
	pub fn with_timeout(timeout: impl Into<Option<Duration>>) -> Result<Self, FetchError> {
		let client = reqwest::blocking::Client::builder().timeout(timeout).build().map_err(FetchError::Client)?;
		Ok(Self { client })
	}
}

impl Fetch for HttpFetcher {
	fn get(&self, url: &str) -> Result<String, FetchError> {
		let response =
			self.client.get(url).send().map_err(|source| FetchError::Transport { url: url.to_string(), source })?;

		let status = response.status();
		log::trace!("GET {} -> {}", url, status);
		if !status.is_success() {
			return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
		}

		response.text().map_err(|source| FetchError::Transport { url: url.to_string(), source })
	}
}

/// Serves documents from memory and remembers every URL it was asked for.
///
/// Unknown URLs are answered with a 404 status error.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
	documents: HashMap<String, String>,
	requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_document(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
		self.documents.insert(url.into(), body.into());
		self
	}

	/// URLs requested so far, oldest first.
	pub fn requests(&self) -> Vec<String> {
		self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
	}
}

impl Fetch for MemoryFetcher {
	fn get(&self, url: &str) -> Result<String, FetchError> {
		self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(url.to_string());
		self.documents.get(url).cloned().ok_or_else(|| FetchError::Status { url: url.to_string(), status: 404 })
	}
}
