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

use tep64_cell::CellError;
use tep64_resolver::FetchError;
use thiserror::Error;

/// Everything that can go wrong while parsing content.
#[derive(Debug, Error)]
pub enum Error {
	#[error("Invalid content prefix 0x{0:02x}: no handler is registered for it")]
	InvalidPrefix(u8),
	#[error("Invalid prefix 0x{0:02x} for single cell off-chain content, expected 0x00")]
	InvalidOffchainMarker(u8),
	#[error("Error fetching data for {uri}: {source}")]
	DataFetching {
		uri: String,
		#[source]
		source: FetchError,
	},
	#[error(transparent)]
	Cell(#[from] CellError),
	#[error("Content handler failed: {0}")]
	Custom(#[source] Box<dyn std::error::Error + Send + Sync>),
	#[error("Invalid decoder configuration: {0}")]
	Config(#[from] serde_json::Error),
	#[error("Cannot set up the HTTP fetcher: {0}")]
	Fetcher(#[source] FetchError),
}

impl Error {
	/// Wrap an error raised by a custom content handler.
	pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
		Error::Custom(err.into())
	}

	/// True for errors caused by a prefix or marker byte that doesn't select a known layout.
	pub fn is_invalid_prefix(&self) -> bool {
		matches!(self, Error::InvalidPrefix(_) | Error::InvalidOffchainMarker(_))
	}
}
