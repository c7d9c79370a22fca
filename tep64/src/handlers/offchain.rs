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

use crate::{ContentHandler, DecodedContent, Error, OffchainContent};
use tep64_cell::CellSlice;
use tep64_resolver::UriResolver;

/// Marker expected in front of a URI stored in a single cell.
const SINGLE_CELL_MARKER: u8 = 0x00;

/// Reads the URI of off-chain content and fetches the document behind it.
#[derive(Debug, Clone)]
pub struct OffchainHandler {
	resolver: UriResolver,
	marker_check: bool,
}

impl OffchainHandler {
	/// With `marker_check` set, a URI held in a single cell must be preceded by a `0x00` byte.
	/// Without it, the rest of the cell is read as the URI straight away.
	pub fn new(resolver: UriResolver, marker_check: bool) -> Self {
		Self { resolver, marker_check }
	}

	fn read_uri(&self, slice: &mut CellSlice<'_>) -> Result<String, Error> {
		if slice.remaining_refs() > 0 {
			return Ok(slice.load_snake_string()?);
		}

		// NOTE: the outer prefix was already 0x01 at this point, so this second byte is
		// not part of the standard layout. It is kept since existing parsers enforce it.
		if self.marker_check {
			let marker = slice.load_u8()?;
			if marker != SINGLE_CELL_MARKER {
				return Err(Error::InvalidOffchainMarker(marker));
			}
		}
		Ok(slice.load_string()?)
	}
}

impl ContentHandler for OffchainHandler {
	fn decode(&self, slice: &mut CellSlice<'_>) -> Result<DecodedContent, Error> {
		let uri = self.read_uri(slice)?;
		log::debug!("Off-chain content at {}", uri);
		match self.resolver.fetch(&uri) {
			Ok(data) => Ok(OffchainContent { uri, data }.into()),
			Err(source) => Err(Error::DataFetching { uri, source }),
		}
	}
}
