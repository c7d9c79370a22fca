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

use crate::{
	attributes::ATTRIBUTE_KEY_BITS, ContentHandler, DecodedContent, DefaultValues, Error, Metadata, OnchainContent,
};
use tep64_cell::{CellError, CellSlice};

/// Leading byte of a value stored as one snake string.
pub(crate) const SNAKE_DATA_TAG: u8 = 0x00;
/// Leading byte of a value split into a dictionary of numbered chunks.
pub(crate) const CHUNKED_DATA_TAG: u8 = 0x01;
/// Width of the chunk index keys of chunked values.
const CHUNK_INDEX_BITS: usize = 32;

/// Looks up each known attribute in an on-chain content dictionary.
#[derive(Debug, Clone)]
pub struct OnchainHandler {
	defaults: DefaultValues,
}

impl OnchainHandler {
	pub fn new(defaults: DefaultValues) -> Self {
		Self { defaults }
	}
}

impl ContentHandler for OnchainHandler {
	fn decode(&self, slice: &mut CellSlice<'_>) -> Result<DecodedContent, Error> {
		let dict = slice.load_dict(ATTRIBUTE_KEY_BITS)?;

		let mut metadata = Metadata::new();
		let mut found = 0;
		for attribute in self.defaults.iter() {
			let value = match dict.get(&attribute.key().as_bytes()[..]) {
				Some(value) => {
					found += 1;
					Some(read_content_data(value.clone())?)
				}
				None => attribute.default_value().map(str::to_string),
			};
			metadata.insert(attribute.name().to_string(), value);
		}

		if found < dict.len() {
			log::trace!("Ignoring {} dictionary entries with unknown attribute keys", dict.len() - found);
		}
		Ok(OnchainContent { metadata }.into())
	}
}

/// Decode a dictionary value into text.
///
/// Values normally live in their own cell behind a reference and start with a tag byte
/// picking between snake and chunked data. A chunked value holds nothing but the tag and
/// the dictionary root bit, so a `0x01` byte followed by more data is not taken as a tag.
/// Values without a recognised tag are read as plain snake data.
fn read_content_data(mut slice: CellSlice<'_>) -> Result<String, Error> {
	if slice.remaining_bits() == 0 && slice.remaining_refs() == 1 {
		slice = slice.load_ref()?;
	}

	let tag = if slice.remaining_bits() >= 8 { Some(slice.clone().load_u8()?) } else { None };
	let bytes = match tag {
		Some(SNAKE_DATA_TAG) => {
			slice.load_u8()?;
			slice.load_snake_bytes()?
		}
		Some(CHUNKED_DATA_TAG) if slice.remaining_bits() == 8 + 1 => {
			slice.load_u8()?;
			let mut bytes = Vec::new();
			for (_, mut chunk) in slice.load_dict(CHUNK_INDEX_BITS)? {
				bytes.extend(chunk.load_ref()?.load_snake_bytes()?);
			}
			bytes
		}
		_ => slice.load_snake_bytes()?,
	};

	String::from_utf8(bytes).map_err(|e| Error::Cell(CellError::from(e)))
}
