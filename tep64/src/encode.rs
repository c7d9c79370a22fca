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

//! Assemble content cells in the layouts the built-in handlers read.
//!
//! Mostly useful for tests and tooling; the inverse of decoding, minus any fetching.

use crate::{
	attributes::ATTRIBUTE_KEY_BITS,
	handlers::SNAKE_DATA_TAG,
	registry::{OFFCHAIN_PREFIX, ONCHAIN_PREFIX},
	AttributeKey,
};
use std::collections::BTreeMap;
use tep64_cell::{Cell, CellBuilder, CellError};

fn snake_cell(prefix: Option<u8>, bytes: &[u8]) -> Result<Cell, CellError> {
	let mut builder = CellBuilder::new();
	if let Some(prefix) = prefix {
		builder.store_u8(prefix)?;
	}
	builder.store_snake_bytes(bytes)?;
	builder.build()
}

/// Off-chain content with the URI in a snake chain hanging off the root cell.
pub fn offchain_snake(uri: &str) -> Result<Cell, CellError> {
	let mut builder = CellBuilder::new();
	builder.store_u8(OFFCHAIN_PREFIX)?.store_ref(snake_cell(None, uri.as_bytes())?)?;
	builder.build()
}

/// Off-chain content with the URI in the root cell, behind a `0x00` marker.
///
/// Fails with [`CellError::TooManyBits`] if the URI doesn't fit into one cell.
pub fn offchain_single_cell(uri: &str) -> Result<Cell, CellError> {
	let mut builder = CellBuilder::new();
	builder.store_u8(OFFCHAIN_PREFIX)?.store_u8(0x00)?.store_bytes(uri.as_bytes())?;
	builder.build()
}

/// On-chain content holding the given attribute values as snake data.
pub fn onchain<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Cell, CellError> {
	let mut entries = BTreeMap::new();
	for (name, value) in attributes {
		let mut leaf = CellBuilder::new();
		leaf.store_ref(snake_cell(Some(SNAKE_DATA_TAG), value.as_bytes())?)?;
		entries.insert(AttributeKey::from_name(name).as_bytes().to_vec(), leaf.build()?);
	}

	let mut builder = CellBuilder::new();
	builder.store_u8(ONCHAIN_PREFIX)?.store_dict(ATTRIBUTE_KEY_BITS, &entries)?;
	builder.build()
}
