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

use crate::{dict, Cell, CellError, DictKey, MAX_SNAKE_DEPTH};
use bitvec::prelude::*;
use std::collections::BTreeMap;

/// A read cursor over a single [`Cell`].
///
/// Every `load_*` method consumes data from the front of the cell. Child cells are
/// read by calling [`CellSlice::load_ref`], which hands back a fresh cursor over the
/// next unread reference.
#[derive(Clone, Debug)]
pub struct CellSlice<'a> {
	cell: &'a Cell,
	bit_pos: usize,
	ref_pos: usize,
}

impl<'a> CellSlice<'a> {
	pub fn new(cell: &'a Cell) -> Self {
		Self { cell, bit_pos: 0, ref_pos: 0 }
	}

	/// How many data bits are left to read.
	pub fn remaining_bits(&self) -> usize {
		self.cell.bit_len() - self.bit_pos
	}

	/// How many child references are left to read.
	pub fn remaining_refs(&self) -> usize {
		self.cell.references().len() - self.ref_pos
	}

	fn take_bits(&mut self, n: usize) -> Result<&'a BitSlice<u8, Msb0>, CellError> {
		let remaining = self.remaining_bits();
		if n > remaining {
			return Err(CellError::NotEnoughBits { requested: n, remaining });
		}
		let bits = &self.cell.bits()[self.bit_pos..self.bit_pos + n];
		self.bit_pos += n;
		Ok(bits)
	}

	pub fn load_bit(&mut self) -> Result<bool, CellError> {
		Ok(self.take_bits(1)?[0])
	}

	/// Read `n` bits as a big-endian unsigned integer. `n` must be at most 64.
	pub fn load_uint(&mut self, n: usize) -> Result<u64, CellError> {
		if n > 64 {
			return Err(CellError::UintTooWide(n));
		}
		if n == 0 {
			return Ok(0);
		}
		Ok(self.take_bits(n)?.load_be::<u64>())
	}

	pub fn load_u8(&mut self) -> Result<u8, CellError> {
		Ok(self.take_bits(8)?.load_be::<u8>())
	}

	/// Read `n` whole bytes.
	pub fn load_bytes(&mut self, n: usize) -> Result<Vec<u8>, CellError> {
		let bits = self.take_bits(n * 8)?;
		Ok(bits.chunks_exact(8).map(|byte| byte.load_be::<u8>()).collect())
	}

	/// Read the rest of the data bits of this cell as bytes. The remaining bit count
	/// must be a multiple of 8.
	pub fn load_remaining_bytes(&mut self) -> Result<Vec<u8>, CellError> {
		let remaining = self.remaining_bits();
		if remaining % 8 != 0 {
			return Err(CellError::UnalignedString(remaining));
		}
		self.load_bytes(remaining / 8)
	}

	/// Read the rest of the data bits of this cell as a UTF-8 string.
	pub fn load_string(&mut self) -> Result<String, CellError> {
		Ok(String::from_utf8(self.load_remaining_bytes()?)?)
	}

	/// Move on to the next child cell, returning a cursor positioned at its start.
	pub fn load_ref(&mut self) -> Result<CellSlice<'a>, CellError> {
		let cell = self.cell.references().get(self.ref_pos).ok_or(CellError::NoMoreReferences)?;
		self.ref_pos += 1;
		Ok(CellSlice::new(cell))
	}

	/// Read bytes stored in "snake" format: the rest of this cell, followed by the whole
	/// of the first child, followed by the whole of its first child, and so on until a
	/// cell without children is reached.
	pub fn load_snake_bytes(&mut self) -> Result<Vec<u8>, CellError> {
		let mut bytes = self.load_remaining_bytes()?;
		if self.remaining_refs() == 0 {
			return Ok(bytes);
		}

		let mut link = self.load_ref()?;
		for depth in 1..=MAX_SNAKE_DEPTH {
			bytes.extend(link.load_remaining_bytes()?);
			if link.remaining_refs() == 0 {
				log::trace!("Snake data of {} bytes spread over {} cells", bytes.len(), depth + 1);
				return Ok(bytes);
			}
			link = link.load_ref()?;
		}
		Err(CellError::SnakeTooDeep(MAX_SNAKE_DEPTH))
	}

	/// Like [`CellSlice::load_snake_bytes`], but decode the result as UTF-8.
	pub fn load_snake_string(&mut self) -> Result<String, CellError> {
		Ok(String::from_utf8(self.load_snake_bytes()?)?)
	}

	/// Read a `HashmapE` dictionary with `key_bits` wide unsigned integer keys.
	///
	/// Each value is returned as a cursor positioned at the start of the value inside
	/// its leaf cell; how the value is laid out is up to the caller.
	pub fn load_dict(&mut self, key_bits: usize) -> Result<BTreeMap<DictKey, CellSlice<'a>>, CellError> {
		let mut entries = BTreeMap::new();
		if self.load_bit()? {
			let root = self.load_ref()?;
			dict::read_edge(root, key_bits, BitVec::new(), &mut entries)?;
		}
		log::trace!("Loaded dictionary with {} entries", entries.len());
		Ok(entries)
	}
}
