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

use crate::{dict, Cell, CellError, DictKey, MAX_BITS, MAX_REFS};
use bitvec::prelude::*;
use std::{collections::BTreeMap, sync::Arc};

/// Bytes held by each cell of a snake chain after the first one.
const SNAKE_CHUNK_BYTES: usize = MAX_BITS / 8;

/// Incrementally assembles the bits and references of a [`Cell`].
#[derive(Clone, Debug, Default)]
pub struct CellBuilder {
	bits: BitVec<u8, Msb0>,
	references: Vec<Arc<Cell>>,
}

impl CellBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of data bits stored so far.
	pub fn bit_len(&self) -> usize {
		self.bits.len()
	}

	pub fn store_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<&mut Self, CellError> {
		let total = self.bits.len() + bits.len();
		if total > MAX_BITS {
			return Err(CellError::TooManyBits { bits: total, max: MAX_BITS });
		}
		self.bits.extend_from_bitslice(bits);
		Ok(self)
	}

	pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, CellError> {
		self.store_uint(1, bit.into())
	}

	/// Store the lowest `n` bits of `value`, most significant bit first.
	pub fn store_uint(&mut self, n: usize, value: u64) -> Result<&mut Self, CellError> {
		if n > 64 {
			return Err(CellError::UintTooWide(n));
		}
		if n < 64 && value >> n != 0 {
			return Err(CellError::UintOverflow { bits: n, value });
		}
		let bytes = value.to_be_bytes();
		self.store_bits(&bytes.view_bits::<Msb0>()[64 - n..])
	}

	pub fn store_u8(&mut self, value: u8) -> Result<&mut Self, CellError> {
		self.store_uint(8, value.into())
	}

	pub fn store_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CellError> {
		self.store_bits(bytes.view_bits::<Msb0>())
	}

	pub fn store_ref(&mut self, cell: impl Into<Arc<Cell>>) -> Result<&mut Self, CellError> {
		if self.references.len() == MAX_REFS {
			return Err(CellError::TooManyReferences { refs: MAX_REFS + 1, max: MAX_REFS });
		}
		self.references.push(cell.into());
		Ok(self)
	}

	/// Append all of the bits and references of `cell` to this builder.
	pub fn append_cell(&mut self, cell: &Cell) -> Result<&mut Self, CellError> {
		self.store_bits(cell.bits())?;
		for reference in cell.references() {
			self.store_ref(reference.clone())?;
		}
		Ok(self)
	}

	/// Store `bytes` in snake format: as many whole bytes as fit in this cell, with the
	/// rest spilling into a chain of child cells linked through their first reference.
	pub fn store_snake_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CellError> {
		let head = ((MAX_BITS - self.bits.len()) / 8).min(bytes.len());
		self.store_bytes(&bytes[..head])?;

		let mut tail: Option<Cell> = None;
		for chunk in bytes[head..].chunks(SNAKE_CHUNK_BYTES).rev() {
			let mut link = CellBuilder::new();
			link.store_bytes(chunk)?;
			if let Some(next) = tail.take() {
				link.store_ref(next)?;
			}
			tail = Some(link.build()?);
		}
		if let Some(first) = tail {
			self.store_ref(first)?;
		}
		Ok(self)
	}

	/// Store a `HashmapE` dictionary with `key_bits` wide keys. The bits and references
	/// of each value cell are stored inline in the leaf of the dictionary.
	pub fn store_dict(&mut self, key_bits: usize, entries: &BTreeMap<DictKey, Cell>) -> Result<&mut Self, CellError> {
		if entries.is_empty() {
			return self.store_bit(false);
		}
		let root = dict::write_root(key_bits, entries)?;
		self.store_bit(true)?.store_ref(root)
	}

	pub fn build(&self) -> Result<Cell, CellError> {
		Cell::new(self.bits.clone(), self.references.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn uint_must_fit() {
		let mut builder = CellBuilder::new();
		assert_eq!(builder.store_uint(3, 8).unwrap_err(), CellError::UintOverflow { bits: 3, value: 8 });
		builder.store_uint(3, 7).unwrap().store_uint(64, u64::MAX).unwrap();
		assert_eq!(builder.bit_len(), 67);
	}

	#[test]
	fn capacity_is_enforced() {
		let mut builder = CellBuilder::new();
		builder.store_bytes(&[0; 127]).unwrap().store_uint(7, 0).unwrap();
		assert_eq!(builder.store_bit(true).unwrap_err(), CellError::TooManyBits { bits: 1024, max: MAX_BITS });

		let empty = Cell::default();
		for _ in 0..MAX_REFS {
			builder.store_ref(empty.clone()).unwrap();
		}
		assert!(matches!(builder.store_ref(empty), Err(CellError::TooManyReferences { .. })));
	}

	#[test]
	fn short_snake_stays_in_one_cell() {
		let mut builder = CellBuilder::new();
		builder.store_snake_bytes(b"hello").unwrap();
		let cell = builder.build().unwrap();
		assert!(cell.references().is_empty());
		assert_eq!(cell.bit_len(), 40);
	}
}
