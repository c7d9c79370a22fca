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

use crate::{CellError, CellSlice, MAX_BITS, MAX_REFS};
use bitvec::prelude::*;
use std::sync::Arc;

/// A single cell: a short bitstring plus references to child cells.
///
/// Cells are immutable once created and are shared between parents through [`Arc`],
/// so a tree can be handed to several readers at once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
	bits: BitVec<u8, Msb0>,
	references: Vec<Arc<Cell>>,
}

impl Cell {
	/// Create a cell from its data bits and child references, checking the cell limits.
	pub fn new(bits: BitVec<u8, Msb0>, references: Vec<Arc<Cell>>) -> Result<Self, CellError> {
		if bits.len() > MAX_BITS {
			return Err(CellError::TooManyBits { bits: bits.len(), max: MAX_BITS });
		}
		if references.len() > MAX_REFS {
			return Err(CellError::TooManyReferences { refs: references.len(), max: MAX_REFS });
		}
		Ok(Self { bits, references })
	}

	/// Create a cell from hex encoded data, of which only the first `bit_len` bits are used.
	///
	/// This is handy for reproducing cells that were dumped from an existing bag of cells.
	pub fn from_hex(data: &str, bit_len: usize, references: Vec<Arc<Cell>>) -> Result<Self, CellError> {
		let bytes = hex::decode(data.strip_prefix("0x").unwrap_or(data))?;
		if bytes.len() * 8 < bit_len {
			return Err(CellError::ShortData { bytes: bytes.len(), bits: bit_len });
		}
		let mut bits = BitVec::<u8, Msb0>::from_vec(bytes);
		bits.truncate(bit_len);
		Self::new(bits, references)
	}

	/// Number of data bits held by this cell.
	pub fn bit_len(&self) -> usize {
		self.bits.len()
	}

	pub fn bits(&self) -> &BitSlice<u8, Msb0> {
		&self.bits
	}

	pub fn references(&self) -> &[Arc<Cell>] {
		&self.references
	}

	/// Start reading this cell from its first bit and first reference.
	pub fn parser(&self) -> CellSlice<'_> {
		CellSlice::new(self)
	}
}
