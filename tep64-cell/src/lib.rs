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

//! In-memory TON cell trees and the cursor used to read them.
//!
//! A [`Cell`] holds up to 1023 data bits and up to 4 references to child cells.
//! Reading is done through a [`CellSlice`], which tracks how many bits and references
//! of a single cell have been consumed so far. Building is done with a [`CellBuilder`].
//!
//! Serialising cells to and from the bag-of-cells wire format is not handled here;
//! callers hand us cells that have already been deserialised.

#![forbid(unsafe_code)]

mod builder;
mod cell;
mod dict;
mod error;
mod slice;

pub use builder::CellBuilder;
pub use cell::Cell;
pub use error::CellError;
pub use slice::CellSlice;

/// Maximum number of data bits a single cell can hold.
pub const MAX_BITS: usize = 1023;

/// Maximum number of child references a single cell can hold.
pub const MAX_REFS: usize = 4;

/// Upper bound on the number of linked cells followed when reassembling a snake string.
pub const MAX_SNAKE_DEPTH: usize = 1024;

/// A dictionary key, as the big-endian bytes of the unsigned integer key.
///
/// Keys whose width is not a multiple of 8 are left padded with zero bits, so the
/// natural ordering of keys of the same width is the numeric ordering.
pub type DictKey = Vec<u8>;
