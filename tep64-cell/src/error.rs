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

use thiserror::Error;

/// Errors that can occur while reading or building cells.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
	#[error("Cannot load {requested} bits, only {remaining} bits remain in the cell")]
	NotEnoughBits { requested: usize, remaining: usize },
	#[error("Cannot load a reference, no references remain in the cell")]
	NoMoreReferences,
	#[error("Cannot read {0} bits into a 64 bit integer")]
	UintTooWide(usize),
	#[error("Value {value} does not fit into {bits} bits")]
	UintOverflow { bits: usize, value: u64 },
	#[error("Cell would hold {bits} bits, but at most {max} are allowed")]
	TooManyBits { bits: usize, max: usize },
	#[error("Cell would hold {refs} references, but at most {max} are allowed")]
	TooManyReferences { refs: usize, max: usize },
	#[error("Cannot read a string from {0} bits, the length is not a multiple of 8")]
	UnalignedString(usize),
	#[error("String is not valid UTF-8: {0}")]
	InvalidUtf8(#[from] std::string::FromUtf8Error),
	#[error("Snake string links more than {0} cells")]
	SnakeTooDeep(usize),
	#[error("Dictionary label of {len} bits is longer than the {max} key bits left")]
	InvalidDictLabel { len: usize, max: usize },
	#[error("Dictionary key of {found} bytes cannot encode a {bits} bit key ({expected} bytes expected)")]
	InvalidKeyLength { bits: usize, expected: usize, found: usize },
	#[error("Cell data of {bytes} bytes is too short for {bits} bits")]
	ShortData { bytes: usize, bits: usize },
	#[error("Invalid hex cell data: {0}")]
	Hex(#[from] hex::FromHexError),
}
