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

//! Binary prefix tree dictionaries (`Hashmap n X`).
//!
//! Every edge starts with a label holding some of the key bits, in one of three forms:
//!
//! - `hml_short$0`: the label length in unary, then the label bits;
//! - `hml_long$10`: the label length in `ceil(log2(m + 1))` bits, then the label bits;
//! - `hml_same$11`: a single repeated bit, then the label length.
//!
//! After the label, an edge with no key bits left is a leaf holding the value; otherwise
//! it forks into two child edges (next key bit 0 on the left, 1 on the right).

use crate::{Cell, CellBuilder, CellError, CellSlice, DictKey};
use bitvec::prelude::*;
use std::collections::BTreeMap;

type KeyBits = BitVec<u8, Msb0>;

/// Number of bits needed to store a label length of at most `max`.
fn label_len_bits(max: usize) -> usize {
	(usize::BITS - max.leading_zeros()) as usize
}

fn pack_key(bits: &BitSlice<u8, Msb0>) -> DictKey {
	let pad = (8 - bits.len() % 8) % 8;
	let mut packed = KeyBits::repeat(false, pad);
	packed.extend_from_bitslice(bits);
	packed.into_vec()
}

fn unpack_key(key: &DictKey, key_bits: usize) -> Result<KeyBits, CellError> {
	let expected = (key_bits + 7) / 8;
	if key.len() != expected {
		return Err(CellError::InvalidKeyLength { bits: key_bits, expected, found: key.len() });
	}
	let bits = key.view_bits::<Msb0>();
	Ok(bits[bits.len() - key_bits..].to_bitvec())
}

fn read_label(slice: &mut CellSlice<'_>, max: usize, key: &mut KeyBits) -> Result<usize, CellError> {
	let len = if !slice.load_bit()? {
		let mut len = 0;
		while slice.load_bit()? {
			len += 1;
			if len > max {
				return Err(CellError::InvalidDictLabel { len, max });
			}
		}
		for _ in 0..len {
			key.push(slice.load_bit()?);
		}
		len
	} else if !slice.load_bit()? {
		let len = slice.load_uint(label_len_bits(max))? as usize;
		if len > max {
			return Err(CellError::InvalidDictLabel { len, max });
		}
		for _ in 0..len {
			key.push(slice.load_bit()?);
		}
		len
	} else {
		let bit = slice.load_bit()?;
		let len = slice.load_uint(label_len_bits(max))? as usize;
		if len > max {
			return Err(CellError::InvalidDictLabel { len, max });
		}
		key.resize(key.len() + len, bit);
		len
	};
	Ok(len)
}

/// Read one edge with `remaining` key bits left to resolve, collecting leaves into `out`.
///
/// Recursion depth is bounded by the key width, since every fork consumes a key bit.
pub(crate) fn read_edge<'a>(
	mut slice: CellSlice<'a>,
	remaining: usize,
	mut key: KeyBits,
	out: &mut BTreeMap<DictKey, CellSlice<'a>>,
) -> Result<(), CellError> {
	let remaining = remaining - read_label(&mut slice, remaining, &mut key)?;
	if remaining == 0 {
		log::trace!("Dictionary leaf with key 0x{}", hex::encode(pack_key(&key)));
		out.insert(pack_key(&key), slice);
		return Ok(());
	}

	let left = slice.load_ref()?;
	let right = slice.load_ref()?;

	let mut left_key = key.clone();
	left_key.push(false);
	read_edge(left, remaining - 1, left_key, out)?;

	key.push(true);
	read_edge(right, remaining - 1, key, out)
}

fn write_label(builder: &mut CellBuilder, label: &BitSlice<u8, Msb0>, max: usize) -> Result<(), CellError> {
	let len_bits = label_len_bits(max);
	if 2 * label.len() + 2 <= 2 + len_bits + label.len() {
		builder.store_bit(false)?;
		for _ in 0..label.len() {
			builder.store_bit(true)?;
		}
		builder.store_bit(false)?;
	} else {
		builder.store_bit(true)?.store_bit(false)?.store_uint(len_bits, label.len() as u64)?;
	}
	builder.store_bits(label)?;
	Ok(())
}

fn write_edge(entries: &[(KeyBits, &Cell)], remaining: usize) -> Result<Cell, CellError> {
	let (first, value) = &entries[0];
	let common = entries[1..]
		.iter()
		.map(|(key, _)| first.iter().by_vals().zip(key.iter().by_vals()).take_while(|(a, b)| a == b).count())
		.fold(remaining, usize::min);

	let mut builder = CellBuilder::new();
	write_label(&mut builder, &first[..common], remaining)?;

	if common == remaining {
		builder.append_cell(value)?;
		return builder.build();
	}

	let (left, right): (Vec<_>, Vec<_>) = entries
		.iter()
		.map(|(key, value)| (key[common..].to_bitvec(), *value))
		.partition(|(suffix, _)| !suffix[0]);

	builder.store_ref(write_edge(&skip_fork_bit(left), remaining - common - 1)?)?;
	builder.store_ref(write_edge(&skip_fork_bit(right), remaining - common - 1)?)?;
	builder.build()
}

fn skip_fork_bit<'c>(side: Vec<(KeyBits, &'c Cell)>) -> Vec<(KeyBits, &'c Cell)> {
	side.into_iter().map(|(suffix, value)| (suffix[1..].to_bitvec(), value)).collect()
}

/// Serialise a non-empty dictionary, returning the root edge cell.
pub(crate) fn write_root(key_bits: usize, entries: &BTreeMap<DictKey, Cell>) -> Result<Cell, CellError> {
	let entries = entries
		.iter()
		.map(|(key, value)| Ok((unpack_key(key, key_bits)?, value)))
		.collect::<Result<Vec<_>, CellError>>()?;
	write_edge(&entries, key_bits)
}
