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

use crate::{DecodedContent, Error, OffchainHandler, OnchainHandler};
use std::{collections::HashMap, fmt, sync::Arc};
use tep64_cell::CellSlice;

/// Prefix of content stored in an on-chain dictionary.
pub const ONCHAIN_PREFIX: u8 = 0x00;
/// Prefix of content stored behind a URI.
pub const OFFCHAIN_PREFIX: u8 = 0x01;

/// Decodes the content that follows a particular prefix byte.
///
/// The slice handed to [`ContentHandler::decode`] is positioned just after the prefix.
/// Any closure with a matching signature is a handler, too.
pub trait ContentHandler: Send + Sync {
	fn decode(&self, slice: &mut CellSlice<'_>) -> Result<DecodedContent, Error>;
}

impl<F> ContentHandler for F
where
	F: Fn(&mut CellSlice<'_>) -> Result<DecodedContent, Error> + Send + Sync,
{
	fn decode(&self, slice: &mut CellSlice<'_>) -> Result<DecodedContent, Error> {
		self(slice)
	}
}

/// Content handlers by prefix.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
	handlers: HashMap<u8, Arc<dyn ContentHandler>>,
}

impl HandlerRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry holding just the two standard layouts.
	pub fn with_builtins(onchain: OnchainHandler, offchain: OffchainHandler) -> Self {
		let mut registry = Self::new();
		registry.insert(ONCHAIN_PREFIX, Arc::new(onchain));
		registry.insert(OFFCHAIN_PREFIX, Arc::new(offchain));
		registry
	}

	/// Register `handler` for `prefix`, returning the handler it replaces, if any.
	pub fn insert(&mut self, prefix: u8, handler: Arc<dyn ContentHandler>) -> Option<Arc<dyn ContentHandler>> {
		self.handlers.insert(prefix, handler)
	}

	pub fn get(&self, prefix: u8) -> Option<&dyn ContentHandler> {
		self.handlers.get(&prefix).map(|handler| &**handler)
	}

	pub fn contains(&self, prefix: u8) -> bool {
		self.handlers.contains_key(&prefix)
	}

	/// Registered prefixes, in ascending order.
	pub fn prefixes(&self) -> Vec<u8> {
		let mut prefixes: Vec<u8> = self.handlers.keys().copied().collect();
		prefixes.sort_unstable();
		prefixes
	}
}

impl fmt::Debug for HandlerRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerRegistry").field("prefixes", &self.prefixes()).finish()
	}
}
