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

//! Attribute names, the dictionary keys derived from them, and their default values.

use crate::types::Metadata;
use phf::phf_ordered_map;
use sha2::{Digest, Sha256};
use std::fmt;

/// Width of the keys of an on-chain content dictionary.
pub const ATTRIBUTE_KEY_BITS: usize = 256;

/// Attributes every token may carry, with the value used when the content omits them.
static STANDARD_ATTRIBUTES: phf::OrderedMap<&'static str, Option<&'static str>> = phf_ordered_map! {
	"uri" => None,
	"name" => None,
	"description" => None,
	"image" => None,
	"image_data" => None,
	"symbol" => None,
	"decimals" => Some("9"),
	"amount_style" => Some("n"),
	"render_type" => Some("currency"),
};

/// The SHA-256 hash of an attribute name, used as its key in on-chain dictionaries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::From, derive_more::Into)]
pub struct AttributeKey([u8; 32]);

impl AttributeKey {
	pub fn from_name(name: &str) -> Self {
		Self(Sha256::digest(name.as_bytes()).into())
	}

	/// Big-endian bytes of the 256 bit key.
	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}
}

impl fmt::Display for AttributeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(self.0))
	}
}

impl fmt::Debug for AttributeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "AttributeKey({})", self)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
	name: String,
	key: AttributeKey,
	default: Option<String>,
}

impl Attribute {
	fn new(name: String, default: Option<String>) -> Self {
		let key = AttributeKey::from_name(&name);
		Self { name, key, default }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn key(&self) -> &AttributeKey {
		&self.key
	}

	pub fn default_value(&self) -> Option<&str> {
		self.default.as_deref()
	}
}

/// The attributes looked up in on-chain content, in a fixed order, with their defaults.
///
/// Starts out as the nine standard attributes; overrides replace the default of an
/// attribute with the same name or add a new attribute at the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultValues {
	attributes: Vec<Attribute>,
}

impl Default for DefaultValues {
	fn default() -> Self {
		let attributes = STANDARD_ATTRIBUTES
			.entries()
			.map(|(name, default)| Attribute::new(name.to_string(), default.map(str::to_string)))
			.collect();
		Self { attributes }
	}
}

impl DefaultValues {
	pub fn with_overrides<I, K>(overrides: I) -> Self
	where
		I: IntoIterator<Item = (K, Option<String>)>,
		K: Into<String>,
	{
		let mut values = Self::default();
		for (name, default) in overrides {
			values.set(name.into(), default);
		}
		values
	}

	fn set(&mut self, name: String, default: Option<String>) {
		match self.attributes.iter_mut().find(|attribute| attribute.name == name) {
			Some(attribute) => attribute.default = default,
			None => self.attributes.push(Attribute::new(name, default)),
		}
	}

	/// The default for `name`; `None` if the attribute isn't known at all.
	pub fn get(&self, name: &str) -> Option<Option<&str>> {
		self.attributes.iter().find(|attribute| attribute.name == name).map(Attribute::default_value)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
		self.attributes.iter()
	}

	pub fn len(&self) -> usize {
		self.attributes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.attributes.is_empty()
	}

	/// Metadata holding nothing but the default values.
	pub fn to_metadata(&self) -> Metadata {
		self.attributes.iter().map(|attribute| (attribute.name.clone(), attribute.default.clone())).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keys_match_reference_hashes() {
		let vectors = [
			("uri", "70e5d7b6a29b392f85076fe15ca2f2053c56c2338728c4e33c9e8ddb1ee827cc"),
			("name", "82a3537ff0dbce7eec35d69edc3a189ee6f17d82f353a553f9aa96cb0be3ce89"),
			("description", "c9046f7a37ad0ea7cee73355984fa5428982f8b37c8f7bcec91f7ac71a7cd104"),
			("image", "6105d6cc76af400325e94d588ce511be5bfdbb73b437dc51eca43917d7a43e3d"),
			("image_data", "d9a88ccec79eef59c84b671136a20ece4cd00caaad5bc47e2c208829154ee9e4"),
			("symbol", "b76a7ca153c24671658335bbd08946350ffc621fa1c516e7123095d4ffd5c581"),
			("decimals", "ee80fd2f1e03480e2282363596ee752d7bb27f50776b95086a0279189675923e"),
			("amount_style", "8b10e058ce46c44bc1ba139bc9761721e49170e2c0a176129250a70af053b700"),
			("render_type", "d33ae06043036d0d1c3be27201ac15ee4c73da8cdb7c8f3462ce308026095ac0"),
		];
		for (name, expected) in vectors {
			let key = AttributeKey::from_name(name);
			assert_eq!(hex::encode(key.as_bytes()), expected, "key for {}", name);
			assert_eq!(key, AttributeKey::from_name(name));
		}
	}

	#[test]
	fn key_display_is_prefixed_hex() {
		assert_eq!(
			AttributeKey::from_name("name").to_string(),
			"0x82a3537ff0dbce7eec35d69edc3a189ee6f17d82f353a553f9aa96cb0be3ce89"
		);
	}

	#[test]
	fn standard_defaults() {
		let defaults = DefaultValues::default();
		let names: Vec<_> = defaults.iter().map(Attribute::name).collect();
		assert_eq!(
			names,
			["uri", "name", "description", "image", "image_data", "symbol", "decimals", "amount_style", "render_type"]
		);
		assert_eq!(defaults.get("decimals"), Some(Some("9")));
		assert_eq!(defaults.get("amount_style"), Some(Some("n")));
		assert_eq!(defaults.get("render_type"), Some(Some("currency")));
		assert_eq!(defaults.get("name"), Some(None));
		assert_eq!(defaults.get("website"), None);
	}

	#[test]
	fn overrides_replace_and_extend() {
		let defaults = DefaultValues::with_overrides([
			("decimals", Some("6".to_string())),
			("website", Some("https://example.com".to_string())),
			("render_type", None),
		]);
		assert_eq!(defaults.len(), 10);
		assert_eq!(defaults.get("decimals"), Some(Some("6")));
		assert_eq!(defaults.get("render_type"), Some(None));
		assert_eq!(defaults.get("website"), Some(Some("https://example.com")));
		assert_eq!(defaults.iter().last().map(Attribute::name), Some("website"));

		let metadata = defaults.to_metadata();
		assert_eq!(metadata.len(), 10);
		assert_eq!(metadata["decimals"].as_deref(), Some("6"));
	}
}
