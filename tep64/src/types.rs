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

use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute name to value, `None` where neither the content nor the defaults supply one.
pub type Metadata = BTreeMap<String, Option<String>>;

/// The result of decoding a content cell.
///
/// Serialises with a `"type"` tag of `"offchain"`, `"onchain"` or `"custom"`.
#[derive(Serialize, Debug, Clone, PartialEq, derive_more::From)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DecodedContent {
	Offchain(OffchainContent),
	Onchain(OnchainContent),
	Custom(CustomContent),
}

impl DecodedContent {
	/// `"offchain"`, `"onchain"`, or the kind chosen by a custom handler.
	pub fn kind(&self) -> &str {
		match self {
			DecodedContent::Offchain(_) => "offchain",
			DecodedContent::Onchain(_) => "onchain",
			DecodedContent::Custom(custom) => &custom.kind,
		}
	}

	pub fn as_offchain(&self) -> Option<&OffchainContent> {
		match self {
			DecodedContent::Offchain(content) => Some(content),
			_ => None,
		}
	}

	pub fn as_onchain(&self) -> Option<&OnchainContent> {
		match self {
			DecodedContent::Onchain(content) => Some(content),
			_ => None,
		}
	}
}

/// Content stored outside of the chain, along with the document found at its URI.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OffchainContent {
	/// The URI exactly as it was stored in the cell.
	pub uri: String,
	/// Body of the fetched document.
	pub data: String,
}

/// Content stored in an on-chain dictionary.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OnchainContent {
	pub metadata: Metadata,
}

/// Envelope for content produced by custom handlers.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CustomContent {
	pub kind: String,
	pub data: serde_json::Value,
}

impl CustomContent {
	pub fn new(kind: impl Into<String>, data: serde_json::Value) -> Self {
		Self { kind: kind.into(), data }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn serialises_with_type_tag() {
		let offchain: DecodedContent =
			OffchainContent { uri: "https://example.com/m.json".into(), data: "{}".into() }.into();
		assert_eq!(
			serde_json::to_value(&offchain).unwrap(),
			json!({ "type": "offchain", "uri": "https://example.com/m.json", "data": "{}" })
		);

		let mut metadata = Metadata::new();
		metadata.insert("name".into(), Some("X".into()));
		metadata.insert("image".into(), None);
		let onchain: DecodedContent = OnchainContent { metadata }.into();
		assert_eq!(
			serde_json::to_value(&onchain).unwrap(),
			json!({ "type": "onchain", "metadata": { "image": null, "name": "X" } })
		);

		let custom: DecodedContent = CustomContent::new("semi-chain", json!([1, 2])).into();
		assert_eq!(custom.kind(), "semi-chain");
		assert_eq!(
			serde_json::to_value(&custom).unwrap(),
			json!({ "type": "custom", "kind": "semi-chain", "data": [1, 2] })
		);
	}
}
