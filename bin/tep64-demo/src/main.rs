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

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tep64::{encode, ContentDecoder, DecoderConfig};
use tep64_resolver::{Fetch, FetchError};

/// Assemble a TEP-64 content cell, decode it again and print the result as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
	/// JSON file with the decoder configuration
	#[arg(long)]
	config: Option<PathBuf>,
	/// Gateway used in place of `ipfs://`
	#[arg(long)]
	gateway: Option<String>,
	/// Accept single cell off-chain URIs without the leading 0x00 byte
	#[arg(long)]
	no_marker_check: bool,
	/// Answer every off-chain request with this body instead of going over HTTP
	#[arg(long)]
	document: Option<String>,
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Off-chain content pointing at URI
	Offchain {
		uri: String,
		/// Store the URI in the root cell rather than in a snake chain
		#[arg(long)]
		single_cell: bool,
	},
	/// On-chain content with the given attributes
	Onchain {
		/// Attribute in the form name=value, may be repeated
		#[arg(long = "attr", value_parser = parse_attribute)]
		attributes: Vec<(String, String)>,
	},
}

fn parse_attribute(s: &str) -> Result<(String, String), String> {
	match s.split_once('=') {
		Some((name, value)) => Ok((name.to_string(), value.to_string())),
		None => Err(format!("no `=` found in `{}`", s)),
	}
}

struct StaticDocument(String);

impl Fetch for StaticDocument {
	fn get(&self, url: &str) -> Result<String, FetchError> {
		log::info!("Serving {} from memory", url);
		Ok(self.0.clone())
	}
}

fn main() -> Result<(), anyhow::Error> {
	let opts = Opts::parse();
	pretty_env_logger::init();

	let mut config = match &opts.config {
		Some(path) => DecoderConfig::from_json(&std::fs::read_to_string(path)?)?,
		None => DecoderConfig::default(),
	};
	if let Some(gateway) = opts.gateway {
		config.ipfs_gateway = gateway;
	}
	if opts.no_marker_check {
		config.offchain_marker_check = false;
	}

	let mut builder = ContentDecoder::builder().config(config);
	if let Some(document) = opts.document {
		builder = builder.fetcher(StaticDocument(document));
	}
	let decoder = builder.build()?;

	let content = match &opts.command {
		Command::Offchain { uri, single_cell: true } => encode::offchain_single_cell(uri)?,
		Command::Offchain { uri, single_cell: false } => encode::offchain_snake(uri)?,
		Command::Onchain { attributes } => {
			encode::onchain(attributes.iter().map(|(name, value)| (name.as_str(), value.as_str())))?
		}
	};
	log::debug!("Assembled content cell with {} bits", content.bit_len());

	let decoded = match decoder.decode(&content) {
		Ok(decoded) => decoded,
		Err(e) => anyhow::bail!("Cannot decode content: {}", e),
	};

	println!("{}", serde_json::to_string_pretty(&decoded)?);
	Ok(())
}
