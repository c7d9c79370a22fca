use crate::fixtures::*;
use tep64::{ContentDecoder, DecodedContent, DefaultValues, Error};
use tep64_resolver::MemoryFetcher;

fn offline_decoder(fetcher: MemoryFetcher, marker_check: bool) -> anyhow::Result<ContentDecoder> {
	Ok(ContentDecoder::builder().fetcher(fetcher).offchain_marker_check(marker_check).build()?)
}

#[test]
fn should_decode_onchain_jetton() -> anyhow::Result<()> {
	let _ = pretty_env_logger::try_init();
	let decoder = offline_decoder(MemoryFetcher::new(), true)?;

	let decoded = decoder.decode(&*onchain_jetton()?)?;
	let metadata = match &decoded {
		DecodedContent::Onchain(content) => &content.metadata,
		other => anyhow::bail!("expected on-chain content, got {:?}", other),
	};

	assert_eq!(metadata.len(), 9);
	assert_eq!(metadata["name"].as_deref(), Some("Pablocoin "));
	assert_eq!(metadata["symbol"].as_deref(), Some("Pbc"));
	assert_eq!(
		metadata["description"].as_deref(),
		Some("Low fee peer-to-peer electronic cash alternative to Bitcoin")
	);
	assert_eq!(metadata["image"].as_deref(), Some("https://bitcoincash-example.github.io/website/logo.png"));

	// Attributes missing from the dictionary fall back to their defaults.
	assert_eq!(metadata["uri"], None);
	assert_eq!(metadata["image_data"], None);
	assert_eq!(metadata["decimals"].as_deref(), Some("9"));
	assert_eq!(metadata["amount_style"].as_deref(), Some("n"));
	assert_eq!(metadata["render_type"].as_deref(), Some("currency"));
	Ok(())
}

#[test]
fn should_decode_onchain_jetton_with_overrides() -> anyhow::Result<()> {
	let decoder = ContentDecoder::builder()
		.fetcher(MemoryFetcher::new())
		.default_value("decimals", Some("2"))
		.default_value("name", Some("unnamed"))
		.build()?;

	let decoded = decoder.decode(&*onchain_jetton()?)?;
	let metadata = &decoded.as_onchain().expect("on-chain content").metadata;
	assert_eq!(metadata["decimals"].as_deref(), Some("2"));
	// Stored values win over any default.
	assert_eq!(metadata["name"].as_deref(), Some("Pablocoin "));
	Ok(())
}

#[test]
fn onchain_jetton_serialises_to_json() -> anyhow::Result<()> {
	let decoder = offline_decoder(MemoryFetcher::new(), true)?;
	let json = serde_json::to_value(decoder.decode(&*onchain_jetton()?)?)?;
	assert_eq!(json["type"], "onchain");
	assert_eq!(json["metadata"]["symbol"], "Pbc");
	assert_eq!(json["metadata"]["image_data"], serde_json::Value::Null);
	Ok(())
}

#[test]
fn onchain_decoding_is_repeatable() -> anyhow::Result<()> {
	let decoder = offline_decoder(MemoryFetcher::new(), true)?;
	let content = onchain_jetton()?;
	let first = decoder.decode(&content)?;
	for _ in 0..10 {
		assert_eq!(decoder.decode(&content)?, first);
	}
	assert_eq!(first.as_onchain().map(|c| c.metadata.len()), Some(DefaultValues::default().len()));
	Ok(())
}

#[test]
fn unmarked_offchain_uri_is_rejected_by_default() -> anyhow::Result<()> {
	let fetcher = MemoryFetcher::new();
	let decoder = offline_decoder(fetcher, true)?;

	let err = decoder.decode(&*offchain_https()?).unwrap_err();
	assert!(matches!(err, Error::InvalidOffchainMarker(b'h')), "unexpected error {:?}", err);
	assert!(err.is_invalid_prefix());

	let err = decoder.decode(&*offchain_ipfs()?).unwrap_err();
	assert!(matches!(err, Error::InvalidOffchainMarker(b'i')), "unexpected error {:?}", err);
	Ok(())
}

#[test]
fn should_decode_unmarked_https_uri() -> anyhow::Result<()> {
	let body = r#"{"name":"Anonymous Telegram Numbers"}"#;
	let decoder = offline_decoder(MemoryFetcher::new().with_document(OFFCHAIN_HTTPS_URI, body), false)?;

	let decoded = decoder.decode(&*offchain_https()?)?;
	let content = decoded.as_offchain().expect("off-chain content");
	assert_eq!(content.uri, OFFCHAIN_HTTPS_URI);
	assert_eq!(content.data, body);
	Ok(())
}

#[test]
fn should_decode_unmarked_ipfs_uri_through_gateway() -> anyhow::Result<()> {
	let resolved = format!("https://ipfs.io/ipfs/{}", OFFCHAIN_IPFS_URI.trim_start_matches("ipfs://"));
	let decoder = offline_decoder(MemoryFetcher::new().with_document(resolved, "{}"), false)?;

	let decoded = decoder.decode(&*offchain_ipfs()?)?;
	let content = decoded.as_offchain().expect("off-chain content");
	assert_eq!(content.uri, OFFCHAIN_IPFS_URI);
	assert_eq!(content.data, "{}");
	Ok(())
}

#[test]
fn fetch_failures_carry_the_stored_uri() -> anyhow::Result<()> {
	let decoder = offline_decoder(MemoryFetcher::new(), false)?;
	match decoder.decode(&*offchain_ipfs()?) {
		Err(Error::DataFetching { uri, .. }) => assert_eq!(uri, OFFCHAIN_IPFS_URI),
		other => anyhow::bail!("expected a fetch error, got {:?}", other),
	}
	Ok(())
}
