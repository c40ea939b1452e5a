// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! NFT metadata documents referenced by `tokenURI`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::MetadataError;

const IPFS_SCHEME: &str = "ipfs://";

/// Fetches a JSON document by URL.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, MetadataError>;
}

/// [`MetadataFetcher`] over reqwest.
#[derive(Debug, Clone)]
pub struct HttpMetadataFetcher {
    client: reqwest::Client,
}

impl HttpMetadataFetcher {
    pub fn new(timeout: Duration) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::Http(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, MetadataError> {
        debug!("Fetching metadata: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MetadataError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| MetadataError::Body(e.to_string()))
    }
}

/// Rewrite a token URI into a fetchable HTTP(S) URL.
///
/// `ipfs://<cid>/<path>` and `ipfs://ipfs/<cid>/<path>` become
/// `<gateway>/<cid>/<path>`; HTTP(S) URLs pass through.
pub fn resolve_uri(uri: &str, gateway: &str) -> Result<String, MetadataError> {
    let uri = uri.trim();

    if let Some(rest) = uri.strip_prefix(IPFS_SCHEME) {
        let path = rest.strip_prefix("ipfs/").unwrap_or(rest);
        if path.is_empty() {
            return Err(MetadataError::UnsupportedUri(uri.to_string()));
        }
        return Ok(format!("{}/{}", gateway.trim_end_matches('/'), path));
    }

    if uri.starts_with("https://") || uri.starts_with("http://") {
        return Ok(uri.to_string());
    }

    Err(MetadataError::UnsupportedUri(uri.to_string()))
}

/// The fields we read from an ERC-721 metadata document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl NftMetadata {
    pub fn from_json(value: serde_json::Value) -> Result<Self, MetadataError> {
        let mut metadata: Self =
            serde_json::from_value(value).map_err(|e| MetadataError::Body(e.to_string()))?;
        if metadata.image.is_none() {
            metadata.image = metadata.image_url.take();
        }
        Ok(metadata)
    }
}

/// Resolve `token_uri` and fetch its metadata, rewriting the image locator
/// through the same gateway.
pub async fn fetch_nft_metadata<M>(
    fetcher: &M,
    token_uri: &str,
    gateway: &str,
) -> Result<NftMetadata, MetadataError>
where
    M: MetadataFetcher + ?Sized,
{
    let url = resolve_uri(token_uri, gateway)?;
    let mut metadata = NftMetadata::from_json(fetcher.fetch_json(&url).await?)?;

    if let Some(image) = metadata.image.take() {
        metadata.image = Some(resolve_uri(&image, gateway).unwrap_or(image));
    }

    Ok(metadata)
}
