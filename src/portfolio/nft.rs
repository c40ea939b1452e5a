// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! ERC-721 holding enumeration.

use alloy::primitives::{Address, U256};
use alloy::sol;
use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::metadata::{fetch_nft_metadata, MetadataFetcher};
use super::types::NonFungibleAssetHolding;
use crate::rpc::{read_contract, ChainDataClient};

pub const UNKNOWN_COLLECTION: &str = "Unknown Collection";

sol! {
    interface IERC721 {
        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
        function tokenURI(uint256 tokenId) external view returns (string);
        function name() external view returns (string);
    }
}

/// Limits for one contract's enumeration.
#[derive(Debug, Clone, Copy)]
pub struct NftLimits<'a> {
    pub max_per_contract: usize,
    pub concurrency: usize,
    pub ipfs_gateway: &'a str,
}

/// Enumerate up to `limits.max_per_contract` tokens owned by `owner`.
///
/// Indices that cannot be enumerated are dropped; tokens whose metadata cannot
/// be fetched are kept with a placeholder name and no image.
pub async fn resolve_nfts<C, M>(
    client: &C,
    fetcher: &M,
    contract: Address,
    owner: Address,
    limits: NftLimits<'_>,
) -> Vec<NonFungibleAssetHolding>
where
    C: ChainDataClient + ?Sized,
    M: MetadataFetcher + ?Sized,
{
    let (count, collection) = tokio::join!(
        read_contract(client, contract, IERC721::balanceOfCall { owner }),
        read_contract(client, contract, IERC721::nameCall {}),
    );

    let count = match count {
        Ok(count) => count,
        Err(e) => {
            warn!(stage = "nft_balance", contract = %contract, "balanceOf failed: {}", e);
            return Vec::new();
        }
    };

    let collection = collection.unwrap_or_else(|e| {
        debug!(stage = "nft_metadata", contract = %contract, "name() failed: {}", e);
        UNKNOWN_COLLECTION.to_string()
    });

    let limit = count.min(U256::from(limits.max_per_contract)).to::<usize>();
    if limit == 0 {
        return Vec::new();
    }

    debug!(
        "{:?} ({}): wallet holds {}, enumerating {}",
        contract, collection, count, limit
    );

    let collection = collection.as_str();
    stream::iter(0..limit)
        .map(|index| resolve_token(client, fetcher, contract, owner, index, collection, limits.ipfs_gateway))
        .buffered(limits.concurrency.max(1))
        .filter_map(|holding| async move { holding })
        .collect()
        .await
}

async fn resolve_token<C, M>(
    client: &C,
    fetcher: &M,
    contract: Address,
    owner: Address,
    index: usize,
    collection: &str,
    gateway: &str,
) -> Option<NonFungibleAssetHolding>
where
    C: ChainDataClient + ?Sized,
    M: MetadataFetcher + ?Sized,
{
    let token_id = match read_contract(
        client,
        contract,
        IERC721::tokenOfOwnerByIndexCall {
            owner,
            index: U256::from(index),
        },
    )
    .await
    {
        Ok(id) => id,
        Err(e) => {
            warn!(stage = "nft_enumeration", contract = %contract, "tokenOfOwnerByIndex({}) failed: {}", index, e);
            return None;
        }
    };

    let metadata = match read_contract(client, contract, IERC721::tokenURICall { tokenId: token_id }).await {
        Ok(uri) => match fetch_nft_metadata(fetcher, &uri, gateway).await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!(stage = "nft_metadata", contract = %contract, "Metadata for #{} unavailable: {}", token_id, e);
                None
            }
        },
        Err(e) => {
            warn!(stage = "nft_metadata", contract = %contract, "tokenURI(#{}) failed: {}", token_id, e);
            None
        }
    }
    .unwrap_or_default();

    Some(NonFungibleAssetHolding {
        contract,
        token_id,
        name: metadata
            .name
            .unwrap_or_else(|| format!("{} #{}", collection, token_id)),
        collection: collection.to_string(),
        image_url: metadata.image,
        floor_price: None,
    })
}
