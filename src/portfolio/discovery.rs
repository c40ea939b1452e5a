// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Token contract discovery by scanning recent Transfer events.
//!
//! A plain RPC endpoint cannot list every token an address holds, so we look
//! for `Transfer` logs naming the address within a bounded lookback window.
//! Tokens that only moved before the window are not found.

use std::collections::BTreeSet;

use alloy::primitives::{Address, B256};
use alloy::sol;
use alloy::sol_types::SolEvent;
use tracing::{debug, info, warn};

use crate::rpc::{ChainDataClient, LogQuery, LogRecord};

sol! {
    event Transfer(address indexed from, address indexed to, uint256 value);
}

/// Topic0 shared by ERC-20 and ERC-721 `Transfer`.
pub const TRANSFER_TOPIC: B256 = Transfer::SIGNATURE_HASH;

/// Contracts that emitted Transfer events naming the wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Contracts with a Transfer *to* the wallet.
    pub received: BTreeSet<Address>,
    /// Contracts with a Transfer *from* the wallet.
    pub sent: BTreeSet<Address>,
}

impl Discovery {
    /// Candidates for fungible balances: any Transfer in either direction.
    pub fn token_candidates(&self) -> BTreeSet<Address> {
        self.received.union(&self.sent).copied().collect()
    }

    /// Candidates for NFT holdings: only contracts that sent something in.
    pub fn nft_candidates(&self) -> &BTreeSet<Address> {
        &self.received
    }

    pub fn is_empty(&self) -> bool {
        self.received.is_empty() && self.sent.is_empty()
    }
}

/// Inclusive block ranges covering `[from, to]` in spans of at most `chunk`.
pub fn block_chunks(from: u64, to: u64, chunk: u64) -> Vec<(u64, u64)> {
    let chunk = chunk.max(1);
    let mut ranges = Vec::new();
    let mut start = from;

    while start <= to {
        let end = start.saturating_add(chunk - 1).min(to);
        ranges.push((start, end));
        if end == u64::MAX {
            break;
        }
        start = end + 1;
    }

    ranges
}

/// Scan the last `lookback_blocks` blocks for Transfer events to or from
/// `wallet`. Failed chunks are skipped; a failed height lookup yields an
/// empty result.
pub async fn discover_token_contracts<C>(
    client: &C,
    wallet: Address,
    lookback_blocks: u64,
    log_chunk_blocks: u64,
) -> Discovery
where
    C: ChainDataClient + ?Sized,
{
    let height = match client.get_block_number().await {
        Ok(height) => height,
        Err(e) => {
            warn!(stage = "discovery", "Failed to get block number: {}", e);
            return Discovery::default();
        }
    };

    let from_block = height.saturating_sub(lookback_blocks);
    let wallet_topic = wallet.into_word();
    let mut discovery = Discovery::default();

    debug!("Scanning Transfer logs in blocks {}..={}", from_block, height);

    for (start, end) in block_chunks(from_block, height, log_chunk_blocks) {
        let incoming = LogQuery::new(TRANSFER_TOPIC, start, end).topic2(wallet_topic);
        let outgoing = LogQuery::new(TRANSFER_TOPIC, start, end).topic1(wallet_topic);

        let (incoming, outgoing) =
            tokio::join!(client.get_logs(&incoming), client.get_logs(&outgoing));

        match incoming {
            Ok(logs) => collect_emitters(&logs, &mut discovery.received),
            Err(e) => warn!(stage = "discovery", "Incoming Transfer logs {}..={} failed: {}", start, end, e),
        }
        match outgoing {
            Ok(logs) => collect_emitters(&logs, &mut discovery.sent),
            Err(e) => warn!(stage = "discovery", "Outgoing Transfer logs {}..={} failed: {}", start, end, e),
        }
    }

    info!(
        "🔍 Discovered {} token contracts ({} with incoming transfers)",
        discovery.token_candidates().len(),
        discovery.received.len()
    );

    discovery
}

fn collect_emitters(logs: &[LogRecord], into: &mut BTreeSet<Address>) {
    for log in logs {
        if log.topics.first() == Some(&TRANSFER_TOPIC) {
            into.insert(log.address);
        }
    }
}
