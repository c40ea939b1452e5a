// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account activity statistics and the native MON balance.

use alloy::primitives::{Address, U256};
use tracing::{debug, warn};

use super::types::{AccountActivityStats, FungibleAssetBalance};
use crate::rpc::ChainDataClient;

pub const NATIVE_SYMBOL: &str = "MON";
pub const NATIVE_NAME: &str = "Monad";
pub const NATIVE_DECIMALS: u8 = 18;

/// Fetch balance and transaction count. Any failure yields zeroed stats.
pub async fn fetch_account_stats<C>(client: &C, address: Address) -> AccountActivityStats
where
    C: ChainDataClient + ?Sized,
{
    match fetch_balance_and_count(client, address).await {
        Some((balance, tx_count)) => AccountActivityStats::new(balance, tx_count),
        None => AccountActivityStats::default(),
    }
}

/// Account stats plus native MON as an asset record.
///
/// Both come from a single balance read: the MON asset is present exactly
/// when `monad_balance` is positive.
pub async fn fetch_account<C>(
    client: &C,
    address: Address,
    price_usd: Option<f64>,
) -> (AccountActivityStats, Option<FungibleAssetBalance>)
where
    C: ChainDataClient + ?Sized,
{
    match fetch_balance_and_count(client, address).await {
        Some((balance, tx_count)) => (
            AccountActivityStats::new(balance, tx_count),
            native_asset(balance, price_usd),
        ),
        None => (AccountActivityStats::default(), None),
    }
}

async fn fetch_balance_and_count<C>(client: &C, address: Address) -> Option<(U256, u64)>
where
    C: ChainDataClient + ?Sized,
{
    let (balance, tx_count) = tokio::join!(
        client.get_balance(address),
        client.get_transaction_count(address)
    );

    match (balance, tx_count) {
        (Ok(balance), Ok(tx_count)) => {
            debug!("Account {:?}: balance={} tx_count={}", address, balance, tx_count);
            Some((balance, tx_count))
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(stage = "account_stats", "Failed to fetch stats for {:?}: {}", address, e);
            None
        }
    }
}

fn native_asset(balance: U256, price_usd: Option<f64>) -> Option<FungibleAssetBalance> {
    if balance == U256::ZERO {
        return None;
    }

    Some(FungibleAssetBalance::new(
        None,
        NATIVE_SYMBOL.to_string(),
        NATIVE_NAME.to_string(),
        NATIVE_DECIMALS,
        balance,
        price_usd,
    ))
}
