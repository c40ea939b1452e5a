// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! ERC-20 balance and metadata resolution.

use alloy::primitives::{Address, U256};
use alloy::sol;
use tracing::{debug, warn};

use super::tokens::KnownToken;
use super::types::FungibleAssetBalance;
use crate::rpc::{read_contract, ChainDataClient};

pub const DEFAULT_DECIMALS: u8 = 18;
/// Largest exponent a `U256` amount can be scaled by.
pub const MAX_DECIMALS: u8 = 77;
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";
pub const UNKNOWN_NAME: &str = "Unknown Token";

// ERC20 interface for balance and metadata queries
sol! {
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
        function name() external view returns (string);
    }
}

/// Read the wallet's balance of an ERC-20.
///
/// Metadata reads fall back to defaults independently; only a failed
/// `balanceOf` or a zero balance produces `None`.
pub async fn resolve_fungible<C>(
    client: &C,
    contract: Address,
    owner: Address,
    known: Option<&KnownToken>,
) -> Option<FungibleAssetBalance>
where
    C: ChainDataClient + ?Sized,
{
    let (decimals, symbol, name, balance) = tokio::join!(
        token_decimals(client, contract, known),
        token_symbol(client, contract, known),
        token_name(client, contract, known),
        read_contract(client, contract, IERC20::balanceOfCall { account: owner }),
    );

    let balance = match balance {
        Ok(balance) => balance,
        Err(e) => {
            warn!(stage = "fungible_balance", contract = %contract, "balanceOf failed: {}", e);
            return None;
        }
    };

    if balance == U256::ZERO {
        debug!("Zero balance on {:?}", contract);
        return None;
    }

    let asset = FungibleAssetBalance::new(
        Some(contract),
        symbol,
        name,
        decimals,
        balance,
        known.and_then(|k| k.price_usd),
    );

    if asset.balance > 0.0 {
        Some(asset)
    } else {
        None
    }
}

async fn token_decimals<C>(client: &C, contract: Address, known: Option<&KnownToken>) -> u8
where
    C: ChainDataClient + ?Sized,
{
    let decimals = match known.and_then(|k| k.decimals) {
        Some(decimals) => decimals,
        None => match read_contract(client, contract, IERC20::decimalsCall {}).await {
            Ok(decimals) => decimals,
            Err(e) => {
                debug!(stage = "fungible_metadata", contract = %contract, "decimals() failed: {}", e);
                return DEFAULT_DECIMALS;
            }
        },
    };

    if decimals > MAX_DECIMALS {
        warn!(
            stage = "fungible_metadata",
            contract = %contract,
            "decimals() = {} cannot scale a balance, using {}", decimals, DEFAULT_DECIMALS
        );
        return DEFAULT_DECIMALS;
    }

    decimals
}

async fn token_symbol<C>(client: &C, contract: Address, known: Option<&KnownToken>) -> String
where
    C: ChainDataClient + ?Sized,
{
    if let Some(symbol) = known.and_then(|k| k.symbol.clone()) {
        return symbol;
    }

    read_contract(client, contract, IERC20::symbolCall {})
        .await
        .unwrap_or_else(|e| {
            debug!(stage = "fungible_metadata", contract = %contract, "symbol() failed: {}", e);
            UNKNOWN_SYMBOL.to_string()
        })
}

async fn token_name<C>(client: &C, contract: Address, known: Option<&KnownToken>) -> String
where
    C: ChainDataClient + ?Sized,
{
    if let Some(name) = known.and_then(|k| k.name.clone()) {
        return name;
    }

    read_contract(client, contract, IERC20::nameCall {})
        .await
        .unwrap_or_else(|e| {
            debug!(stage = "fungible_metadata", contract = %contract, "name() failed: {}", e);
            UNKNOWN_NAME.to_string()
        })
}
