// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Portfolio data model.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{utils::format_units, Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// A validated wallet address.
///
/// Accepts exactly `0x` followed by 40 hex characters in any case, after
/// trimming surrounding whitespace. Displays in checksum form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(Address);

impl WalletAddress {
    pub fn parse(input: &str) -> Result<Self, ChainError> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .ok_or_else(|| ChainError::InvalidAddress(trimmed.to_string()))?;

        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ChainError::InvalidAddress(trimmed.to_string()));
        }

        Address::from_str(trimmed)
            .map(Self)
            .map_err(|e| ChainError::InvalidAddress(format!("{trimmed}: {e}")))
    }

    pub fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for WalletAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl FromStr for WalletAddress {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ChainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.to_string()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_checksum(None))
    }
}

/// Convert a raw integer amount into display units (`raw / 10^decimals`).
pub fn to_display_units(raw: U256, decimals: u8) -> f64 {
    format_units(raw, decimals)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// A fungible balance. `contract` is `None` for native MON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FungibleAssetBalance {
    pub contract: Option<Address>,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub raw_balance: U256,
    pub balance: f64,
    /// Unit price in USD, `None` when unknown.
    pub price: Option<f64>,
    /// `balance * price`, or 0 when the price is unknown.
    pub value: f64,
    #[serde(rename = "change24h")]
    pub change_24h: Option<f64>,
}

impl FungibleAssetBalance {
    pub fn new(
        contract: Option<Address>,
        symbol: String,
        name: String,
        decimals: u8,
        raw_balance: U256,
        price: Option<f64>,
    ) -> Self {
        let balance = to_display_units(raw_balance, decimals);
        let value = price.map(|p| balance * p).unwrap_or(0.0);

        Self {
            contract,
            symbol,
            name,
            decimals,
            raw_balance,
            balance,
            price,
            value,
            change_24h: None,
        }
    }

    pub fn is_native(&self) -> bool {
        self.contract.is_none()
    }
}

/// One owned NFT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonFungibleAssetHolding {
    pub contract: Address,
    pub token_id: U256,
    pub name: String,
    pub collection: String,
    pub image_url: Option<String>,
    pub floor_price: Option<f64>,
}

/// Activity for one account.
///
/// `staking_amount` and `active_protocols` are always zero/empty: there is no
/// staking or protocol integration behind them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountActivityStats {
    pub monad_balance: f64,
    pub total_transactions: u64,
    pub is_active_wallet: bool,
    pub staking_amount: f64,
    pub active_protocols: Vec<String>,
}

impl AccountActivityStats {
    pub fn new(native_balance: U256, total_transactions: u64) -> Self {
        Self {
            monad_balance: to_display_units(native_balance, 18),
            total_transactions,
            is_active_wallet: total_transactions > 0,
            staking_amount: 0.0,
            active_protocols: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_value: f64,
    pub assets: Vec<FungibleAssetBalance>,
    pub nfts: Vec<NonFungibleAssetHolding>,
    pub last_updated: DateTime<Utc>,
    pub user_stats: AccountActivityStats,
}

impl PortfolioSnapshot {
    pub fn new(
        assets: Vec<FungibleAssetBalance>,
        nfts: Vec<NonFungibleAssetHolding>,
        user_stats: AccountActivityStats,
    ) -> Self {
        let total_value = assets.iter().map(|a| a.value).sum();

        Self {
            total_value,
            assets,
            nfts,
            last_updated: Utc::now(),
            user_stats,
        }
    }

    /// Zero-valued snapshot returned when assembly fails outright.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), AccountActivityStats::default())
    }

    /// Assets whose symbol is not in `hidden_symbols`.
    pub fn visible_assets<'a>(
        &'a self,
        hidden_symbols: &'a [String],
    ) -> impl Iterator<Item = &'a FungibleAssetBalance> + 'a {
        self.assets
            .iter()
            .filter(move |a| !hidden_symbols.iter().any(|h| h == &a.symbol))
    }

    pub fn non_native_assets(&self) -> impl Iterator<Item = &FungibleAssetBalance> {
        self.assets.iter().filter(|a| !a.is_native())
    }
}
