// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Externally supplied table of known tokens.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// A token always probed for the wallet, with optional metadata overrides
/// and a static USD price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownToken {
    pub address: Address,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub price_usd: Option<f64>,
}

impl KnownToken {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            symbol: None,
            name: None,
            decimals: None,
            price_usd: None,
        }
    }

    pub fn with_price(mut self, price_usd: f64) -> Self {
        self.price_usd = Some(price_usd);
        self
    }
}

/// Look up a known token by contract address.
pub fn find<'a>(tokens: &'a [KnownToken], address: &Address) -> Option<&'a KnownToken> {
    tokens.iter().find(|t| &t.address == address)
}
