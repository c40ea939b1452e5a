// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interface detection for discovered token contracts.

use alloy::primitives::{address, fixed_bytes, Address, FixedBytes};
use alloy::sol;
use tracing::debug;

use crate::portfolio::fungible::IERC20;
use crate::rpc::{read_contract, ChainDataClient};

/// ERC-165 identifier of ERC-721.
pub const ERC721_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("80ac58cd");

/// Owner/operator passed to probe calls. Nobody is expected to hold state for it.
pub const SENTINEL_ADDRESS: Address = address!("0x000000000000000000000000000000000000dEaD");

sol! {
    interface IERC165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }

    interface IERC721Probe {
        function isApprovedForAll(address owner, address operator) external view returns (bool);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Fungible,
    NonFungible,
    Unknown,
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractKind::Fungible => write!(f, "ERC-20"),
            ContractKind::NonFungible => write!(f, "ERC-721"),
            ContractKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a contract as fungible, non-fungible or neither.
///
/// 1. ERC-165 `supportsInterface(0x80ac58cd)`: `true` means ERC-721.
/// 2. If the probe itself fails (pre-ERC-165 contracts), try the ERC-721-only
///    `isApprovedForAll`; success means ERC-721.
/// 3. Otherwise `totalSupply()` succeeding means ERC-20.
///
/// Never fails: a contract that answers none of these is [`ContractKind::Unknown`].
pub async fn classify_contract<C>(client: &C, contract: Address) -> ContractKind
where
    C: ChainDataClient + ?Sized,
{
    let probe = read_contract(
        client,
        contract,
        IERC165::supportsInterfaceCall {
            interfaceId: ERC721_INTERFACE_ID,
        },
    )
    .await;

    match probe {
        Ok(true) => {
            debug!("{:?} reports ERC-721 via ERC-165", contract);
            return ContractKind::NonFungible;
        }
        Ok(false) => {
            debug!("{:?} implements ERC-165 without ERC-721", contract);
        }
        Err(e) => {
            debug!("{:?} ERC-165 probe failed ({}), trying fallback", contract, e);
            let fallback = read_contract(
                client,
                contract,
                IERC721Probe::isApprovedForAllCall {
                    owner: SENTINEL_ADDRESS,
                    operator: SENTINEL_ADDRESS,
                },
            )
            .await;

            if fallback.is_ok() {
                debug!("{:?} answers isApprovedForAll, treating as ERC-721", contract);
                return ContractKind::NonFungible;
            }
        }
    }

    match read_contract(client, contract, IERC20::totalSupplyCall {}).await {
        Ok(_) => ContractKind::Fungible,
        Err(e) => {
            debug!("{:?} failed every interface probe: {}", contract, e);
            ContractKind::Unknown
        }
    }
}
