// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

mod common;

use alloy::primitives::{address, Address, U256};
use common::{encoded, MockChainClient};
use monadfolio::portfolio::discover_token_contracts;
use monadfolio::validators::{classify_contract, ContractKind};

const TOKEN: Address = address!("0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701");
const WALLET: Address = address!("0x8ba1f109551bD432803012645Ac136ddd64DBA72");
const OTHER: Address = address!("0x00000000000000000000000000000000000b0b00");

#[tokio::test]
async fn erc165_true_is_non_fungible() {
    let client = MockChainClient::new().respond(TOKEN, "supportsInterface(bytes4)", encoded(true));

    assert_eq!(classify_contract(&client, TOKEN).await, ContractKind::NonFungible);
    assert_eq!(client.calls_to(TOKEN, "totalSupply()"), 0);
}

#[tokio::test]
async fn reverted_probes_with_total_supply_is_fungible() {
    let client = MockChainClient::new()
        .revert(TOKEN, "supportsInterface(bytes4)")
        .revert(TOKEN, "isApprovedForAll(address,address)")
        .respond(TOKEN, "totalSupply()", encoded(U256::from(1_000u64)));

    assert_eq!(classify_contract(&client, TOKEN).await, ContractKind::Fungible);
    assert_eq!(client.calls_to(TOKEN, "isApprovedForAll(address,address)"), 1);
}

#[tokio::test]
async fn legacy_nft_without_erc165_uses_fallback_probe() {
    let client = MockChainClient::new()
        .revert(TOKEN, "supportsInterface(bytes4)")
        .respond(TOKEN, "isApprovedForAll(address,address)", encoded(false))
        .respond(TOKEN, "totalSupply()", encoded(U256::from(10u64)));

    assert_eq!(classify_contract(&client, TOKEN).await, ContractKind::NonFungible);
}

#[tokio::test]
async fn erc165_false_skips_nft_fallback() {
    let client = MockChainClient::new()
        .respond(TOKEN, "supportsInterface(bytes4)", encoded(false))
        .respond(TOKEN, "isApprovedForAll(address,address)", encoded(false))
        .respond(TOKEN, "totalSupply()", encoded(U256::from(10u64)));

    assert_eq!(classify_contract(&client, TOKEN).await, ContractKind::Fungible);
    assert_eq!(client.calls_to(TOKEN, "isApprovedForAll(address,address)"), 0);
}

#[tokio::test]
async fn undecodable_probe_counts_as_failure() {
    // An account without code answers eth_call with empty data.
    let client = MockChainClient::new()
        .respond(TOKEN, "supportsInterface(bytes4)", Default::default())
        .respond(TOKEN, "isApprovedForAll(address,address)", Default::default())
        .respond(TOKEN, "totalSupply()", Default::default());

    assert_eq!(classify_contract(&client, TOKEN).await, ContractKind::Unknown);
}

#[tokio::test]
async fn contract_failing_every_probe_is_unknown() {
    let client = MockChainClient::new();

    assert_eq!(classify_contract(&client, TOKEN).await, ContractKind::Unknown);
}

#[tokio::test]
async fn discovery_splits_incoming_and_outgoing() {
    let incoming = address!("0x1000000000000000000000000000000000000001");
    let outgoing = address!("0x2000000000000000000000000000000000000002");
    let unrelated = address!("0x3000000000000000000000000000000000000003");

    let client = MockChainClient::new()
        .with_block_number(20_000)
        .with_transfer(15_000, incoming, OTHER, WALLET)
        .with_transfer(15_500, incoming, OTHER, WALLET)
        .with_transfer(19_999, outgoing, WALLET, OTHER)
        .with_transfer(16_000, unrelated, OTHER, OTHER);

    let discovery = discover_token_contracts(&client, WALLET, 10_000, 1_000).await;

    assert_eq!(discovery.received.iter().copied().collect::<Vec<_>>(), vec![incoming]);
    assert_eq!(discovery.sent.iter().copied().collect::<Vec<_>>(), vec![outgoing]);
    assert_eq!(discovery.token_candidates().len(), 2);
}

#[tokio::test]
async fn discovery_window_saturates_at_genesis() {
    let token = address!("0x1000000000000000000000000000000000000001");
    let client = MockChainClient::new()
        .with_block_number(500)
        .with_transfer(0, token, OTHER, WALLET);

    let discovery = discover_token_contracts(&client, WALLET, 10_000, 1_000).await;

    assert!(discovery.received.contains(&token));
}

#[tokio::test]
async fn discovery_without_block_height_is_empty() {
    let client = MockChainClient::new()
        .unreachable()
        .with_transfer(1, TOKEN, OTHER, WALLET);

    let discovery = discover_token_contracts(&client, WALLET, 10_000, 1_000).await;

    assert!(discovery.is_empty());
}
