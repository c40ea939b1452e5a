// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Portfolio snapshot assembly.

use std::collections::BTreeSet;
use std::future::Future;

use alloy::primitives::Address;
use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use super::discovery::{discover_token_contracts, Discovery};
use super::fungible::resolve_fungible;
use super::metadata::MetadataFetcher;
use super::nft::{resolve_nfts, NftLimits};
use super::stats::fetch_account;
use super::tokens;
use super::types::{FungibleAssetBalance, NonFungibleAssetHolding, PortfolioSnapshot, WalletAddress};
use crate::config::AssemblerConfig;
use crate::rpc::{ChainDataClient, LimitedClient};
use crate::validators::{classify_contract, ContractKind};

/// Builds [`PortfolioSnapshot`]s from an injected chain client and metadata
/// fetcher.
///
/// Every chain request goes through one [`LimitedClient`], so at most
/// `max_concurrency` requests are in flight per assembler.
///
/// Assembly never fails: per-contract problems drop that contract, and
/// anything that stops the whole run (bad address, timeout, cancellation)
/// yields [`PortfolioSnapshot::empty`].
pub struct PortfolioAssembler<C, M> {
    client: LimitedClient<C>,
    fetcher: M,
    config: AssemblerConfig,
}

impl<C: ChainDataClient, M: MetadataFetcher> PortfolioAssembler<C, M> {
    pub fn new(client: C, fetcher: M, config: AssemblerConfig) -> Self {
        Self {
            client: LimitedClient::new(client, config.max_concurrency),
            fetcher,
            config,
        }
    }

    pub fn client(&self) -> &C {
        self.client.inner()
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assemble a snapshot for `address`, bounded by the configured timeout.
    pub async fn assemble(&self, address: &str) -> PortfolioSnapshot {
        self.assemble_with_cancel(address, std::future::pending::<()>())
            .await
    }

    /// Like [`Self::assemble`], but gives up as soon as `cancel` completes.
    pub async fn assemble_with_cancel<F>(&self, address: &str, cancel: F) -> PortfolioSnapshot
    where
        F: Future<Output = ()>,
    {
        let wallet = match WalletAddress::parse(address) {
            Ok(wallet) => wallet,
            Err(e) => {
                warn!(stage = "validate", "Rejected address: {}", e);
                return PortfolioSnapshot::empty();
            }
        };

        tokio::select! {
            result = tokio::time::timeout(self.config.request_timeout, self.assemble_for(wallet)) => {
                match result {
                    Ok(snapshot) => snapshot,
                    Err(_) => {
                        warn!(
                            stage = "assemble",
                            "Portfolio assembly for {} timed out after {:?}",
                            wallet, self.config.request_timeout
                        );
                        PortfolioSnapshot::empty()
                    }
                }
            }
            _ = cancel => {
                warn!(stage = "assemble", "Portfolio assembly for {} cancelled", wallet);
                PortfolioSnapshot::empty()
            }
        }
    }

    /// Run every stage for an already validated wallet, without a deadline.
    pub async fn assemble_for(&self, wallet: WalletAddress) -> PortfolioSnapshot {
        let owner = wallet.address();
        info!("📊 Assembling portfolio for {}", wallet);

        let ((user_stats, native), discovery) = tokio::join!(
            fetch_account(&self.client, owner, self.config.native_price_usd),
            discover_token_contracts(
                &self.client,
                owner,
                self.config.lookback_blocks,
                self.config.log_chunk_blocks,
            ),
        );

        let classified = self.classify_candidates(&discovery).await;

        let mut assets: Vec<FungibleAssetBalance> = native.into_iter().collect();
        assets.extend(self.resolve_fungibles(owner, &classified).await);

        let nfts = self.resolve_nft_holdings(owner, &discovery, &classified).await;

        let snapshot = PortfolioSnapshot::new(assets, nfts, user_stats);

        info!(
            "✅ Portfolio for {}: {} assets, {} NFTs, ${:.2} total",
            wallet,
            snapshot.assets.len(),
            snapshot.nfts.len(),
            snapshot.total_value
        );

        snapshot
    }

    /// Known tokens are taken as fungible; discovered contracts are probed.
    async fn classify_candidates(&self, discovery: &Discovery) -> Vec<(Address, ContractKind)> {
        let known: BTreeSet<Address> = self.config.known_tokens.iter().map(|t| t.address).collect();
        let discovered: Vec<Address> = discovery
            .token_candidates()
            .into_iter()
            .filter(|c| !known.contains(c))
            .collect();

        let mut classified: Vec<(Address, ContractKind)> = known
            .into_iter()
            .map(|c| (c, ContractKind::Fungible))
            .collect();

        let probed: Vec<(Address, ContractKind)> = stream::iter(discovered)
            .map(|contract| async move { (contract, classify_contract(&self.client, contract).await) })
            .buffered(self.concurrency())
            .collect()
            .await;

        for (contract, kind) in &probed {
            if *kind == ContractKind::Unknown {
                info!("⏭️ Skipping {:?}: not a token contract", contract);
            }
        }

        classified.extend(probed);
        classified
    }

    async fn resolve_fungibles(
        &self,
        owner: Address,
        classified: &[(Address, ContractKind)],
    ) -> Vec<FungibleAssetBalance> {
        let fungibles = classified
            .iter()
            .filter(|(_, kind)| *kind == ContractKind::Fungible)
            .map(|(contract, _)| *contract);

        stream::iter(fungibles)
            .map(|contract| {
                let known = tokens::find(&self.config.known_tokens, &contract);
                resolve_fungible(&self.client, contract, owner, known)
            })
            .buffered(self.concurrency())
            .filter_map(|asset| async move { asset })
            .collect()
            .await
    }

    async fn resolve_nft_holdings(
        &self,
        owner: Address,
        discovery: &Discovery,
        classified: &[(Address, ContractKind)],
    ) -> Vec<NonFungibleAssetHolding> {
        let limits = NftLimits {
            max_per_contract: self.config.max_nfts_per_contract,
            concurrency: self.concurrency(),
            ipfs_gateway: &self.config.ipfs_gateway,
        };

        let mut holdings = Vec::new();
        for (contract, kind) in classified {
            if *kind != ContractKind::NonFungible || !discovery.nft_candidates().contains(contract) {
                continue;
            }
            holdings.extend(resolve_nfts(&self.client, &self.fetcher, *contract, owner, limits).await);
        }

        holdings
    }

    fn concurrency(&self) -> usize {
        self.config.max_concurrency.max(1)
    }
}
