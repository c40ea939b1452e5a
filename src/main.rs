// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Monadfolio CLI - print a wallet's portfolio snapshot.

use anyhow::Context;
use clap::Parser;
use monadfolio::badges::earned_badges;
use monadfolio::{create_client, evaluate_badges, Config, HttpMetadataFetcher, PortfolioAssembler};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Parser)]
#[command(name = "monadfolio", about = "Portfolio snapshot for a Monad wallet")]
struct Cli {
    /// Wallet address (0x + 40 hex characters).
    address: String,

    /// Print the snapshot and badges as JSON.
    #[arg(long)]
    json: bool,

    /// Treat the wallet as connected through Farcaster.
    #[arg(long)]
    farcaster: bool,

    /// Override LOOKBACK_BLOCKS.
    #[arg(long, value_name = "BLOCKS")]
    lookback: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(lookback) = cli.lookback {
        config.assembler.lookback_blocks = lookback;
    }

    info!("📡 RPC: {}", config.rpc_url);
    info!(
        "🔎 Lookback: {} blocks, {} known tokens",
        config.assembler.lookback_blocks,
        config.assembler.known_tokens.len()
    );

    let client = create_client(&config.rpc())?;
    let fetcher = HttpMetadataFetcher::new(config.assembler.request_timeout)?;
    let assembler = PortfolioAssembler::new(client, fetcher, config.assembler);

    let snapshot = tokio::select! {
        snapshot = assembler.assemble(&cli.address) => snapshot,
        _ = tokio::signal::ctrl_c() => {
            warn!("🛑 Interrupted");
            return Ok(());
        }
    };
    let badges = evaluate_badges(&snapshot, cli.farcaster);

    if cli.json {
        let output = serde_json::json!({
            "portfolio": snapshot,
            "badges": badges,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("📊 Portfolio for {}", cli.address.trim());
    info!("   MON: {:.4} | Transactions: {}", snapshot.user_stats.monad_balance, snapshot.user_stats.total_transactions);
    for asset in &snapshot.assets {
        match asset.price {
            Some(price) => info!("   {} ({}): {:.6} @ ${:.4} = ${:.2}", asset.symbol, asset.name, asset.balance, price, asset.value),
            None => info!("   {} ({}): {:.6} (price unknown)", asset.symbol, asset.name, asset.balance),
        }
    }
    for nft in &snapshot.nfts {
        info!("   🖼️ {} [{}]", nft.name, nft.collection);
    }
    info!("   Total value: ${:.2}", snapshot.total_value);
    for badge in earned_badges(&badges) {
        info!("   {} {}", badge.icon, badge.name);
    }
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    Ok(())
}
