// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Achievement badges computed from a portfolio snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::portfolio::PortfolioSnapshot;

/// Portfolio value needed for the whale badge, in USD.
pub const WHALE_THRESHOLD_USD: f64 = 1_000.0;
/// Transactions needed for the active badge.
pub const ACTIVE_TX_THRESHOLD: u64 = 10;
/// Distinct non-native tokens needed for the collector badge.
pub const COLLECTOR_MIN_TOKENS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Nft,
    Portfolio,
    Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRarity {
    Common,
    Rare,
    Legendary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: BadgeCategory,
    pub rarity: BadgeRarity,
    pub earned: bool,
    pub earned_at: Option<DateTime<Utc>>,
}

struct BadgeRule {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: BadgeCategory,
    rarity: BadgeRarity,
    earned: fn(&PortfolioSnapshot, bool) -> bool,
}

const RULES: &[BadgeRule] = &[
    BadgeRule {
        id: "monad-holder",
        name: "Monad Holder",
        description: "Holds MON tokens in wallet",
        icon: "🏆",
        category: BadgeCategory::Portfolio,
        rarity: BadgeRarity::Common,
        earned: |s, _| s.user_stats.monad_balance > 0.0,
    },
    BadgeRule {
        id: "monad-collector",
        name: "Monad Collector",
        description: "Holds multiple Monad ecosystem tokens",
        icon: "🎨",
        category: BadgeCategory::Portfolio,
        rarity: BadgeRarity::Rare,
        earned: |s, _| s.non_native_assets().count() >= COLLECTOR_MIN_TOKENS,
    },
    BadgeRule {
        id: "monad-whale",
        name: "Monad Whale",
        description: "Portfolio value exceeds $1,000",
        icon: "🐋",
        category: BadgeCategory::Portfolio,
        rarity: BadgeRarity::Rare,
        earned: |s, _| s.total_value > WHALE_THRESHOLD_USD,
    },
    // Needs a first-transaction date, which a plain RPC endpoint cannot give.
    BadgeRule {
        id: "monad-pioneer",
        name: "Monad Pioneer",
        description: "Early adopter of Monad ecosystem",
        icon: "💎",
        category: BadgeCategory::Portfolio,
        rarity: BadgeRarity::Common,
        earned: |_, _| false,
    },
    BadgeRule {
        id: "monad-active",
        name: "Monad Active",
        description: "Completed 10+ transactions on Monad",
        icon: "⚡",
        category: BadgeCategory::Usage,
        rarity: BadgeRarity::Common,
        earned: |s, _| s.user_stats.total_transactions >= ACTIVE_TX_THRESHOLD,
    },
    BadgeRule {
        id: "monad-social",
        name: "Monad Social",
        description: "Connected wallet via Farcaster",
        icon: "💜",
        category: BadgeCategory::Usage,
        rarity: BadgeRarity::Rare,
        earned: |_, farcaster| farcaster,
    },
    BadgeRule {
        id: "monad-defi",
        name: "Monad DeFi User",
        description: "Active in Monad DeFi ecosystem",
        icon: "🔥",
        category: BadgeCategory::Usage,
        rarity: BadgeRarity::Rare,
        earned: |s, _| !s.user_stats.active_protocols.is_empty(),
    },
];

/// Evaluate every badge against `snapshot`.
pub fn evaluate_badges(snapshot: &PortfolioSnapshot, connected_via_farcaster: bool) -> Vec<Badge> {
    let now = Utc::now();

    RULES
        .iter()
        .map(|rule| {
            let earned = (rule.earned)(snapshot, connected_via_farcaster);
            Badge {
                id: rule.id,
                name: rule.name,
                description: rule.description,
                icon: rule.icon,
                category: rule.category,
                rarity: rule.rarity,
                earned,
                earned_at: earned.then_some(now),
            }
        })
        .collect()
}

pub fn earned_badges(badges: &[Badge]) -> impl Iterator<Item = &Badge> {
    badges.iter().filter(|b| b.earned)
}
