// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types for chain and metadata access.
//!
//! None of these reach the caller of [`crate::PortfolioAssembler::assemble`];
//! each stage logs its failure and degrades.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("Execution reverted: {0}")]
    Reverted(String),

    #[error("Failed to decode {method} result: {reason}")]
    Decode { method: &'static str, reason: String },
}

impl ChainError {
    pub fn decode(method: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            method,
            reason: reason.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("Unsupported token URI: {0}")]
    UnsupportedUri(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid metadata document: {0}")]
    Body(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid RPC URL {url}: {reason}")]
    RpcUrl { url: String, reason: String },

    #[error("Failed to read known tokens file {path}: {reason}")]
    KnownTokens { path: String, reason: String },
}
