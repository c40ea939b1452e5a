// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contract validators used before reading balances.

pub mod interface;

pub use interface::{classify_contract, ContractKind};
