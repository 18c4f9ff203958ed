// Copyright 2026 Kitscout Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kitscout library — multi-store price search for Gundam model kits.
//!
//! One query (grade + model) fans out to every registered store adapter,
//! each source's markup is normalized into a common listing shape, and a
//! single merged, term-filtered list comes back.

pub mod adapters;
pub mod aggregate;
pub mod document;
pub mod fetch;
pub mod filter;
pub mod listing;
pub mod price;
pub mod query;
pub mod rest;
pub mod urls;
