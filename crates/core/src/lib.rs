//! ShopPrime Core - Shared types library.
//!
//! This crate provides common types used across all ShopPrime client components:
//! - `client` - SDK for the ShopPrime REST backend
//! - `cli` - Command-line storefront and admin tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
