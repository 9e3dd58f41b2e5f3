//! Gung Corner Core - Shared types library.
//!
//! This crate provides common types used across all Gung Corner components:
//! - `web` - Public storefront, cart drawer, and admin panel
//! - `cli` - Command-line tools for seeding and diagnostics
//!
//! # Architecture
//!
//! The core crate contains only types and pure state - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   product model
//! - [`cart`] - The in-memory cart store (lines, totals, drawer flag)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
