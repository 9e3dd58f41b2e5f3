//! Application services.
//!
//! - [`catalog`] - product directory trait, facade, and the in-memory adapter
//! - [`auth`] - the admin login gate
//! - [`seed`] - fixed sample catalog and idempotent-intent seeding

pub mod auth;
pub mod catalog;
pub mod seed;
