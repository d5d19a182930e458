//! Tamarind Core - Shared domain types library.
//!
//! This crate provides the domain model used across all Tamarind Market
//! components:
//! - `backend` - Authoritative cart/order store behind the gateway trait
//! - `storefront` - Public JSON API service
//! - `cli` - Administrator command-line tools
//!
//! # Architecture
//!
//! The core crate contains only types, validation, and error kinds - no I/O,
//! no HTTP clients, no locking. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices, categories, statuses, and the domain entities
//! - [`error`] - The [`DomainError`] kinds every operation can surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod types;

pub use error::{DomainError, DomainResult};
pub use types::*;
