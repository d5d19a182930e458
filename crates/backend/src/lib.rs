//! Tamarind Backend - Authoritative cart/order store.
//!
//! This crate owns the consistency rules of the shop: how a cart is built
//! against live stock, how checkout atomically converts a cart into an
//! immutable order, and how an order moves through its fulfillment
//! lifecycle.
//!
//! # Architecture
//!
//! All durable state sits behind [`Gateway`], a trait with one async method
//! per remote operation. Every method is an atomic unit: it fully succeeds
//! or fully fails with a [`tamarind_core::DomainError`], and a failure never
//! leaves a partial effect behind.
//!
//! [`MemoryGateway`] is the reference implementation - a single-process
//! store guarding its state with one `RwLock`, acquired exactly once per
//! operation. A deployment against a remote authoritative store implements
//! the same trait over its wire protocol; callers are indifferent to which
//! implementation they hold.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod gateway;
pub mod memory;

pub use gateway::{Caller, Gateway};
pub use memory::{MemoryGateway, RemovalPolicy};
