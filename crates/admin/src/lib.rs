//! Stockroom Admin library.
//!
//! This crate provides the inventory back office as a library, allowing it
//! to be tested and reused by the `sr-cli` tools.
//!
//! # Layout
//!
//! - [`db`] - Repositories over the PostgreSQL schema in `migrations/`
//! - [`services::ledger`] - The transactional stock ledger; the only code
//!   that changes `products.current_stock`
//! - [`routes`] - axum handlers rendering askama templates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
