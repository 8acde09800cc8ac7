//! HTTP surface for the rifa raffle ticket service.
//!
//! Exposes the public ticket grid plus the sale, login, and admin endpoints
//! over a shared in-process ticket store with optional JSON snapshot
//! persistence.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
pub mod sessions;
pub mod store;
