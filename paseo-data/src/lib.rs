//! Adapters connecting the Paseo planner to external services.
//!
//! Responsibilities:
//! - Fetch walking directions over HTTP ([`directions`]).
//! - Load and sanitize place catalogs from files or the listing backend
//!   ([`catalog`]).
//!
//! Boundaries:
//! - Do not encode domain rules (live in `paseo-core`).
//! - Never log API credentials.

pub mod catalog;
pub mod directions;
