//! Capgains - capital gains schedule builder
//!
//! Turns a broker trade ledger into the figures an Indian income tax return
//! asks for: short/long-term capital gains, short-term gains split at the
//! rate cutoff, and realised P&L per advance-tax quarter.

pub mod config;
pub mod error;
pub mod importers;
pub mod tax;
pub mod utils;
