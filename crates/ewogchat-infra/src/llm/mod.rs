//! Chat-completion provider implementations.

pub mod azure;
