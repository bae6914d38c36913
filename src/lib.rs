//! Motif finding and replication origin analysis over DNA sequences in Rust

pub mod config;
pub mod error;
pub mod frame;
pub mod probability;
pub mod replication;
pub mod sampling;
pub mod search;
pub mod stats;
pub mod types;
