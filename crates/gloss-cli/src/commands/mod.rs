//! Subcommand implementations.

pub mod config;
pub mod find;
pub mod search;
pub mod tree;
