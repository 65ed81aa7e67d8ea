//! CLI infrastructure for the `nim` tool
//!
//! Commands train an agent through self-play and then report on it, pit it
//! against baselines, or play it against a human at the console.

pub mod commands;
pub mod config;
pub mod output;
