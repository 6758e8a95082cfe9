//! CLI subcommand implementations

pub mod evaluate;
pub mod export;
pub mod train;
