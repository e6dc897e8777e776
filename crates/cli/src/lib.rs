//! Orchestration for the `market-pulse` binary.

pub mod commands;
