//! Internal modules for the scoreboard CLI.
//!
//! This library provides command parsing and configuration loading used by
//! the vs_cli binary.

pub mod commands;
pub mod config;
