//! Testkit CLI - Command-line interface for driver adapter test environments.
//!
//! This crate provides the CLI tool for checking the environment variables
//! that select a driver adapter, test executor and connector.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
