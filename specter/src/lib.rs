// specter/src/lib.rs
//! # Specter CLI Application
//!
//! This crate provides the command-line interface for the Specter engine:
//! thin argument parsing, logging setup, and the `text`/`doc` commands.
//! All processing logic lives in `specter-core`.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
