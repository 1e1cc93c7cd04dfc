//! Spargat map downloader library
//!
//! This library provides the index fetching, downloading and manifest logic
//! behind the `spargat` CLI.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
