pub mod config;
pub mod download;
pub mod http;
pub mod index;
pub mod manifest;
pub mod processor;
