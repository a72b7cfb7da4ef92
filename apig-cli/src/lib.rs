//! apig CLI library

#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod observability;

pub use commands::{GenCommand, NewCommand};
pub use config::ProjectConfig;
