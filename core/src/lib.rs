pub mod action;
pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod interactive;
pub mod ratio;
pub mod snapshot;

pub use crate::config::CrawlConfig;
pub use crate::error::{Error, Result};
