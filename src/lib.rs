//! Resume ATS client library

pub mod analysis;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod session;
pub mod workflow;

pub use config::Config;
pub use error::{AtsClientError, Result, ValidationError};
