//! `heat-cli` library.

pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod output;
pub mod request;
pub mod styles;
pub mod template;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use client::*;
pub use commands::*;
pub use config::*;
pub use constants::*;
pub use environment::*;
pub use error::*;
pub use fetch::*;
pub use output::*;
pub use request::*;
pub use template::*;
