//! # debut-core
//!
//! Core crate for the Debut plugin runtime. Contains the strategy engine
//! boundary trait, market data and order models, configuration schemas,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Debut crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
