//! Core traits defined in `debut-core` and implemented by other crates.

pub mod debut;

pub use debut::DebutCore;
