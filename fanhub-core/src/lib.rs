//! # FanHub Core
//!
//! Core types, errors, and traits for the FanHub esports fan dashboard.
//!
//! This crate provides the foundational building blocks used by all other FanHub crates:
//!
//! - **Types**: Domain models for news, rosters, matches, trends, videos and users
//! - **Errors**: One error enum with classification helpers
//! - **Constants**: Cache defaults, panel sizes and simulated latencies
//! - **Traits**: The content provider interface the cache sits in front of
//!
//! ## Example
//!
//! ```rust
//! use fanhub_core::{Esport, FanhubError};
//!
//! let esport: Esport = "VALORANT".parse().unwrap();
//! assert_eq!(esport, Esport::Valorant);
//! assert!(matches!("dota".parse::<Esport>(), Err(FanhubError::UnknownEsport(_))));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{FanhubError, Result};
pub use traits::*;
pub use types::*;
