//! # FanHub Content
//!
//! Esports panel content served through a time-boxed cache.
//!
//! - [`ContentService`]: typed accessors (news, roster, schedule, stats,
//!   trends, videos) that consult the cache before the provider
//! - [`Dashboard`]: loads every panel for an esport at once and degrades
//!   failing panels to empty
//! - [`SimulatedProvider`]: canned content behind an artificial delay
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fanhub_content::{ContentService, SimulatedProvider};
//! use fanhub_core::Esport;
//!
//! let service = ContentService::new(Arc::new(SimulatedProvider::new()));
//! let news = service.news(Esport::Csgo, 6).await?;   // ~500ms
//! let again = service.news(Esport::Csgo, 6).await?;  // cached
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod catalog;
mod dashboard;
mod key;
mod service;
mod simulated;

pub use dashboard::{Dashboard, DashboardSnapshot};
pub use key::ContentKey;
pub use service::{Content, ContentService};
pub use simulated::{ProviderConfig, SimulatedProvider};
