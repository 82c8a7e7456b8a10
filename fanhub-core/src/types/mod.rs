//! Domain types for FanHub.
//!
//! This module provides the data structures shared by the content layer,
//! the user store and the HTTP facade:
//!
//! - [`Esport`]: The game a panel is about
//! - [`NewsItem`], [`Team`], [`Match`], [`TeamStat`], [`Trend`], [`Video`]: Panel content
//! - [`User`] and [`Session`]: Registered accounts and the logged-in user

mod esport;
mod content;
mod user;

pub use esport::*;
pub use content::*;
pub use user::*;
