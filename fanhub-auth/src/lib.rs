//! # FanHub Auth
//!
//! Sign-up and login for dashboard users.
//!
//! Accounts live in memory only; restarting the process forgets them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fanhub_auth::{RegisterRequest, UserStore};
//!
//! let store = UserStore::new();
//! store.register(request)?;
//! let session = store.login("ana@example.com", "secret1", true)?;
//! assert!(store.is_authenticated());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod store;

pub use store::{RegisterRequest, UserStore};
