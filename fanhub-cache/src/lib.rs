//! Time-boxed response cache for FanHub.
//!
//! Generic in-memory cache keyed by a request fingerprint. An entry is fresh
//! while its age is strictly below the configured TTL; after that every
//! lookup is a miss until the entry is overwritten.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod clock;
mod fingerprint;

pub use cache::{CacheConfig, CacheStats, TimedCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use fingerprint::Fingerprint;
