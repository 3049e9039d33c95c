//! Server crate for the storefront.
//!
//! This crate contains the snapshot cache and the storefront that
//! coordinates the product source and the query pipeline, plus the
//! configuration and landing profile they are set up from.

pub mod config;
pub mod landing;
pub mod snapshot;
pub mod storefront;

pub use config::{Config, ConfigError};
pub use landing::{Profile, ProfileLink};
pub use snapshot::{CacheState, RefreshOutcome, RefreshTicket, Snapshot, SnapshotCache};
pub use storefront::{DetailOutcome, ListingPage, ListingView, Storefront};
