//! # hang: media plane built on moq-lite
//!
//! `hang` adds the media-specific layer on top of [`moq_lite`]'s generic
//! pub/sub transport: a timestamped frame container, keyframe-driven group
//! rotation, latency-bounded group skipping, and a JSON catalog format that
//! describes the audio/video/chat/location/user/preview tracks available in
//! a broadcast.
//!
//! Importing media from an external container (fMP4/CMAF, Annex B) onto a
//! `hang` broadcast is outside this crate; it only describes the wire format
//! and in-memory model that a player consumes.

mod error;
mod model;

pub mod catalog;

// export the moq-lite version in use
pub use moq_lite;

pub use catalog::{Catalog, CatalogConsumer, CatalogProducer};
pub use error::*;
pub use model::*;
