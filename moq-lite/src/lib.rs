//! # moq-lite: transport primitives for the MoQ pub/sub media plane
//!
//! This crate provides the in-process producer/consumer model that the rest
//! of the stack (the `hang` media layer, and the `hang-wasm` playback
//! pipelines) is built on: broadcasts made of named tracks, tracks made of
//! ordered groups, groups made of ordered frames, and an `announced(prefix)`
//! discovery mechanism for finding broadcasts by name.
//!
//! Negotiating the underlying network transport (QUIC, WebTransport session
//! setup, congestion control) is explicitly out of scope. A real deployment
//! plugs network I/O in at the edges of this model: something reads bytes
//! off the wire and calls `TrackProducer::write_frame`, and something else
//! calls `TrackConsumer::next_group` and writes the result back to the wire.
//! This crate only owns the pub/sub bookkeeping in between.

mod error;
mod model;
mod path;

pub mod coding;

pub use error::*;
pub use model::*;
pub use path::*;
