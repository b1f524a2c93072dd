/// Errors produced by the in-process transport model (tracks, groups,
/// broadcasts, and the announce registry).
///
/// This intentionally does not include session/connection-level errors
/// (handshake failure, version mismatch, stream resets): those belong to
/// the network transport collaborator, which is out of scope for this crate.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
	/// The operation was cancelled, typically because the other end of a
	/// producer/consumer pair was dropped without an explicit close.
	#[error("cancelled")]
	Cancel,

	/// The last producer handle was dropped without calling `finish`.
	#[error("producer dropped")]
	Dropped,

	/// The track, group, or broadcast was closed normally.
	#[error("closed")]
	Closed,

	/// A decode error while parsing a wire primitive (e.g. a varint).
	#[error("decode error: {0}")]
	Decode(#[from] crate::coding::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
