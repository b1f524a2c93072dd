/// Errors raised by the playback pipelines: jitter buffering, audio/video
/// decode driving, and catalog orchestration.
#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
	/// A decoder was asked to start a second decode before the first one
	/// returned. The platform decoder abstraction only supports one
	/// outstanding `decode()` call at a time per instance.
	#[error("a decode is already in flight on this decoder")]
	MultipleDecoders,

	/// The platform decoder reported a failure (codec error, corrupt data, etc).
	#[error("decoder error: {0}")]
	DecoderError(String),

	/// Failed to parse a catalog while orchestrating a broadcast.
	#[error("catalog parse error: {0}")]
	CatalogParse(String),

	/// A ring buffer operation was given a sample count that doesn't match
	/// its configured channel layout.
	#[error("sample buffer size mismatch: expected a multiple of {expected} channels, got {actual}")]
	BufferMismatch { expected: usize, actual: usize },

	#[error(transparent)]
	Hang(#[from] hang::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<hang::moq_lite::Error> for Error {
	fn from(err: hang::moq_lite::Error) -> Self {
		Error::Hang(err.into())
	}
}
