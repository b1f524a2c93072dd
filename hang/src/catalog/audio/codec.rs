use std::str::FromStr;

use derive_more::{Display, From};

use crate::Error;

/// An AAC audio object type, as encoded in the `mp4a.40.N` WebCodecs codec string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AAC {
	pub profile: u8,
}

impl std::fmt::Display for AAC {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "mp4a.40.{}", self.profile)
	}
}

impl FromStr for AAC {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let profile = s.strip_prefix("mp4a.40.").ok_or(Error::InvalidCodec)?;
		Ok(Self {
			profile: profile.parse()?,
		})
	}
}

/// Supported audio codec mimetypes.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum AudioCodec {
	/// AAC codec with object-type information.
	AAC(AAC),

	/// Opus codec (no mimetype parameters).
	#[display("opus")]
	Opus,

	/// Unknown or unsupported codec with the original string preserved.
	#[display("{_0}")]
	Unknown(String),
}

impl FromStr for AudioCodec {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.starts_with("mp4a.40.") {
			return AAC::from_str(s).map(Into::into);
		} else if s == "opus" {
			return Ok(Self::Opus);
		}

		Ok(Self::Unknown(s.to_string()))
	}
}
