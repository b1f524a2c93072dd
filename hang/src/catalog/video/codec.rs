use std::str::FromStr;

use derive_more::{Display, From};

use crate::Error;

/// An H.264/AVC profile, constraint flags, and level, as encoded in the
/// `avc1.PPCCLL` WebCodecs codec string (each pair of letters one hex byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct H264 {
	pub profile: u8,
	pub constraints: u8,
	pub level: u8,
}

impl std::fmt::Display for H264 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "avc1.{:02x}{:02x}{:02x}", self.profile, self.constraints, self.level)
	}
}

impl FromStr for H264 {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let hex = s.strip_prefix("avc1.").ok_or(Error::InvalidCodec)?;
		if hex.len() != 6 {
			return Err(Error::InvalidCodec);
		}
		let bytes = hex::decode(hex)?;
		Ok(Self {
			profile: bytes[0],
			constraints: bytes[1],
			level: bytes[2],
		})
	}
}

/// Supported video codec mimetypes.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum VideoCodec {
	/// H.264/AVC codec with profile and level information.
	H264(H264),

	/// VP8 codec (no additional parameters).
	#[display("vp8")]
	VP8,

	/// Unknown or unsupported codec with the original string preserved.
	#[display("{_0}")]
	Unknown(String),
}

impl FromStr for VideoCodec {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.starts_with("avc1.") {
			return H264::from_str(s).map(Into::into);
		} else if s == "vp8" {
			return Ok(Self::VP8);
		}

		Ok(Self::Unknown(s.to_string()))
	}
}
