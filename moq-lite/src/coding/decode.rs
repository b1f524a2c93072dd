use std::sync::Arc;

use bytes::Buf;

/// Mirrors [`super::Encode`]: decode a value from the front of a buffer.
pub trait Decode: Sized {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError>;
}

#[derive(Debug, thiserror::Error, Clone)]
pub enum DecodeError {
	#[error("unexpected end of buffer")]
	UnexpectedEnd,

	#[error("varint value {0} exceeds 2^53-1")]
	VarintOverflow(u64),

	#[error("invalid utf-8 string")]
	InvalidString(#[from] std::str::Utf8Error),

	#[error("message left {0} unread bytes")]
	TooManyBytes(usize),
}

impl Decode for u8 {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		if !r.has_remaining() {
			return Err(DecodeError::UnexpectedEnd);
		}
		Ok(r.get_u8())
	}
}

impl Decode for u64 {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		super::varint::decode(r)
	}
}

impl Decode for usize {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		Ok(u64::decode(r)? as usize)
	}
}

impl Decode for String {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		let len = usize::decode(r)?;
		if r.remaining() < len {
			return Err(DecodeError::UnexpectedEnd);
		}

		let mut buf = vec![0u8; len];
		r.copy_to_slice(&mut buf);
		String::from_utf8(buf).map_err(|err| DecodeError::InvalidString(err.utf8_error()))
	}
}

impl Decode for std::time::Duration {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		let micros = u64::decode(r)?;
		Ok(std::time::Duration::from_micros(micros))
	}
}

impl Decode for i8 {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		let raw = u8::decode(r)?;
		Ok((raw as i16 - 128) as i8)
	}
}

impl Decode for Vec<u8> {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		let len = usize::decode(r)?;
		if r.remaining() < len {
			return Err(DecodeError::UnexpectedEnd);
		}

		let mut buf = vec![0u8; len];
		r.copy_to_slice(&mut buf);
		Ok(buf)
	}
}

impl Decode for bytes::Bytes {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		Ok(Vec::<u8>::decode(r)?.into())
	}
}

impl<T: Decode> Decode for Arc<T> {
	fn decode<R: Buf>(r: &mut R) -> Result<Self, DecodeError> {
		Ok(Arc::new(T::decode(r)?))
	}
}
