use bytes::{Buf, BufMut};

use super::DecodeError;

/// The largest value representable by the varint encoding: 2^53 - 1.
///
/// Chosen so that every valid varint also round-trips through an `f64`,
/// which matters once these values cross into JSON (the catalog) or JS.
pub const MAX_VARINT: u64 = (1 << 53) - 1;

/// Write `v` as a QUIC-style self-describing variable-length integer.
///
/// The top two bits of the first byte select the encoded length:
/// `00` => 1 byte (6 bits of value), `01` => 2 bytes (14 bits),
/// `10` => 4 bytes (30 bits), `11` => 8 bytes (62 bits, but values are
/// further capped at [`MAX_VARINT`]).
///
/// Panics if `v > MAX_VARINT`; callers that can receive arbitrary values
/// (the frame envelope) must check with [`encode_checked`] instead.
pub fn encode<W: BufMut>(v: u64, w: &mut W) {
	encode_checked(v, w).expect("varint value exceeds 2^53-1")
}

/// Fallible form of [`encode`], returning `Err` instead of panicking.
pub fn encode_checked<W: BufMut>(v: u64, w: &mut W) -> Result<(), DecodeError> {
	if v > MAX_VARINT {
		return Err(DecodeError::VarintOverflow(v));
	}

	if v <= 0x3f {
		w.put_u8(v as u8);
	} else if v <= 0x3fff {
		w.put_u16(0x4000 | v as u16);
	} else if v <= 0x3fff_ffff {
		w.put_u32(0x8000_0000 | v as u32);
	} else {
		w.put_u64(0xc000_0000_0000_0000 | v);
	}

	Ok(())
}

/// Decode a varint written by [`encode`], advancing `r` past the value.
pub fn decode<R: Buf>(r: &mut R) -> Result<u64, DecodeError> {
	if !r.has_remaining() {
		return Err(DecodeError::UnexpectedEnd);
	}

	let first = r.chunk()[0];
	let tag = first >> 6;

	let v = match tag {
		0b00 => {
			if r.remaining() < 1 {
				return Err(DecodeError::UnexpectedEnd);
			}
			(r.get_u8() & 0x3f) as u64
		}
		0b01 => {
			if r.remaining() < 2 {
				return Err(DecodeError::UnexpectedEnd);
			}
			(r.get_u16() & 0x3fff) as u64
		}
		0b10 => {
			if r.remaining() < 4 {
				return Err(DecodeError::UnexpectedEnd);
			}
			(r.get_u32() & 0x3fff_ffff) as u64
		}
		0b11 => {
			if r.remaining() < 8 {
				return Err(DecodeError::UnexpectedEnd);
			}
			r.get_u64() & 0x3fff_ffff_ffff_ffff
		}
		_ => unreachable!("2-bit tag"),
	};

	Ok(v)
}

#[cfg(test)]
mod tests {
	use super::*;
	use bytes::BytesMut;

	fn roundtrip(v: u64) -> u64 {
		let mut buf = BytesMut::new();
		encode(v, &mut buf);
		decode(&mut buf.freeze()).unwrap()
	}

	#[test]
	fn roundtrip_boundaries() {
		for &v in &[
			0,
			1,
			0x3f,
			0x40,
			0x3fff,
			0x4000,
			0x3fff_ffff,
			0x4000_0000,
			MAX_VARINT - 1,
			MAX_VARINT,
		] {
			assert_eq!(roundtrip(v), v, "value {v}");
		}
	}

	#[test]
	fn uses_minimal_length_class() {
		let mut buf = BytesMut::new();
		encode(0x3f, &mut buf);
		assert_eq!(buf.len(), 1);

		let mut buf = BytesMut::new();
		encode(0x40, &mut buf);
		assert_eq!(buf.len(), 2);

		let mut buf = BytesMut::new();
		encode(0x3fff, &mut buf);
		assert_eq!(buf.len(), 2);

		let mut buf = BytesMut::new();
		encode(0x4000, &mut buf);
		assert_eq!(buf.len(), 4);

		let mut buf = BytesMut::new();
		encode(0x3fff_ffff, &mut buf);
		assert_eq!(buf.len(), 4);

		let mut buf = BytesMut::new();
		encode(0x4000_0000, &mut buf);
		assert_eq!(buf.len(), 8);
	}

	#[test]
	fn rejects_overflow() {
		let mut buf = BytesMut::new();
		assert!(matches!(
			encode_checked(MAX_VARINT + 1, &mut buf),
			Err(DecodeError::VarintOverflow(_))
		));
	}

	#[test]
	fn rejects_short_buffer() {
		let mut buf = BytesMut::new();
		buf.put_u8(0x40); // claims a 2-byte form but only one byte follows
		assert!(matches!(decode(&mut buf), Err(DecodeError::UnexpectedEnd)));
	}
}
