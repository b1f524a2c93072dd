//! Encoding/decoding helpers for the wire-level pieces this crate still owns:
//! the varint frame timestamp prefix and the handful of primitives (`Path`,
//! track names, priorities) that ride alongside it. The full MoQ control-message
//! wire protocol (session setup, SUBSCRIBE/ANNOUNCE framing) belongs to the
//! transport collaborator and is out of scope here.

mod decode;
mod encode;
mod varint;

pub use decode::*;
pub use encode::*;
pub use varint::{decode as decode_varint, encode as encode_varint, encode_checked as encode_varint_checked, MAX_VARINT};

// Re-export the bytes crate, matching how callers already reach for `Bytes`/`BytesMut`.
pub use bytes::*;
