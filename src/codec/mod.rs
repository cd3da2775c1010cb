//! The RSP wire codec: framing, checksum, ack/nack, scalar parsing,
//! hex-byte-buffer codec, and binary-payload unescaping.

mod hex;
mod packet;

pub use hex::{checksum, decode_hex_bytes, encode_hex_bytes, parse_dec, parse_hex, unescape_binary};
pub use packet::{format_reply, FrameError, PacketBuffer, ACK, GETCHAR_BUFSIZ, NACK};
