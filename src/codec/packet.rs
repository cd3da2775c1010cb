//! Inbound packet framing: `$<payload>#<hh>`.

use super::hex::checksum;

/// Size of the fixed inbound scratch buffer.
pub const GETCHAR_BUFSIZ: usize = 512;

/// Ack byte sent on checksum match.
pub const ACK: u8 = b'+';
/// Nack byte sent on checksum mismatch.
pub const NACK: u8 = b'-';

/// A frame error: the buffer did not contain a well-formed `$...#hh` packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// No `#` terminator found, or it appears before any payload.
    Malformed,
    /// The two-digit checksum tail isn't valid hex.
    BadChecksumDigits,
    /// The computed checksum doesn't match the received one.
    ChecksumMismatch,
}

/// A fixed-size inbound byte buffer with the three cursors from `spec.md`
/// §3: total `length`, `checksum_index` (position of `#`), and
/// `checksum_count` (remaining characters of the two-digit tail).
///
/// Filled by the transport and consumed exactly once per packet.
pub struct PacketBuffer {
    pub data: [u8; GETCHAR_BUFSIZ],
    pub length: usize,
    pub checksum_index: usize,
    pub checksum_count: usize,
}

impl Default for PacketBuffer {
    fn default() -> Self {
        PacketBuffer {
            data: [0; GETCHAR_BUFSIZ],
            length: 0,
            checksum_index: 0,
            checksum_count: 0,
        }
    }
}

impl PacketBuffer {
    /// Reset cursors after a framed packet (`$...#hh`) has been appended to
    /// `data[..length]` by the transport. Locates `#` and validates there
    /// are two trailing hex digits.
    pub fn frame(&mut self, length: usize) -> Result<(), FrameError> {
        self.length = length;
        let body = &self.data[..length];
        let hash = body
            .iter()
            .position(|&b| b == b'#')
            .ok_or(FrameError::Malformed)?;
        if hash == 0 || hash + 3 > length {
            return Err(FrameError::Malformed);
        }
        self.checksum_index = hash;
        self.checksum_count = 2;
        Ok(())
    }

    /// The payload bytes, i.e. everything between `$` and `#`.
    pub fn payload(&self) -> &[u8] {
        &self.data[1..self.checksum_index]
    }

    /// Verify the two-hex-digit checksum tail against the computed checksum
    /// of [`PacketBuffer::payload`].
    pub fn verify_checksum(&self) -> Result<(), FrameError> {
        let tail = &self.data[self.checksum_index + 1..self.checksum_index + 1 + self.checksum_count];
        let received = super::hex::parse_hex(tail).ok_or(FrameError::BadChecksumDigits)? as u8;
        let computed = checksum(self.payload());
        if computed != received {
            return Err(FrameError::ChecksumMismatch);
        }
        Ok(())
    }
}

/// Format `payload` as an outbound RSP frame: `$<payload>#<hh>\n`.
///
/// Returns the number of bytes written to `out`, or `None` if `out` is too
/// small. A payload of length zero is legal (used to signal "unsupported").
pub fn format_reply(payload: &[u8], out: &mut [u8]) -> Option<usize> {
    let needed = payload.len() + 4; // '$' + payload + '#' + 2 hex digits (no trailing \n counted here)
    if out.len() < needed + 1 {
        return None;
    }
    out[0] = b'$';
    out[1..1 + payload.len()].copy_from_slice(payload);
    out[1 + payload.len()] = b'#';
    let cksum = checksum(payload);
    super::hex::encode_hex_bytes(&[cksum], &mut out[2 + payload.len()..])?;
    // encode_hex_bytes writes lowercase; RSP conventionally uses uppercase
    // two-digit checksums on the wire.
    out[2 + payload.len()] = out[2 + payload.len()].to_ascii_uppercase();
    out[3 + payload.len()] = out[3 + payload.len()].to_ascii_uppercase();
    out[4 + payload.len()] = b'\n';
    Some(needed + 1)
}
