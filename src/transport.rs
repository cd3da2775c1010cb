//! The byte-level transport façade: reading one framed packet in, writing
//! reply bytes out. Out of scope for this crate's logic — the concrete
//! transport (typically a serial line) lives in component-framework glue —
//! but the contract lives here, in the teacher's `Connection`-trait idiom.

/// A byte-oriented, blocking transport.
///
/// The core assumes the transport is line-oriented enough for interactive
/// debugging but imposes no framing requirement of its own; all framing is
/// handled by [`crate::codec`].
pub trait Transport {
    type Error;

    /// Block until one framed packet (`$...#hh`, or a bare `+`/`-`/Ctrl-C)
    /// has been read into `buf`, returning the number of bytes written.
    fn recv_packet(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write raw bytes (an ack/nack byte, or a full `$...#hh\n` reply).
    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}
