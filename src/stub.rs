//! The top-level entry point: owns the packet buffer and the reply scratch,
//! and drives one request/reply cycle over a [`Transport`].

use crate::arch::{Active, RegMap};
use crate::codec::{self, PacketBuffer};
use crate::commands::DispatchOutcome;
use crate::delegate::{Delegate, Tcb};
use crate::dispatch::dispatch;
use crate::session::{SessionState, StopReason, WakeTarget};
use crate::transport::Transport;

/// Reply scratch size: one hex digit pair per byte of the largest possible
/// reply (a full `g` register dump), plus the assembled-frame overhead is
/// applied separately by [`codec::format_reply`].
const REPLY_BUFSIZ: usize = Active::NUM_GDB_REGISTERS * Active::WORD_BYTES * 2 + 1;

/// Scratch for decoding an inbound `M`/`X` payload before it's handed to the
/// delegate. Sized to the largest single memory command this stub accepts.
const WRITE_BUFSIZ: usize = crate::commands::MAX_MEM_RANGE;

/// Ties the codec, dispatcher and session together over one transport.
///
/// Generic over the delegate (`D`), the fault-handoff primitive (`W`) and the
/// transport (`T`), so the embedding component supplies all three concrete
/// implementations; this crate supplies only the orchestration.
pub struct GdbStub<D: Delegate, W: WakeTarget, T: Transport> {
    delegate: D,
    session: SessionState<W>,
    transport: T,
    packet_buf: PacketBuffer,
    reply_buf: [u8; REPLY_BUFSIZ],
    write_buf: [u8; WRITE_BUFSIZ],
}

impl<D: Delegate, W: WakeTarget, T: Transport> GdbStub<D, W, T> {
    pub fn new(delegate: D, wake_target: W, transport: T, current_thread_tcb: Tcb) -> Self {
        GdbStub {
            delegate,
            session: SessionState::new(current_thread_tcb, wake_target),
            transport,
            packet_buf: PacketBuffer::default(),
            reply_buf: [0; REPLY_BUFSIZ],
            write_buf: [0; WRITE_BUFSIZ],
        }
    }

    /// Record a fault observed by the external interceptor, ahead of the
    /// stub's next `?` query or outgoing stop reply.
    pub fn record_fault(&mut self, reason: StopReason) {
        self.session.record_fault(reason);
    }

    /// Read, dispatch and reply to exactly one inbound packet.
    ///
    /// Returns `Err` only on a transport I/O failure; protocol-level errors
    /// (bad checksum, malformed arguments, delegate failure) are handled
    /// internally and never propagate here.
    pub fn serve_one(&mut self) -> Result<(), T::Error> {
        let n = self.transport.recv_packet(&mut self.packet_buf.data)?;

        if self.packet_buf.frame(n).is_err() {
            log::warn!("dropping malformed packet");
            return Ok(());
        }

        if self.packet_buf.verify_checksum().is_err() {
            log::warn!("checksum mismatch, sending nack");
            self.transport.send(&[codec::NACK])?;
            return Ok(());
        }
        self.transport.send(&[codec::ACK])?;

        #[cfg(feature = "trace-pkt")]
        log::trace!("recv: {:?}", core::str::from_utf8(self.packet_buf.payload()));

        // Re-borrow payload length only; the packet buffer is immutable for
        // the rest of this call, so the dispatcher scratch buffers can be
        // borrowed independently of it.
        let payload_len = self.packet_buf.checksum_index - 1;
        let mut payload_copy = [0u8; crate::codec::GETCHAR_BUFSIZ];
        payload_copy[..payload_len].copy_from_slice(self.packet_buf.payload());

        let outcome = dispatch(
            &payload_copy[..payload_len],
            &mut self.session,
            &mut self.delegate,
            &mut self.reply_buf,
            &mut self.write_buf,
        );

        send_outcome(&mut self.transport, outcome)
    }

    /// Emit the stop reply for the current session state. Called by the
    /// embedding component after a `c`/`s`/`vCont` reply handed control back
    /// to the target and the fault interceptor observed the next trap.
    pub fn send_stop_reply(&mut self) -> Result<(), T::Error> {
        let n = crate::commands::stop::format_stop_reply(self.session.stop_reason, &mut self.reply_buf);
        send_outcome(&mut self.transport, DispatchOutcome::reply(&self.reply_buf[..n]))
    }
}

/// Frame and send a handler's outcome. Free function (rather than a method)
/// so the caller can hold an outstanding borrow into `self`'s scratch
/// buffers — the source of `outcome`'s payload — while only `transport` is
/// borrowed here.
fn send_outcome<T: Transport>(transport: &mut T, outcome: DispatchOutcome<'_>) -> Result<(), T::Error> {
    match outcome {
        DispatchOutcome::NoReply => Ok(()),
        DispatchOutcome::Reply(payload) => {
            let mut frame = [0u8; crate::codec::GETCHAR_BUFSIZ];
            match codec::format_reply(payload, &mut frame) {
                Some(len) => {
                    #[cfg(feature = "trace-pkt")]
                    log::trace!("send: {:?}", core::str::from_utf8(payload));
                    transport.send(&frame[..len])
                }
                None => {
                    log::error!("reply too large for frame scratch ({} bytes)", payload.len());
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::{AccessMode, BreakType, DelegateError, UserContext};
    use crate::session::test_support::CountingWake;
    use std::vec::Vec;

    /// Records every call to `send`; replays a fixed queue of inbound
    /// packets to `recv_packet`, one per call.
    struct FakeTransport {
        packets: Vec<Vec<u8>>,
        next: usize,
        sent: Vec<Vec<u8>>,
    }

    impl FakeTransport {
        fn queue(packets: &[&[u8]]) -> Self {
            FakeTransport {
                packets: packets.iter().map(|p| p.to_vec()).collect(),
                next: 0,
                sent: Vec::new(),
            }
        }
    }

    impl Transport for FakeTransport {
        type Error = ();

        fn recv_packet(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let pkt = self.packets.get(self.next).ok_or(())?;
            self.next += 1;
            buf[..pkt.len()].copy_from_slice(pkt);
            Ok(pkt.len())
        }

        fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            self.sent.push(bytes.to_vec());
            Ok(())
        }
    }

    struct FakeDelegate {
        ctx: UserContext,
    }

    impl Delegate for FakeDelegate {
        fn read_memory(&mut self, _: u64, _: usize, _: &mut [u8]) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn write_memory(&mut self, _: u64, _: &[u8]) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn read_registers(&mut self, _: Tcb) -> Result<UserContext, DelegateError> {
            Ok(self.ctx)
        }
        fn read_register(&mut self, _: Tcb, slot: usize) -> Result<u64, DelegateError> {
            Ok(self.ctx.word_at(slot))
        }
        fn write_registers(&mut self, _: Tcb, _: &UserContext, _: usize) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn write_register(&mut self, _: Tcb, _: usize, _: u64) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn insert_break(&mut self, _: Tcb, _: BreakType, _: u64, _: u64, _: AccessMode) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn remove_break(&mut self, _: Tcb, _: BreakType, _: u64, _: u64, _: AccessMode) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn resume(&mut self, _: Tcb) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn step(&mut self, _: Tcb) -> Result<(), DelegateError> {
            unimplemented!()
        }
    }

    fn stub_with(transport: FakeTransport) -> GdbStub<FakeDelegate, CountingWake, FakeTransport> {
        GdbStub::new(
            FakeDelegate {
                ctx: UserContext::default(),
            },
            CountingWake::default(),
            transport,
            Tcb(1),
        )
    }

    #[test]
    fn checksum_mismatch_sends_nack_only() {
        // "g" checksums to 0x67; 00 is wrong, so verify_checksum() fails.
        let mut stub = stub_with(FakeTransport::queue(&[b"$g#00"]));
        stub.serve_one().unwrap();
        assert_eq!(stub.transport.sent, vec![vec![codec::NACK]]);
    }

    #[test]
    fn malformed_frame_is_silently_dropped() {
        // No '#' terminator at all: frame() fails before checksum is even
        // considered, so not even a nack is sent.
        let mut stub = stub_with(FakeTransport::queue(&[b"no-hash-here"]));
        stub.serve_one().unwrap();
        assert!(stub.transport.sent.is_empty());
    }

    #[test]
    fn valid_packet_acks_before_replying() {
        // "?" checksums to 0x3f.
        let mut stub = stub_with(FakeTransport::queue(&[b"$?#3f"]));
        stub.serve_one().unwrap();
        assert_eq!(stub.transport.sent.len(), 2);
        assert_eq!(stub.transport.sent[0], vec![codec::ACK]);
        assert!(stub.transport.sent[1].starts_with(b"$T05thread:01;#"));
    }
}
