//! First-byte/prefix classification and routing (`spec.md` §4.3).
//!
//! [`dispatch`] owns no state of its own; it borrows the session and delegate
//! for the duration of one packet and returns the [`commands::DispatchOutcome`]
//! the caller (`stub::GdbStub`) frames and sends.

use crate::commands::{self, DispatchOutcome};
use crate::delegate::{Delegate, Tcb};
use crate::session::{SessionState, WakeTarget};

/// Route one packet payload (without the `$...#hh` wrapper) to its handler.
///
/// `reply_scratch` backs any handler that must assemble a reply in place
/// (`g`, `m`); `write_scratch` backs any handler that must first decode an
/// inbound hex/binary payload before acting on it (`M`, `X`).
pub fn dispatch<'a, D: Delegate, W: WakeTarget>(
    packet: &[u8],
    session: &mut SessionState<W>,
    delegate: &mut D,
    reply_scratch: &'a mut [u8],
    write_scratch: &mut [u8],
) -> DispatchOutcome<'a> {
    let tcb = session.current_thread_tcb;
    let (first, body) = match packet.split_first() {
        Some((f, b)) => (*f, b),
        None => return DispatchOutcome::NoReply,
    };

    match first {
        b'?' => DispatchOutcome::reply(crate::commands::stop::handle(session.stop_reason, reply_scratch)),
        b'g' => commands::registers::read_all(tcb, delegate, reply_scratch),
        b'G' => DispatchOutcome::reply(commands::registers::write_all(body, session, delegate)),
        b'p' => commands::registers::read_one(body, tcb, delegate, reply_scratch),
        b'P' => DispatchOutcome::reply(commands::registers::write_one(body, session, delegate)),
        b'm' => commands::memory::read(body, delegate, reply_scratch),
        b'M' => commands::memory::write(body, delegate, write_scratch),
        b'X' => commands::memory::write_binary(body, delegate, write_scratch),
        b'c' => commands::resume::cont(session, delegate),
        b's' => commands::resume::step(session, delegate),
        b'z' => commands::breakpoints::handle(body, false, tcb, delegate),
        b'Z' => commands::breakpoints::handle(body, true, tcb, delegate),
        b'H' => DispatchOutcome::reply(b"OK"),
        b'q' => DispatchOutcome::reply(commands::query::handle(body)),
        b'v' => dispatch_v(body, session, delegate),
        _ => {
            log::debug!("unrecognised packet first byte 0x{:02x}", first);
            DispatchOutcome::NoReply
        }
    }
}

fn dispatch_v<'a, D: Delegate, W: WakeTarget>(
    body: &[u8],
    session: &mut SessionState<W>,
    delegate: &mut D,
) -> DispatchOutcome<'a> {
    if body == b"Cont?" {
        DispatchOutcome::reply(b"vCont;c;s")
    } else if let Some(rest) = body.strip_prefix(b"Cont") {
        commands::resume::vcont(rest, session, delegate)
    } else if body.starts_with(b"Kill") || body == b"MustReplyEmpty" {
        DispatchOutcome::reply(b"")
    } else {
        log::debug!("unrecognised 'v' packet");
        DispatchOutcome::NoReply
    }
}
