//! `g`/`G` (read/write all registers) and `p`/`P` (read/write one register).

use super::{format_absent, format_reg_value, parse_reg_value, DispatchOutcome};
use crate::arch::{Active, RegMap};
use crate::codec::parse_hex;
use crate::delegate::{Delegate, Tcb};
use crate::session::SessionState;
use crate::session::WakeTarget;

/// `g`: read all registers.
pub fn read_all<'a, D: Delegate>(tcb: Tcb, delegate: &mut D, out: &'a mut [u8]) -> DispatchOutcome<'a> {
    let ctx = match delegate.read_registers(tcb) {
        Ok(ctx) => ctx,
        Err(_) => return DispatchOutcome::reply(b"E01"),
    };

    let mut pos = 0;
    for i in 0..Active::NUM_GDB_REGISTERS {
        let written = match Active::to_slot(i) {
            Some(slot) => format_reg_value(ctx.word_at(slot), &mut out[pos..]),
            None => format_absent(&mut out[pos..]),
        };
        match written {
            Some(n) => pos += n,
            None => {
                log::error!("reply scratch buffer too small for 'g' register dump");
                return DispatchOutcome::reply(b"E01");
            }
        }
    }
    DispatchOutcome::reply(&out[..pos])
}

/// `p<hex-idx>`: read one register.
pub fn read_one<'a, D: Delegate>(
    body: &[u8],
    tcb: Tcb,
    delegate: &mut D,
    out: &'a mut [u8],
) -> DispatchOutcome<'a> {
    let idx = match parse_hex(body) {
        Some(idx) => idx,
        None => return DispatchOutcome::reply(b"E00"),
    };
    if idx >= Active::NUM_GDB_REGISTERS {
        return DispatchOutcome::reply(b"E00");
    }
    let slot = match Active::to_slot(idx) {
        Some(slot) => slot,
        // Absent slot on the single-register path is E00, unlike the `g`
        // dump, which reports `xxxx...` for the same register.
        None => return DispatchOutcome::reply(b"E00"),
    };
    let value = match delegate.read_register(tcb, slot) {
        Ok(v) => v,
        Err(_) => return DispatchOutcome::reply(b"E01"),
    };
    match format_reg_value(value, out) {
        Some(n) => DispatchOutcome::reply(&out[..n]),
        None => DispatchOutcome::reply(b"E01"),
    }
}

/// `G<hex-string>`: write all registers.
pub fn write_all<D: Delegate, W: WakeTarget>(
    body: &[u8],
    session: &mut SessionState<W>,
    delegate: &mut D,
) -> &'static [u8] {
    let word_chars = Active::WORD_BYTES * 2;
    let num_words = (body.len() / word_chars).min(Active::KERNEL_REG_COUNT);

    let mut ctx = crate::delegate::UserContext::default();
    for i in 0..num_words {
        let chunk = &body[i * word_chars..(i + 1) * word_chars];
        if let Some(slot) = Active::to_slot(i) {
            match parse_reg_value(chunk) {
                Some(value) => ctx.set_word_at(slot, value),
                None => {
                    log::warn!("'G': malformed hex word at register index {}", i);
                    return b"E00";
                }
            }
        } else {
            log::warn!("'G': ignoring write to absent register index {}", i);
        }
    }

    if delegate
        .write_registers(session.current_thread_tcb, &ctx, num_words)
        .is_err()
    {
        return b"E01";
    }

    if let Some(pc_slot) = Active::to_slot(Active::PC_INDEX) {
        session.current_pc = ctx.word_at(pc_slot);
    }
    b"OK"
}

/// `P<hex-idx>=<hex-value>`: write one register.
pub fn write_one<D: Delegate, W: WakeTarget>(
    body: &[u8],
    session: &mut SessionState<W>,
    delegate: &mut D,
) -> &'static [u8] {
    let mut parts = body.splitn(2, |&b| b == b'=');
    let idx_str = parts.next().unwrap_or(&[]);
    let val_str = parts.next();

    let idx = parse_hex(idx_str);
    let val_str = match val_str {
        Some(v) => v,
        None => return b"OK",
    };

    // GDB tolerance: an out-of-range register index is silently ignored,
    // not an error.
    let idx = match idx {
        Some(idx) if idx < Active::NUM_GDB_REGISTERS => idx,
        _ => return b"OK",
    };

    if let Some(slot) = Active::to_slot(idx) {
        match parse_reg_value(val_str) {
            Some(value) => {
                if delegate
                    .write_register(session.current_thread_tcb, slot, value)
                    .is_err()
                {
                    log::error!("'P': delegate write_register failed for index {}", idx);
                } else if idx == Active::PC_INDEX {
                    session.current_pc = value;
                }
            }
            None => log::warn!("'P': malformed hex value for index {}", idx),
        }
    } else {
        log::warn!("'P': ignoring write to absent register index {}", idx);
    }
    b"OK"
}
