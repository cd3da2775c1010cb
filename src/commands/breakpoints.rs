//! `z`/`Z` (remove/insert breakpoint).
//!
//! Packet form: `<type>,<addr>,<size>` (the leading `z`/`Z` byte has already
//! been stripped by the dispatcher).

use super::DispatchOutcome;
use crate::codec::parse_hex;
use crate::delegate::{AccessMode, BreakType, Delegate, Tcb};

/// RSP breakpoint-type discriminant, as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RspKind {
    SoftwareBreak,
    HardwareBreak,
    WriteWatch,
    ReadWatch,
    AccessWatch,
}

fn kernel_format(kind: RspKind) -> Option<(BreakType, AccessMode)> {
    match kind {
        RspKind::SoftwareBreak => None,
        RspKind::HardwareBreak => Some((BreakType::Instruction, AccessMode::Read)),
        RspKind::WriteWatch => Some((BreakType::Data, AccessMode::Write)),
        RspKind::ReadWatch => Some((BreakType::Data, AccessMode::Read)),
        RspKind::AccessWatch => Some((BreakType::Data, AccessMode::ReadWrite)),
    }
}

fn parse_kind(v: usize) -> Option<RspKind> {
    match v {
        0 => Some(RspKind::SoftwareBreak),
        1 => Some(RspKind::HardwareBreak),
        2 => Some(RspKind::WriteWatch),
        3 => Some(RspKind::ReadWatch),
        4 => Some(RspKind::AccessWatch),
        _ => None,
    }
}

/// Handle either `z` (`insert = false`) or `Z` (`insert = true`).
pub fn handle<'a, D: Delegate>(
    body: &[u8],
    insert: bool,
    tcb: Tcb,
    delegate: &mut D,
) -> DispatchOutcome<'a> {
    let mut parts = body.split(|&b| b == b',');
    let type_str = parts.next().unwrap_or(&[]);
    let addr_str = parts.next().unwrap_or(&[]);
    let size_str = parts.next().unwrap_or(&[]);

    let (kind_raw, addr, mut size) = match (
        parse_hex(type_str),
        parse_hex(addr_str),
        parse_hex(size_str),
    ) {
        (Some(k), Some(a), Some(s)) => (k, a as u64, s as u64),
        _ => return DispatchOutcome::reply(b"E00"),
    };

    let kind = match parse_kind(kind_raw) {
        Some(k) => k,
        None => return DispatchOutcome::reply(b"E00"),
    };

    let (ty, access) = match kernel_format(kind) {
        Some(v) => v,
        None => {
            // Software breakpoints: unsupported, GDB falls back to a memory
            // patch.
            return DispatchOutcome::reply(b"");
        }
    };

    if kind == RspKind::HardwareBreak {
        size = 0;
    }

    let result = if insert {
        delegate.insert_break(tcb, ty, addr, size, access)
    } else {
        delegate.remove_break(tcb, ty, addr, size, access)
    };

    match result {
        Ok(()) => DispatchOutcome::reply(b"OK"),
        Err(_) => {
            log::error!("couldn't {} breakpoint", if insert { "set" } else { "clear" });
            DispatchOutcome::reply(b"E01")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::{DelegateError, UserContext};

    struct FakeDelegate;
    impl Delegate for FakeDelegate {
        fn read_memory(&mut self, _: u64, _: usize, _: &mut [u8]) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn write_memory(&mut self, _: u64, _: &[u8]) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn read_registers(&mut self, _: Tcb) -> Result<UserContext, DelegateError> {
            unimplemented!()
        }
        fn read_register(&mut self, _: Tcb, _: usize) -> Result<u64, DelegateError> {
            unimplemented!()
        }
        fn write_registers(&mut self, _: Tcb, _: &UserContext, _: usize) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn write_register(&mut self, _: Tcb, _: usize, _: u64) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn insert_break(&mut self, _: Tcb, _: BreakType, _: u64, _: u64, _: AccessMode) -> Result<(), DelegateError> {
            Ok(())
        }
        fn remove_break(&mut self, _: Tcb, _: BreakType, _: u64, _: u64, _: AccessMode) -> Result<(), DelegateError> {
            Ok(())
        }
        fn resume(&mut self, _: Tcb) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn step(&mut self, _: Tcb) -> Result<(), DelegateError> {
            unimplemented!()
        }
    }

    #[test]
    fn software_breakpoint_is_unsupported() {
        let mut d = FakeDelegate;
        let r = handle(b"0,1000,1", true, Tcb(1), &mut d);
        match r {
            DispatchOutcome::Reply(b) => assert_eq!(b, b""),
            DispatchOutcome::NoReply => panic!(),
        }
    }

    #[test]
    fn hardware_breakpoint_insert_ok() {
        let mut d = FakeDelegate;
        let r = handle(b"1,1000,4", true, Tcb(1), &mut d);
        match r {
            DispatchOutcome::Reply(b) => assert_eq!(b, b"OK"),
            DispatchOutcome::NoReply => panic!(),
        }
    }
}
