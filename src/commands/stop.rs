//! `?` (last stop reason) and the stop-event reply table shared with the
//! stop/resume controller.

use crate::session::StopReason;

/// Format the canonical `T05` stop reply for `reason` into `out`.
///
/// Signal number is fixed at `05` (`SIGTRAP`) and thread id at `01`,
/// matching the single-thread, hardware-trap-only contract of this stub.
pub fn format_stop_reply(reason: StopReason, out: &mut [u8]) -> usize {
    let text: &[u8] = match reason {
        StopReason::HardwareBreak => b"T05thread:01;hwbreak:;",
        StopReason::SoftwareBreak => b"T05thread:01;swbreak:;",
        StopReason::Step => b"T05thread:01;",
        StopReason::Watch { addr } => {
            let mut buf = *b"T05thread:01;watch:00000000;";
            // addr8hex: low 32 bits, lowercase hex, zero-padded.
            let mut hex = [0u8; 8];
            crate::codec::encode_hex_bytes(&(addr as u32).to_be_bytes(), &mut hex);
            buf[19..27].copy_from_slice(&hex);
            return write_fixed(out, &buf);
        }
        StopReason::None => {
            log::warn!("stop reply requested with no recorded stop reason");
            b"T05thread:01;"
        }
    };
    write_fixed(out, text)
}

fn write_fixed(out: &mut [u8], text: &[u8]) -> usize {
    let n = text.len().min(out.len());
    out[..n].copy_from_slice(&text[..n]);
    n
}

/// `?`: report the last stop reason.
pub fn handle<'a>(reason: StopReason, out: &'a mut [u8]) -> &'a [u8] {
    let n = format_stop_reply(reason, out);
    &out[..n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_break() {
        let mut out = [0u8; 64];
        let r = handle(StopReason::HardwareBreak, &mut out);
        assert_eq!(r, b"T05thread:01;hwbreak:;");
    }

    #[test]
    fn software_break() {
        let mut out = [0u8; 64];
        let r = handle(StopReason::SoftwareBreak, &mut out);
        assert_eq!(r, b"T05thread:01;swbreak:;");
    }

    #[test]
    fn step() {
        let mut out = [0u8; 64];
        let r = handle(StopReason::Step, &mut out);
        assert_eq!(r, b"T05thread:01;");
    }

    #[test]
    fn watch() {
        let mut out = [0u8; 64];
        let r = handle(StopReason::Watch { addr: 0x1000 }, &mut out);
        assert_eq!(r, b"T05thread:01;watch:00001000;");
    }

    #[test]
    fn none_falls_back_to_bare_trap() {
        let mut out = [0u8; 64];
        let r = handle(StopReason::None, &mut out);
        assert_eq!(r, b"T05thread:01;");
    }
}
