//! `q...` general query packets.

/// Dispatch a `q` packet. `body` is everything after the leading `q`.
pub fn handle(body: &[u8]) -> &'static [u8] {
    if body.starts_with(b"Supported") {
        return b"swbreak+;hwbreak+;PacketSize=100";
    }
    match body {
        b"C" => b"QC1",
        b"fThreadInfo" => b"m01",
        b"sThreadInfo" => b"l",
        b"TStatus" | b"TfV" | b"Attached" => b"",
        _ if body.starts_with(b"Symbol") => b"",
        _ if body.starts_with(b"Offsets") => b"",
        _ => b"E01",
    }
}
