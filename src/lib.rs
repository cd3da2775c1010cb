//! A GDB Remote Serial Protocol (RSP) stub for a single debugged thread
//! running in another protection domain on a capability-based microkernel.
//!
//! This crate implements the *core* of the stub: packet framing, the
//! architecture-parameterised register map, the command dispatcher, and the
//! stop/resume state machine. It does not implement a transport (serial,
//! TCP, ...) or the capability-invoking "delegate" operations that actually
//! touch the debugged thread's memory and registers — those are external
//! collaborators, described by the [`delegate::Delegate`] and
//! [`transport::Transport`] traits.
//!
//! ## Features
//!
//! - `std` (default): links against `std` instead of building `no_std`.
//! - `trace-pkt` (default): trace every inbound/outbound packet via `log`.
//! - Exactly one `arch-*` feature selects the active architecture's register
//!   map at compile time. Defaults to `arch-x86_64`.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod arch;
pub mod codec;
pub mod commands;
pub mod delegate;
pub mod dispatch;
pub mod session;
pub mod stub;
pub mod transport;

pub use session::{SessionState, StopReason};
pub use stub::GdbStub;
