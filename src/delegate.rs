//! The delegate interface: the only way the core touches the debugged
//! target. Everything in this module is a contract — the capability
//! invocations that actually read/write memory, registers and hardware
//! debug slots live outside this crate, in component-framework glue.

use crate::arch::{Active, RegMap};

/// Opaque capability handle to the debugged thread.
///
/// Per the design notes, kernel capabilities are treated as opaque
/// identifiers passed through to the delegate; the core never performs
/// arithmetic on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tcb(pub u64);

/// Opaque failure signal from a delegate operation.
///
/// The core never inspects *why* a delegate call failed — only that it did —
/// so this type carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegateError;

/// The kernel's user-context record: a packed sequence of machine words.
///
/// Registers are addressed by `offset / WORD_BYTES`, never by re-deriving a
/// pointer from a word-indexed element (see `spec.md` §9's corrected
/// contract). Words are stored as `u64` regardless of the active
/// architecture's native word width, so that a 32-bit target's registers
/// zero-extend cleanly; only the low `WORD_BYTES` bytes are ever placed on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub words: [u64; Active::KERNEL_REG_COUNT],
}

impl Default for UserContext {
    fn default() -> Self {
        UserContext {
            words: [0; Active::KERNEL_REG_COUNT],
        }
    }
}

impl UserContext {
    /// Read the word at the given byte offset into the record.
    pub fn word_at(&self, byte_offset: usize) -> u64 {
        self.words[byte_offset / Active::WORD_BYTES]
    }

    /// Write the word at the given byte offset into the record.
    pub fn set_word_at(&mut self, byte_offset: usize, value: u64) {
        self.words[byte_offset / Active::WORD_BYTES] = value;
    }
}

/// Kernel hardware-breakpoint type, as passed to `insert_break`/`remove_break`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakType {
    Instruction,
    Data,
}

/// Kernel hardware-breakpoint access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
    ReadWrite,
}

/// The eight capability-invoking primitives the core relies on.
///
/// This crate only ever calls these methods; it never implements them. A
/// component embedding this stub supplies a concrete `Delegate` that invokes
/// the appropriate capabilities.
pub trait Delegate {
    /// Read `len` bytes starting at `addr`. `len` is guaranteed `<
    /// MAX_MEM_RANGE` by the caller.
    fn read_memory(&mut self, addr: u64, len: usize, out: &mut [u8]) -> Result<(), DelegateError>;

    /// Write `data` (length `data.len()`) to memory starting at `addr`.
    fn write_memory(&mut self, addr: u64, data: &[u8]) -> Result<(), DelegateError>;

    /// Read the full register file of the given thread.
    fn read_registers(&mut self, tcb: Tcb) -> Result<UserContext, DelegateError>;

    /// Read a single register, addressed by its kernel user-context byte
    /// offset (`slot`).
    fn read_register(&mut self, tcb: Tcb, slot: usize) -> Result<u64, DelegateError>;

    /// Write the first `n_words` words of `ctx` back to the thread's
    /// register file.
    fn write_registers(
        &mut self,
        tcb: Tcb,
        ctx: &UserContext,
        n_words: usize,
    ) -> Result<(), DelegateError>;

    /// Write a single register, addressed by its kernel user-context byte
    /// offset (`slot`).
    fn write_register(&mut self, tcb: Tcb, slot: usize, value: u64) -> Result<(), DelegateError>;

    /// Arm a hardware breakpoint/watchpoint.
    fn insert_break(
        &mut self,
        tcb: Tcb,
        ty: BreakType,
        addr: u64,
        size: u64,
        access: AccessMode,
    ) -> Result<(), DelegateError>;

    /// Disarm a previously-inserted hardware breakpoint/watchpoint.
    fn remove_break(
        &mut self,
        tcb: Tcb,
        ty: BreakType,
        addr: u64,
        size: u64,
        access: AccessMode,
    ) -> Result<(), DelegateError>;

    /// Resume the thread, running freely.
    fn resume(&mut self, tcb: Tcb) -> Result<(), DelegateError>;

    /// Arm the thread for a single instruction step.
    fn step(&mut self, tcb: Tcb) -> Result<(), DelegateError>;
}
