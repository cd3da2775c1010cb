//! The architecture-parameterised register map.
//!
//! A compile-time table per architecture maps *GDB register index* to a byte
//! offset ("slot") within the kernel's [`crate::delegate::UserContext`], or
//! the sentinel "absent" for registers GDB expects but the kernel doesn't
//! track (segment registers on x86, the legacy FPA slots on arm32).
//!
//! Each architecture is a zero-sized type implementing [`RegMap`]; exactly
//! one is selected as [`Active`] at compile time via a Cargo feature. This
//! is pure data — the map has no behaviour beyond the `to_slot` lookup — and
//! runtime dispatch is neither needed nor provided.

mod arm32;
mod arm64;
mod x86;
mod x86_64;

pub use arm32::Arm32;
pub use arm64::Arm64;
pub use x86::X86;
pub use x86_64::X86_64;

/// One architecture's register map.
///
/// Implementations are expected to be zero-sized marker types; `RegMap` is
/// only ever used at the type level.
pub trait RegMap {
    /// Number of registers GDB expects, in GDB's wire order.
    const NUM_GDB_REGISTERS: usize;
    /// Number of machine words in the kernel's user-context record.
    const KERNEL_REG_COUNT: usize;
    /// Width of one machine word, in bytes.
    const WORD_BYTES: usize;
    /// GDB register index of the program counter.
    const PC_INDEX: usize;
    /// Whether register values are swapped to little-endian byte order on
    /// the wire (x86 family) or emitted in natural order (ARM family).
    const SWAP_BYTES: bool;
    /// `TABLE[i]` is the kernel user-context byte offset for GDB register
    /// `i`, or `None` if GDB register `i` has no kernel counterpart.
    const TABLE: &'static [Option<usize>];

    /// Map a GDB register index to its kernel user-context byte offset.
    ///
    /// Returns `None` both for out-of-range indices and for in-range but
    /// absent registers — the two are indistinguishable to callers, which
    /// matches the totality invariant in `spec.md` §3 ("no out-of-bounds
    /// result is possible").
    fn to_slot(gdb_idx: usize) -> Option<usize> {
        Self::TABLE.get(gdb_idx).copied().flatten()
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "arch-x86")] {
        /// The architecture selected at compile time via Cargo features.
        pub type Active = X86;
    } else if #[cfg(feature = "arch-arm32")] {
        pub type Active = Arm32;
    } else if #[cfg(feature = "arch-arm64")] {
        pub type Active = Arm64;
    } else {
        // Default, and the explicit `arch-x86_64` case.
        pub type Active = X86_64;
    }
}
