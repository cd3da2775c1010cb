//! 64-bit ARM (`CONFIG_ARCH_AARCH64`) register map.
//!
//! GDB register order: `x0-x30 sp pc cpsr`. Every register has a seL4
//! user-context counterpart; there is no "notable absent" entry on this
//! architecture.

use super::RegMap;

/// 64-bit ARM.
pub struct Arm64;

const W_X0: usize = 0; // x0..x30 occupy words 0..=30
const W_SP: usize = 31;
const W_PC: usize = 32;
const W_CPSR: usize = 33;

impl RegMap for Arm64 {
    const NUM_GDB_REGISTERS: usize = 34;
    const KERNEL_REG_COUNT: usize = 34;
    const WORD_BYTES: usize = 8;
    const PC_INDEX: usize = 32;
    const SWAP_BYTES: bool = false;

    #[rustfmt::skip]
    const TABLE: &'static [Option<usize>] = &[
        Some((W_X0 + 0)  * Self::WORD_BYTES),  Some((W_X0 + 1)  * Self::WORD_BYTES),
        Some((W_X0 + 2)  * Self::WORD_BYTES),  Some((W_X0 + 3)  * Self::WORD_BYTES),
        Some((W_X0 + 4)  * Self::WORD_BYTES),  Some((W_X0 + 5)  * Self::WORD_BYTES),
        Some((W_X0 + 6)  * Self::WORD_BYTES),  Some((W_X0 + 7)  * Self::WORD_BYTES),
        Some((W_X0 + 8)  * Self::WORD_BYTES),  Some((W_X0 + 9)  * Self::WORD_BYTES),
        Some((W_X0 + 10) * Self::WORD_BYTES),  Some((W_X0 + 11) * Self::WORD_BYTES),
        Some((W_X0 + 12) * Self::WORD_BYTES),  Some((W_X0 + 13) * Self::WORD_BYTES),
        Some((W_X0 + 14) * Self::WORD_BYTES),  Some((W_X0 + 15) * Self::WORD_BYTES),
        Some((W_X0 + 16) * Self::WORD_BYTES),  Some((W_X0 + 17) * Self::WORD_BYTES),
        Some((W_X0 + 18) * Self::WORD_BYTES),  Some((W_X0 + 19) * Self::WORD_BYTES),
        Some((W_X0 + 20) * Self::WORD_BYTES),  Some((W_X0 + 21) * Self::WORD_BYTES),
        Some((W_X0 + 22) * Self::WORD_BYTES),  Some((W_X0 + 23) * Self::WORD_BYTES),
        Some((W_X0 + 24) * Self::WORD_BYTES),  Some((W_X0 + 25) * Self::WORD_BYTES),
        Some((W_X0 + 26) * Self::WORD_BYTES),  Some((W_X0 + 27) * Self::WORD_BYTES),
        Some((W_X0 + 28) * Self::WORD_BYTES),  Some((W_X0 + 29) * Self::WORD_BYTES),
        Some((W_X0 + 30) * Self::WORD_BYTES), // x30 / lr
        Some(W_SP * Self::WORD_BYTES),        // 31: sp
        Some(W_PC * Self::WORD_BYTES),        // 32: pc
        Some(W_CPSR * Self::WORD_BYTES),      // 33: cpsr
    ];
}
