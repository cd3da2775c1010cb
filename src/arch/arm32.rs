//! 32-bit ARM (`CONFIG_ARCH_AARCH32`) register map.
//!
//! GDB register order: `r0-r12 sp lr pc`, then ten legacy FPA slots
//! (indices 16-24, never populated on any seL4 target), then `cpsr` at
//! index 25 — per GDB's `arm-core.xml`: "The CPSR is register 25, rather
//! than register 16, because the FPA registers historically were placed
//! between the PC and the CPSR in the 'g' packet."

use super::RegMap;

/// 32-bit ARM.
pub struct Arm32;

const W_R0: usize = 0; // r0..r12 occupy words 0..=12
const W_SP: usize = 13;
const W_LR: usize = 14; // lr == r14
const W_PC: usize = 15;
const W_CPSR: usize = 16;

impl RegMap for Arm32 {
    const NUM_GDB_REGISTERS: usize = 26;
    const KERNEL_REG_COUNT: usize = 17;
    const WORD_BYTES: usize = 4;
    const PC_INDEX: usize = 15;
    const SWAP_BYTES: bool = false;

    #[rustfmt::skip]
    const TABLE: &'static [Option<usize>] = &[
        Some((W_R0 + 0)  * Self::WORD_BYTES), // 0: r0
        Some((W_R0 + 1)  * Self::WORD_BYTES), // 1: r1
        Some((W_R0 + 2)  * Self::WORD_BYTES), // 2: r2
        Some((W_R0 + 3)  * Self::WORD_BYTES), // 3: r3
        Some((W_R0 + 4)  * Self::WORD_BYTES), // 4: r4
        Some((W_R0 + 5)  * Self::WORD_BYTES), // 5: r5
        Some((W_R0 + 6)  * Self::WORD_BYTES), // 6: r6
        Some((W_R0 + 7)  * Self::WORD_BYTES), // 7: r7
        Some((W_R0 + 8)  * Self::WORD_BYTES), // 8: r8
        Some((W_R0 + 9)  * Self::WORD_BYTES), // 9: r9
        Some((W_R0 + 10) * Self::WORD_BYTES), // 10: r10
        Some((W_R0 + 11) * Self::WORD_BYTES), // 11: r11
        Some((W_R0 + 12) * Self::WORD_BYTES), // 12: r12
        Some(W_SP * Self::WORD_BYTES),        // 13: sp
        Some(W_LR * Self::WORD_BYTES),        // 14: lr (r14)
        Some(W_PC * Self::WORD_BYTES),        // 15: pc
        None, None, None, None, None,         // 16-20: legacy FPA — absent
        None, None, None, None,               // 21-24: legacy FPA — absent
        Some(W_CPSR * Self::WORD_BYTES),       // 25: cpsr
    ];
}
