//! 64-bit x86 (`CONFIG_ARCH_X86_64`) register map.
//!
//! GDB register order: `rax rbx rcx rdx rsi rdi rbp rsp r8-r15 rip eflags cs
//! ss ds es fs gs`. `cs`, `ss`, `ds`, `es` have no seL4 user-context
//! counterpart.

use super::RegMap;

/// 64-bit x86.
pub struct X86_64;

const W_RAX: usize = 0;
const W_RBX: usize = 1;
const W_RCX: usize = 2;
const W_RDX: usize = 3;
const W_RSI: usize = 4;
const W_RDI: usize = 5;
const W_RBP: usize = 6;
const W_RSP: usize = 7;
const W_R8: usize = 8;
const W_R9: usize = 9;
const W_R10: usize = 10;
const W_R11: usize = 11;
const W_R12: usize = 12;
const W_R13: usize = 13;
const W_R14: usize = 14;
const W_R15: usize = 15;
const W_RIP: usize = 16;
const W_EFLAGS: usize = 17;
const W_FS_BASE: usize = 18;
const W_GS_BASE: usize = 19;

impl RegMap for X86_64 {
    const NUM_GDB_REGISTERS: usize = 24;
    const KERNEL_REG_COUNT: usize = 20;
    const WORD_BYTES: usize = 8;
    const PC_INDEX: usize = 16; // rip
    const SWAP_BYTES: bool = true;

    #[rustfmt::skip]
    const TABLE: &'static [Option<usize>] = &[
        Some(W_RAX * Self::WORD_BYTES),    // 0: rax
        Some(W_RBX * Self::WORD_BYTES),    // 1: rbx
        Some(W_RCX * Self::WORD_BYTES),    // 2: rcx
        Some(W_RDX * Self::WORD_BYTES),    // 3: rdx
        Some(W_RSI * Self::WORD_BYTES),    // 4: rsi
        Some(W_RDI * Self::WORD_BYTES),    // 5: rdi
        Some(W_RBP * Self::WORD_BYTES),    // 6: rbp
        Some(W_RSP * Self::WORD_BYTES),    // 7: rsp
        Some(W_R8  * Self::WORD_BYTES),    // 8: r8
        Some(W_R9  * Self::WORD_BYTES),    // 9: r9
        Some(W_R10 * Self::WORD_BYTES),    // 10: r10
        Some(W_R11 * Self::WORD_BYTES),    // 11: r11
        Some(W_R12 * Self::WORD_BYTES),    // 12: r12
        Some(W_R13 * Self::WORD_BYTES),    // 13: r13
        Some(W_R14 * Self::WORD_BYTES),    // 14: r14
        Some(W_R15 * Self::WORD_BYTES),    // 15: r15
        Some(W_RIP * Self::WORD_BYTES),    // 16: rip (pc)
        Some(W_EFLAGS * Self::WORD_BYTES), // 17: eflags
        None,                              // 18: cs — absent
        None,                              // 19: ss — absent
        None,                              // 20: ds — absent
        None,                              // 21: es — absent
        Some(W_FS_BASE * Self::WORD_BYTES), // 22: fs (reported as fs_base)
        Some(W_GS_BASE * Self::WORD_BYTES), // 23: gs (reported as gs_base)
    ];
}
