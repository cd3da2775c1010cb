//! 32-bit x86 (`CONFIG_ARCH_IA32`) register map.
//!
//! GDB register order: `eax ecx edx ebx esp ebp esi edi eip eflags cs ss ds
//! es fs gs`. `cs`, `ss`, `ds`, `es` have no seL4 user-context counterpart.

use super::RegMap;

/// 32-bit x86.
pub struct X86;

// Kernel user-context word indices (this crate's own layout; the only
// requirement is internal consistency between this table and
// `KERNEL_REG_COUNT`/`WORD_BYTES`).
const W_EAX: usize = 0;
const W_ECX: usize = 1;
const W_EDX: usize = 2;
const W_EBX: usize = 3;
const W_ESP: usize = 4;
const W_EBP: usize = 5;
const W_ESI: usize = 6;
const W_EDI: usize = 7;
const W_EIP: usize = 8;
const W_EFLAGS: usize = 9;
const W_FS_BASE: usize = 10;
const W_GS_BASE: usize = 11;

impl RegMap for X86 {
    const NUM_GDB_REGISTERS: usize = 16;
    const KERNEL_REG_COUNT: usize = 12;
    const WORD_BYTES: usize = 4;
    const PC_INDEX: usize = 8; // eip
    const SWAP_BYTES: bool = true;

    #[rustfmt::skip]
    const TABLE: &'static [Option<usize>] = &[
        Some(W_EAX * Self::WORD_BYTES),     // 0: eax
        Some(W_ECX * Self::WORD_BYTES),     // 1: ecx
        Some(W_EDX * Self::WORD_BYTES),     // 2: edx
        Some(W_EBX * Self::WORD_BYTES),     // 3: ebx
        Some(W_ESP * Self::WORD_BYTES),     // 4: esp
        Some(W_EBP * Self::WORD_BYTES),     // 5: ebp
        Some(W_ESI * Self::WORD_BYTES),     // 6: esi
        Some(W_EDI * Self::WORD_BYTES),     // 7: edi
        Some(W_EIP * Self::WORD_BYTES),     // 8: eip (pc)
        Some(W_EFLAGS * Self::WORD_BYTES),  // 9: eflags
        None,                               // 10: cs — absent
        None,                               // 11: ss — absent
        None,                               // 12: ds — absent
        None,                               // 13: es — absent
        Some(W_FS_BASE * Self::WORD_BYTES), // 14: fs (reported as fs_base)
        Some(W_GS_BASE * Self::WORD_BYTES), // 15: gs (reported as gs_base)
    ];
}
