//! Static opcode descriptor table.
//!
//! Every defined opcode byte maps to an immutable descriptor: the instruction
//! kind (a closed enum, matched exhaustively by the executor), the addressing
//! mode, the mask of status flags the instruction can affect, the base byte
//! length, and the base cycle cost. Bytes with no descriptor fault at fetch
//! time with the opcode value and program counter.
//!
//! Byte lengths and base cycle costs follow the 65C816 reference tables.

/// Closed set of implemented instruction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    // Data movement
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    Stz,
    Tax,
    Tay,
    Txa,
    Tya,
    Txy,
    Tyx,
    Tsx,
    Txs,
    Tcd,
    Tdc,
    Tcs,
    Tsc,
    Xba,
    Xce,
    // Stack
    Pha,
    Pla,
    Phx,
    Plx,
    Phy,
    Ply,
    Php,
    Plp,
    Phb,
    Plb,
    Phd,
    Pld,
    Phk,
    // Arithmetic
    Adc,
    Sbc,
    Cmp,
    Cpx,
    Cpy,
    Inc,
    Dec,
    Inx,
    Iny,
    Dex,
    Dey,
    // Logic and bit manipulation
    And,
    Ora,
    Eor,
    Bit,
    Tsb,
    Trb,
    Asl,
    Lsr,
    Rol,
    Ror,
    // Control flow
    Bpl,
    Bmi,
    Bvc,
    Bvs,
    Bcc,
    Bcs,
    Bne,
    Beq,
    Bra,
    Jmp,
    Jsr,
    Rts,
    Rti,
    Brk,
    Cop,
    // Flag control
    Clc,
    Sec,
    Cli,
    Sei,
    Cld,
    Sed,
    Clv,
    Sep,
    Rep,
    Nop,
}

/// Addressing modes the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    Absolute,
    DirectPage,
    DirectPageX,
    DirectPageY,
    DirectPageIndirectLongY,
    PcRelative,
    StackPush,
    StackPull,
    StackInterrupt,
}

/// Which status flag sizes an immediate operand (and the instruction's data
/// path): the accumulator width flag, the index width flag, or always one
/// byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    Memory,
    Index,
    Byte,
}

// Flag-mask bits, `nvmxdizc` order as in the status register.
const N: u8 = 0x80;
const V: u8 = 0x40;
const M: u8 = 0x20;
const X: u8 = 0x10;
const D: u8 = 0x08;
const I: u8 = 0x04;
const Z: u8 = 0x02;
const C: u8 = 0x01;

#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub instruction: Instruction,
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    /// Status flags the instruction can affect.
    pub flags: u8,
    /// Base instruction length in bytes (8-bit operand widths).
    pub bytes: u8,
    /// Base cycle cost before penalties.
    pub cycles: u8,
    pub width: WidthClass,
}

const fn op(
    instruction: Instruction,
    mnemonic: &'static str,
    mode: AddressingMode,
    flags: u8,
    bytes: u8,
    cycles: u8,
    width: WidthClass,
) -> Option<Opcode> {
    Some(Opcode {
        instruction,
        mnemonic,
        mode,
        flags,
        bytes,
        cycles,
        width,
    })
}

/// 256-entry descriptor table addressed by opcode byte.
pub static TABLE: [Option<Opcode>; 256] = build_table();

const fn build_table() -> [Option<Opcode>; 256] {
    use AddressingMode::*;
    use Instruction::*;
    use WidthClass::*;

    let mut t: [Option<Opcode>; 256] = [None; 256];

    // Loads
    t[0xA9] = op(Lda, "LDA", Immediate, N | Z, 2, 2, Memory);
    t[0xAD] = op(Lda, "LDA", Absolute, N | Z, 3, 4, Memory);
    t[0xA5] = op(Lda, "LDA", DirectPage, N | Z, 2, 3, Memory);
    t[0xB5] = op(Lda, "LDA", DirectPageX, N | Z, 2, 4, Memory);
    t[0xB7] = op(Lda, "LDA", DirectPageIndirectLongY, N | Z, 2, 6, Memory);
    t[0xA2] = op(Ldx, "LDX", Immediate, N | Z, 2, 2, Index);
    t[0xAE] = op(Ldx, "LDX", Absolute, N | Z, 3, 4, Index);
    t[0xA6] = op(Ldx, "LDX", DirectPage, N | Z, 2, 3, Index);
    t[0xB6] = op(Ldx, "LDX", DirectPageY, N | Z, 2, 4, Index);
    t[0xA0] = op(Ldy, "LDY", Immediate, N | Z, 2, 2, Index);
    t[0xAC] = op(Ldy, "LDY", Absolute, N | Z, 3, 4, Index);
    t[0xA4] = op(Ldy, "LDY", DirectPage, N | Z, 2, 3, Index);
    t[0xB4] = op(Ldy, "LDY", DirectPageX, N | Z, 2, 4, Index);

    // Stores
    t[0x8D] = op(Sta, "STA", Absolute, 0, 3, 4, Memory);
    t[0x85] = op(Sta, "STA", DirectPage, 0, 2, 3, Memory);
    t[0x95] = op(Sta, "STA", DirectPageX, 0, 2, 4, Memory);
    t[0x97] = op(Sta, "STA", DirectPageIndirectLongY, 0, 2, 6, Memory);
    t[0x8E] = op(Stx, "STX", Absolute, 0, 3, 4, Index);
    t[0x86] = op(Stx, "STX", DirectPage, 0, 2, 3, Index);
    t[0x96] = op(Stx, "STX", DirectPageY, 0, 2, 4, Index);
    t[0x8C] = op(Sty, "STY", Absolute, 0, 3, 4, Index);
    t[0x84] = op(Sty, "STY", DirectPage, 0, 2, 3, Index);
    t[0x94] = op(Sty, "STY", DirectPageX, 0, 2, 4, Index);
    t[0x9C] = op(Stz, "STZ", Absolute, 0, 3, 4, Memory);
    t[0x64] = op(Stz, "STZ", DirectPage, 0, 2, 3, Memory);
    t[0x74] = op(Stz, "STZ", DirectPageX, 0, 2, 4, Memory);

    // Arithmetic
    t[0x69] = op(Adc, "ADC", Immediate, N | V | Z | C, 2, 2, Memory);
    t[0x6D] = op(Adc, "ADC", Absolute, N | V | Z | C, 3, 4, Memory);
    t[0x65] = op(Adc, "ADC", DirectPage, N | V | Z | C, 2, 3, Memory);
    t[0x75] = op(Adc, "ADC", DirectPageX, N | V | Z | C, 2, 4, Memory);
    t[0x77] = op(Adc, "ADC", DirectPageIndirectLongY, N | V | Z | C, 2, 6, Memory);
    t[0xE9] = op(Sbc, "SBC", Immediate, N | V | Z | C, 2, 2, Memory);
    t[0xED] = op(Sbc, "SBC", Absolute, N | V | Z | C, 3, 4, Memory);
    t[0xE5] = op(Sbc, "SBC", DirectPage, N | V | Z | C, 2, 3, Memory);
    t[0xF5] = op(Sbc, "SBC", DirectPageX, N | V | Z | C, 2, 4, Memory);
    t[0xF7] = op(Sbc, "SBC", DirectPageIndirectLongY, N | V | Z | C, 2, 6, Memory);
    t[0xC9] = op(Cmp, "CMP", Immediate, N | Z | C, 2, 2, Memory);
    t[0xCD] = op(Cmp, "CMP", Absolute, N | Z | C, 3, 4, Memory);
    t[0xC5] = op(Cmp, "CMP", DirectPage, N | Z | C, 2, 3, Memory);
    t[0xD5] = op(Cmp, "CMP", DirectPageX, N | Z | C, 2, 4, Memory);
    t[0xD7] = op(Cmp, "CMP", DirectPageIndirectLongY, N | Z | C, 2, 6, Memory);
    t[0xE0] = op(Cpx, "CPX", Immediate, N | Z | C, 2, 2, Index);
    t[0xEC] = op(Cpx, "CPX", Absolute, N | Z | C, 3, 4, Index);
    t[0xE4] = op(Cpx, "CPX", DirectPage, N | Z | C, 2, 3, Index);
    t[0xC0] = op(Cpy, "CPY", Immediate, N | Z | C, 2, 2, Index);
    t[0xCC] = op(Cpy, "CPY", Absolute, N | Z | C, 3, 4, Index);
    t[0xC4] = op(Cpy, "CPY", DirectPage, N | Z | C, 2, 3, Index);
    t[0x1A] = op(Inc, "INC", Accumulator, N | Z, 1, 2, Memory);
    t[0xEE] = op(Inc, "INC", Absolute, N | Z, 3, 6, Memory);
    t[0xE6] = op(Inc, "INC", DirectPage, N | Z, 2, 5, Memory);
    t[0x3A] = op(Dec, "DEC", Accumulator, N | Z, 1, 2, Memory);
    t[0xCE] = op(Dec, "DEC", Absolute, N | Z, 3, 6, Memory);
    t[0xC6] = op(Dec, "DEC", DirectPage, N | Z, 2, 5, Memory);
    t[0xE8] = op(Inx, "INX", Implied, N | Z, 1, 2, Index);
    t[0xC8] = op(Iny, "INY", Implied, N | Z, 1, 2, Index);
    t[0xCA] = op(Dex, "DEX", Implied, N | Z, 1, 2, Index);
    t[0x88] = op(Dey, "DEY", Implied, N | Z, 1, 2, Index);

    // Logic
    t[0x29] = op(And, "AND", Immediate, N | Z, 2, 2, Memory);
    t[0x2D] = op(And, "AND", Absolute, N | Z, 3, 4, Memory);
    t[0x25] = op(And, "AND", DirectPage, N | Z, 2, 3, Memory);
    t[0x35] = op(And, "AND", DirectPageX, N | Z, 2, 4, Memory);
    t[0x37] = op(And, "AND", DirectPageIndirectLongY, N | Z, 2, 6, Memory);
    t[0x09] = op(Ora, "ORA", Immediate, N | Z, 2, 2, Memory);
    t[0x0D] = op(Ora, "ORA", Absolute, N | Z, 3, 4, Memory);
    t[0x05] = op(Ora, "ORA", DirectPage, N | Z, 2, 3, Memory);
    t[0x15] = op(Ora, "ORA", DirectPageX, N | Z, 2, 4, Memory);
    t[0x17] = op(Ora, "ORA", DirectPageIndirectLongY, N | Z, 2, 6, Memory);
    t[0x49] = op(Eor, "EOR", Immediate, N | Z, 2, 2, Memory);
    t[0x4D] = op(Eor, "EOR", Absolute, N | Z, 3, 4, Memory);
    t[0x45] = op(Eor, "EOR", DirectPage, N | Z, 2, 3, Memory);
    t[0x55] = op(Eor, "EOR", DirectPageX, N | Z, 2, 4, Memory);
    t[0x57] = op(Eor, "EOR", DirectPageIndirectLongY, N | Z, 2, 6, Memory);
    t[0x89] = op(Bit, "BIT", Immediate, Z, 2, 2, Memory);
    t[0x2C] = op(Bit, "BIT", Absolute, N | V | Z, 3, 4, Memory);
    t[0x24] = op(Bit, "BIT", DirectPage, N | V | Z, 2, 3, Memory);
    t[0x34] = op(Bit, "BIT", DirectPageX, N | V | Z, 2, 4, Memory);
    t[0x0C] = op(Tsb, "TSB", Absolute, Z, 3, 6, Memory);
    t[0x04] = op(Tsb, "TSB", DirectPage, Z, 2, 5, Memory);
    t[0x1C] = op(Trb, "TRB", Absolute, Z, 3, 6, Memory);
    t[0x14] = op(Trb, "TRB", DirectPage, Z, 2, 5, Memory);

    // Shifts and rotates
    t[0x0A] = op(Asl, "ASL", Accumulator, N | Z | C, 1, 2, Memory);
    t[0x0E] = op(Asl, "ASL", Absolute, N | Z | C, 3, 6, Memory);
    t[0x06] = op(Asl, "ASL", DirectPage, N | Z | C, 2, 5, Memory);
    t[0x4A] = op(Lsr, "LSR", Accumulator, N | Z | C, 1, 2, Memory);
    t[0x4E] = op(Lsr, "LSR", Absolute, N | Z | C, 3, 6, Memory);
    t[0x46] = op(Lsr, "LSR", DirectPage, N | Z | C, 2, 5, Memory);
    t[0x2A] = op(Rol, "ROL", Accumulator, N | Z | C, 1, 2, Memory);
    t[0x2E] = op(Rol, "ROL", Absolute, N | Z | C, 3, 6, Memory);
    t[0x26] = op(Rol, "ROL", DirectPage, N | Z | C, 2, 5, Memory);
    t[0x6A] = op(Ror, "ROR", Accumulator, N | Z | C, 1, 2, Memory);
    t[0x6E] = op(Ror, "ROR", Absolute, N | Z | C, 3, 6, Memory);
    t[0x66] = op(Ror, "ROR", DirectPage, N | Z | C, 2, 5, Memory);

    // Branches
    t[0x10] = op(Bpl, "BPL", PcRelative, 0, 2, 2, Byte);
    t[0x30] = op(Bmi, "BMI", PcRelative, 0, 2, 2, Byte);
    t[0x50] = op(Bvc, "BVC", PcRelative, 0, 2, 2, Byte);
    t[0x70] = op(Bvs, "BVS", PcRelative, 0, 2, 2, Byte);
    t[0x90] = op(Bcc, "BCC", PcRelative, 0, 2, 2, Byte);
    t[0xB0] = op(Bcs, "BCS", PcRelative, 0, 2, 2, Byte);
    t[0xD0] = op(Bne, "BNE", PcRelative, 0, 2, 2, Byte);
    t[0xF0] = op(Beq, "BEQ", PcRelative, 0, 2, 2, Byte);
    t[0x80] = op(Bra, "BRA", PcRelative, 0, 2, 3, Byte);

    // Jumps, calls, interrupts
    t[0x4C] = op(Jmp, "JMP", Absolute, 0, 3, 3, Byte);
    t[0x20] = op(Jsr, "JSR", Absolute, 0, 3, 6, Byte);
    t[0x60] = op(Rts, "RTS", StackPull, 0, 1, 6, Byte);
    t[0x40] = op(Rti, "RTI", StackPull, N | V | M | X | D | I | Z | C, 1, 6, Byte);
    t[0x00] = op(Brk, "BRK", StackInterrupt, D | I, 2, 7, Byte);
    t[0x02] = op(Cop, "COP", StackInterrupt, D | I, 2, 7, Byte);

    // Stack
    t[0x48] = op(Pha, "PHA", StackPush, 0, 1, 3, Memory);
    t[0x68] = op(Pla, "PLA", StackPull, N | Z, 1, 4, Memory);
    t[0xDA] = op(Phx, "PHX", StackPush, 0, 1, 3, Index);
    t[0xFA] = op(Plx, "PLX", StackPull, N | Z, 1, 4, Index);
    t[0x5A] = op(Phy, "PHY", StackPush, 0, 1, 3, Index);
    t[0x7A] = op(Ply, "PLY", StackPull, N | Z, 1, 4, Index);
    t[0x08] = op(Php, "PHP", StackPush, 0, 1, 3, Byte);
    t[0x28] = op(Plp, "PLP", StackPull, N | V | M | X | D | I | Z | C, 1, 4, Byte);
    t[0x8B] = op(Phb, "PHB", StackPush, 0, 1, 3, Byte);
    t[0xAB] = op(Plb, "PLB", StackPull, N | Z, 1, 4, Byte);
    t[0x0B] = op(Phd, "PHD", StackPush, 0, 1, 4, Byte);
    t[0x2B] = op(Pld, "PLD", StackPull, N | Z, 1, 5, Byte);
    t[0x4B] = op(Phk, "PHK", StackPush, 0, 1, 3, Byte);

    // Flag control
    t[0x18] = op(Clc, "CLC", Implied, C, 1, 2, Byte);
    t[0x38] = op(Sec, "SEC", Implied, C, 1, 2, Byte);
    t[0x58] = op(Cli, "CLI", Implied, I, 1, 2, Byte);
    t[0x78] = op(Sei, "SEI", Implied, I, 1, 2, Byte);
    t[0xD8] = op(Cld, "CLD", Implied, D, 1, 2, Byte);
    t[0xF8] = op(Sed, "SED", Implied, D, 1, 2, Byte);
    t[0xB8] = op(Clv, "CLV", Implied, V, 1, 2, Byte);
    t[0xC2] = op(Rep, "REP", Immediate, N | V | M | X | D | I | Z | C, 2, 3, Byte);
    t[0xE2] = op(Sep, "SEP", Immediate, N | V | M | X | D | I | Z | C, 2, 3, Byte);
    t[0xEA] = op(Nop, "NOP", Implied, 0, 1, 2, Byte);

    // Transfers and exchanges
    t[0xAA] = op(Tax, "TAX", Implied, N | Z, 1, 2, Index);
    t[0xA8] = op(Tay, "TAY", Implied, N | Z, 1, 2, Index);
    t[0x8A] = op(Txa, "TXA", Implied, N | Z, 1, 2, Memory);
    t[0x98] = op(Tya, "TYA", Implied, N | Z, 1, 2, Memory);
    t[0x9B] = op(Txy, "TXY", Implied, N | Z, 1, 2, Index);
    t[0xBB] = op(Tyx, "TYX", Implied, N | Z, 1, 2, Index);
    t[0xBA] = op(Tsx, "TSX", Implied, N | Z, 1, 2, Index);
    t[0x9A] = op(Txs, "TXS", Implied, 0, 1, 2, Byte);
    t[0x5B] = op(Tcd, "TCD", Implied, N | Z, 1, 2, Byte);
    t[0x7B] = op(Tdc, "TDC", Implied, N | Z, 1, 2, Byte);
    t[0x1B] = op(Tcs, "TCS", Implied, 0, 1, 2, Byte);
    t[0x3B] = op(Tsc, "TSC", Implied, N | Z, 1, 2, Byte);
    t[0xEB] = op(Xba, "XBA", Implied, N | Z, 1, 3, Byte);
    t[0xFB] = op(Xce, "XCE", Implied, M | X | C, 1, 2, Byte);

    t
}
