//! The 256-entry decode table.
//!
//! Every opcode byte maps to an operation, an addressing mode and a base
//! cycle cost. Undocumented opcodes are ordinary entries: the interpreter
//! does not know or care which encodings MOS documented.

use std::fmt;

/// Addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// `(zp,X)`
    IndirectX,
    /// `(zp),Y`
    IndirectY,
    /// `JMP (abs)` only.
    Indirect,
    /// Branch offset.
    Relative,
}

impl Mode {
    /// Number of operand bytes that follow the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::IndirectX
            | Mode::IndirectY
            | Mode::Relative => 1,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect => 2,
        }
    }
}

/// Operations, documented and undocumented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Loads, stores, transfers
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    // Stack
    Pha,
    Php,
    Pla,
    Plp,
    // Logic and arithmetic
    And,
    Ora,
    Eor,
    Bit,
    Adc,
    Sbc,
    Cmp,
    Cpx,
    Cpy,
    // Increments and shifts
    Inc,
    Inx,
    Iny,
    Dec,
    Dex,
    Dey,
    Asl,
    Lsr,
    Rol,
    Ror,
    // Control flow
    Jmp,
    Jsr,
    Rts,
    Brk,
    Rti,
    Bpl,
    Bmi,
    Bvc,
    Bvs,
    Bcc,
    Bcs,
    Bne,
    Beq,
    // Flags
    Clc,
    Sec,
    Cli,
    Sei,
    Clv,
    Cld,
    Sed,
    Nop,
    // Undocumented
    Lax,
    Sax,
    Dcp,
    Isc,
    Slo,
    Rla,
    Sre,
    Rra,
    Anc,
    Alr,
    Arr,
    Sbx,
    Las,
    Sha,
    Shx,
    Shy,
    Tas,
    Ane,
    Lxa,
    Jam,
}

impl Op {
    /// True for operations that read memory, modify it and write it back.
    #[must_use]
    pub const fn is_read_modify_write(self) -> bool {
        matches!(
            self,
            Op::Inc
                | Op::Dec
                | Op::Asl
                | Op::Lsr
                | Op::Rol
                | Op::Ror
                | Op::Dcp
                | Op::Isc
                | Op::Slo
                | Op::Rla
                | Op::Sre
                | Op::Rra
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = format!("{self:?}");
        f.write_str(&name.to_ascii_uppercase())
    }
}

/// One decode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub op: Op,
    pub mode: Mode,
    /// Base cycle cost, before page-cross and branch penalties.
    pub cycles: u8,
    /// Whether an indexed access that crosses a page costs one more cycle.
    pub page_penalty: bool,
}

impl Opcode {
    /// Instruction length in bytes, including the opcode.
    #[must_use]
    pub const fn size(&self) -> u16 {
        1 + self.mode.operand_len()
    }
}

const fn o(op: Op, mode: Mode, cycles: u8) -> Opcode {
    Opcode {
        op,
        mode,
        cycles,
        page_penalty: false,
    }
}

/// Read instruction whose indexed form pays for a page cross.
const fn r(op: Op, mode: Mode, cycles: u8) -> Opcode {
    Opcode {
        op,
        mode,
        cycles,
        page_penalty: true,
    }
}

use Mode::{
    Absolute as Abs, AbsoluteX as Abx, AbsoluteY as Aby, Accumulator as Acc, Immediate as Imm,
    Implied as Imp, Indirect as Ind, IndirectX as Izx, IndirectY as Izy, Relative as Rel,
    ZeroPage as Zp, ZeroPageX as Zpx, ZeroPageY as Zpy,
};
use Op::{
    Adc, Alr, Anc, And, Ane, Arr, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc, Cld,
    Cli, Clv, Cmp, Cpx, Cpy, Dcp, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Isc, Jam, Jmp, Jsr, Las, Lax,
    Lda, Ldx, Ldy, Lsr, Lxa, Nop, Ora, Pha, Php, Pla, Plp, Rla, Rol, Ror, Rra, Rti, Rts, Sax, Sbc,
    Sbx, Sec, Sed, Sei, Sha, Shx, Shy, Slo, Sre, Sta, Stx, Sty, Tas, Tax, Tay, Tsx, Txa, Txs, Tya,
};

/// Decode table indexed by opcode byte.
#[rustfmt::skip]
pub static OPCODES: [Opcode; 256] = [
    // $00
    o(Brk, Imp, 7), o(Ora, Izx, 6), o(Jam, Imp, 2), o(Slo, Izx, 8),
    o(Nop, Zp, 3),  o(Ora, Zp, 3),  o(Asl, Zp, 5),  o(Slo, Zp, 5),
    o(Php, Imp, 3), o(Ora, Imm, 2), o(Asl, Acc, 2), o(Anc, Imm, 2),
    o(Nop, Abs, 4), o(Ora, Abs, 4), o(Asl, Abs, 6), o(Slo, Abs, 6),
    // $10
    o(Bpl, Rel, 2), r(Ora, Izy, 5), o(Jam, Imp, 2), o(Slo, Izy, 8),
    o(Nop, Zpx, 4), o(Ora, Zpx, 4), o(Asl, Zpx, 6), o(Slo, Zpx, 6),
    o(Clc, Imp, 2), r(Ora, Aby, 4), o(Nop, Imp, 2), o(Slo, Aby, 7),
    r(Nop, Abx, 4), r(Ora, Abx, 4), o(Asl, Abx, 7), o(Slo, Abx, 7),
    // $20
    o(Jsr, Abs, 6), o(And, Izx, 6), o(Jam, Imp, 2), o(Rla, Izx, 8),
    o(Bit, Zp, 3),  o(And, Zp, 3),  o(Rol, Zp, 5),  o(Rla, Zp, 5),
    o(Plp, Imp, 4), o(And, Imm, 2), o(Rol, Acc, 2), o(Anc, Imm, 2),
    o(Bit, Abs, 4), o(And, Abs, 4), o(Rol, Abs, 6), o(Rla, Abs, 6),
    // $30
    o(Bmi, Rel, 2), r(And, Izy, 5), o(Jam, Imp, 2), o(Rla, Izy, 8),
    o(Nop, Zpx, 4), o(And, Zpx, 4), o(Rol, Zpx, 6), o(Rla, Zpx, 6),
    o(Sec, Imp, 2), r(And, Aby, 4), o(Nop, Imp, 2), o(Rla, Aby, 7),
    r(Nop, Abx, 4), r(And, Abx, 4), o(Rol, Abx, 7), o(Rla, Abx, 7),
    // $40
    o(Rti, Imp, 6), o(Eor, Izx, 6), o(Jam, Imp, 2), o(Sre, Izx, 8),
    o(Nop, Zp, 3),  o(Eor, Zp, 3),  o(Lsr, Zp, 5),  o(Sre, Zp, 5),
    o(Pha, Imp, 3), o(Eor, Imm, 2), o(Lsr, Acc, 2), o(Alr, Imm, 2),
    o(Jmp, Abs, 3), o(Eor, Abs, 4), o(Lsr, Abs, 6), o(Sre, Abs, 6),
    // $50
    o(Bvc, Rel, 2), r(Eor, Izy, 5), o(Jam, Imp, 2), o(Sre, Izy, 8),
    o(Nop, Zpx, 4), o(Eor, Zpx, 4), o(Lsr, Zpx, 6), o(Sre, Zpx, 6),
    o(Cli, Imp, 2), r(Eor, Aby, 4), o(Nop, Imp, 2), o(Sre, Aby, 7),
    r(Nop, Abx, 4), r(Eor, Abx, 4), o(Lsr, Abx, 7), o(Sre, Abx, 7),
    // $60
    o(Rts, Imp, 6), o(Adc, Izx, 6), o(Jam, Imp, 2), o(Rra, Izx, 8),
    o(Nop, Zp, 3),  o(Adc, Zp, 3),  o(Ror, Zp, 5),  o(Rra, Zp, 5),
    o(Pla, Imp, 4), o(Adc, Imm, 2), o(Ror, Acc, 2), o(Arr, Imm, 2),
    o(Jmp, Ind, 5), o(Adc, Abs, 4), o(Ror, Abs, 6), o(Rra, Abs, 6),
    // $70
    o(Bvs, Rel, 2), r(Adc, Izy, 5), o(Jam, Imp, 2), o(Rra, Izy, 8),
    o(Nop, Zpx, 4), o(Adc, Zpx, 4), o(Ror, Zpx, 6), o(Rra, Zpx, 6),
    o(Sei, Imp, 2), r(Adc, Aby, 4), o(Nop, Imp, 2), o(Rra, Aby, 7),
    r(Nop, Abx, 4), r(Adc, Abx, 4), o(Ror, Abx, 7), o(Rra, Abx, 7),
    // $80
    o(Nop, Imm, 2), o(Sta, Izx, 6), o(Nop, Imm, 2), o(Sax, Izx, 6),
    o(Sty, Zp, 3),  o(Sta, Zp, 3),  o(Stx, Zp, 3),  o(Sax, Zp, 3),
    o(Dey, Imp, 2), o(Nop, Imm, 2), o(Txa, Imp, 2), o(Ane, Imm, 2),
    o(Sty, Abs, 4), o(Sta, Abs, 4), o(Stx, Abs, 4), o(Sax, Abs, 4),
    // $90
    o(Bcc, Rel, 2), o(Sta, Izy, 6), o(Jam, Imp, 2), o(Sha, Izy, 6),
    o(Sty, Zpx, 4), o(Sta, Zpx, 4), o(Stx, Zpy, 4), o(Sax, Zpy, 4),
    o(Tya, Imp, 2), o(Sta, Aby, 5), o(Txs, Imp, 2), o(Tas, Aby, 5),
    o(Shy, Abx, 5), o(Sta, Abx, 5), o(Shx, Aby, 5), o(Sha, Aby, 5),
    // $A0
    o(Ldy, Imm, 2), o(Lda, Izx, 6), o(Ldx, Imm, 2), o(Lax, Izx, 6),
    o(Ldy, Zp, 3),  o(Lda, Zp, 3),  o(Ldx, Zp, 3),  o(Lax, Zp, 3),
    o(Tay, Imp, 2), o(Lda, Imm, 2), o(Tax, Imp, 2), o(Lxa, Imm, 2),
    o(Ldy, Abs, 4), o(Lda, Abs, 4), o(Ldx, Abs, 4), o(Lax, Abs, 4),
    // $B0
    o(Bcs, Rel, 2), r(Lda, Izy, 5), o(Jam, Imp, 2), r(Lax, Izy, 5),
    o(Ldy, Zpx, 4), o(Lda, Zpx, 4), o(Ldx, Zpy, 4), o(Lax, Zpy, 4),
    o(Clv, Imp, 2), r(Lda, Aby, 4), o(Tsx, Imp, 2), r(Las, Aby, 4),
    r(Ldy, Abx, 4), r(Lda, Abx, 4), r(Ldx, Aby, 4), r(Lax, Aby, 4),
    // $C0
    o(Cpy, Imm, 2), o(Cmp, Izx, 6), o(Nop, Imm, 2), o(Dcp, Izx, 8),
    o(Cpy, Zp, 3),  o(Cmp, Zp, 3),  o(Dec, Zp, 5),  o(Dcp, Zp, 5),
    o(Iny, Imp, 2), o(Cmp, Imm, 2), o(Dex, Imp, 2), o(Sbx, Imm, 2),
    o(Cpy, Abs, 4), o(Cmp, Abs, 4), o(Dec, Abs, 6), o(Dcp, Abs, 6),
    // $D0
    o(Bne, Rel, 2), r(Cmp, Izy, 5), o(Jam, Imp, 2), o(Dcp, Izy, 8),
    o(Nop, Zpx, 4), o(Cmp, Zpx, 4), o(Dec, Zpx, 6), o(Dcp, Zpx, 6),
    o(Cld, Imp, 2), r(Cmp, Aby, 4), o(Nop, Imp, 2), o(Dcp, Aby, 7),
    r(Nop, Abx, 4), r(Cmp, Abx, 4), o(Dec, Abx, 7), o(Dcp, Abx, 7),
    // $E0
    o(Cpx, Imm, 2), o(Sbc, Izx, 6), o(Nop, Imm, 2), o(Isc, Izx, 8),
    o(Cpx, Zp, 3),  o(Sbc, Zp, 3),  o(Inc, Zp, 5),  o(Isc, Zp, 5),
    o(Inx, Imp, 2), o(Sbc, Imm, 2), o(Nop, Imp, 2), o(Sbc, Imm, 2),
    o(Cpx, Abs, 4), o(Sbc, Abs, 4), o(Inc, Abs, 6), o(Isc, Abs, 6),
    // $F0
    o(Beq, Rel, 2), r(Sbc, Izy, 5), o(Jam, Imp, 2), o(Isc, Izy, 8),
    o(Nop, Zpx, 4), o(Sbc, Zpx, 4), o(Inc, Zpx, 6), o(Isc, Zpx, 6),
    o(Sed, Imp, 2), r(Sbc, Aby, 4), o(Nop, Imp, 2), o(Isc, Aby, 7),
    r(Nop, Abx, 4), r(Sbc, Abx, 4), o(Inc, Abx, 7), o(Isc, Abx, 7),
];
