//! Operation semantics.
//!
//! `execute` receives an already-resolved operand and performs the
//! operation. The ALU helpers are shared between documented opcodes and
//! the undocumented combinations built from them (DCP is DEC then CMP,
//! RRA is ROR then ADC, and so on).

use emu_core::Bus;
use tracing::warn;

use crate::Status;
use crate::cpu::{BRK_VECTOR, Mos6502, Operand};
use crate::flags::{C, D, I, N, V, Z};
use crate::opcodes::Op;

/// Constant ORed into A by the unstable ANE and LXA opcodes. The real
/// value varies between chips; $EE is the common one.
const MAGIC: u8 = 0xEE;

impl Mos6502 {
    /// Execute `op` and return any extra cycles beyond the table cost.
    pub(crate) fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        op: Op,
        operand: Operand,
        opcode_pc: u16,
    ) -> u32 {
        match op {
            // Loads and stores
            Op::Lda => {
                let val = self.load(bus, operand);
                self.do_lda(val);
            }
            Op::Ldx => {
                let val = self.load(bus, operand);
                self.do_ldx(val);
            }
            Op::Ldy => {
                let val = self.load(bus, operand);
                self.do_ldy(val);
            }
            Op::Sta => Self::store(bus, operand, self.regs.a),
            Op::Stx => Self::store(bus, operand, self.regs.x),
            Op::Sty => Self::store(bus, operand, self.regs.y),

            // Transfers
            Op::Tax => self.do_ldx(self.regs.a),
            Op::Tay => self.do_ldy(self.regs.a),
            Op::Txa => self.do_lda(self.regs.x),
            Op::Tya => self.do_lda(self.regs.y),
            Op::Tsx => self.do_ldx(self.regs.s),
            // TXS is the one transfer that leaves the flags alone
            Op::Txs => self.regs.s = self.regs.x,

            // Stack
            Op::Pha => self.push(bus, self.regs.a),
            Op::Php => self.push(bus, self.regs.p.to_byte_brk()),
            Op::Pla => {
                let val = self.pull(bus);
                self.do_lda(val);
            }
            Op::Plp => self.regs.p = Status::from_byte(self.pull(bus)),

            // Logic and arithmetic
            Op::And => {
                let val = self.load(bus, operand);
                self.do_and(val);
            }
            Op::Ora => {
                let val = self.load(bus, operand);
                self.do_ora(val);
            }
            Op::Eor => {
                let val = self.load(bus, operand);
                self.do_eor(val);
            }
            Op::Bit => {
                let val = self.load(bus, operand);
                self.do_bit(val);
            }
            Op::Adc => {
                let val = self.load(bus, operand);
                self.do_adc(val);
            }
            Op::Sbc => {
                let val = self.load(bus, operand);
                self.do_sbc(val);
            }
            Op::Cmp => {
                let val = self.load(bus, operand);
                self.compare(self.regs.a, val);
            }
            Op::Cpx => {
                let val = self.load(bus, operand);
                self.compare(self.regs.x, val);
            }
            Op::Cpy => {
                let val = self.load(bus, operand);
                self.compare(self.regs.y, val);
            }

            // Increments and shifts
            Op::Inc => {
                self.modify(bus, operand, Self::do_inc);
            }
            Op::Dec => {
                self.modify(bus, operand, Self::do_dec);
            }
            Op::Asl => {
                self.modify(bus, operand, Self::do_asl);
            }
            Op::Lsr => {
                self.modify(bus, operand, Self::do_lsr);
            }
            Op::Rol => {
                self.modify(bus, operand, Self::do_rol);
            }
            Op::Ror => {
                self.modify(bus, operand, Self::do_ror);
            }
            Op::Inx => self.do_ldx(self.regs.x.wrapping_add(1)),
            Op::Iny => self.do_ldy(self.regs.y.wrapping_add(1)),
            Op::Dex => self.do_ldx(self.regs.x.wrapping_sub(1)),
            Op::Dey => self.do_ldy(self.regs.y.wrapping_sub(1)),

            // Control flow
            Op::Jmp => {
                if let Operand::Address(target) = operand {
                    self.regs.pc = target;
                }
            }
            Op::Jsr => self.op_jsr(bus, operand),
            Op::Rts => self.op_rts(bus),
            Op::Brk => self.op_brk(bus),
            Op::Rti => self.op_rti(bus),
            Op::Bpl => return self.branch(operand, !self.regs.p.is_set(N)),
            Op::Bmi => return self.branch(operand, self.regs.p.is_set(N)),
            Op::Bvc => return self.branch(operand, !self.regs.p.is_set(V)),
            Op::Bvs => return self.branch(operand, self.regs.p.is_set(V)),
            Op::Bcc => return self.branch(operand, !self.regs.p.is_set(C)),
            Op::Bcs => return self.branch(operand, self.regs.p.is_set(C)),
            Op::Bne => return self.branch(operand, !self.regs.p.is_set(Z)),
            Op::Beq => return self.branch(operand, self.regs.p.is_set(Z)),

            // Flags
            Op::Clc => self.regs.p.clear(C),
            Op::Sec => self.regs.p.set(C),
            Op::Cli => self.regs.p.clear(I),
            Op::Sei => self.regs.p.set(I),
            Op::Clv => self.regs.p.clear(V),
            Op::Cld => self.regs.p.clear(D),
            Op::Sed => self.regs.p.set(D),

            Op::Nop => {
                // Multi-byte NOPs still perform their read
                if let Operand::Address(addr) = operand {
                    let _ = bus.read(addr);
                }
            }

            // Undocumented
            Op::Lax => {
                let val = self.load(bus, operand);
                self.regs.x = val;
                self.do_lda(val);
            }
            Op::Sax => Self::store(bus, operand, self.regs.a & self.regs.x),
            Op::Dcp => {
                let val = self.modify(bus, operand, |_, v| v.wrapping_sub(1));
                self.compare(self.regs.a, val);
            }
            Op::Isc => {
                let val = self.modify(bus, operand, |_, v| v.wrapping_add(1));
                self.do_sbc(val);
            }
            Op::Slo => {
                let val = self.modify(bus, operand, Self::do_asl);
                self.do_ora(val);
            }
            Op::Rla => {
                let val = self.modify(bus, operand, Self::do_rol);
                self.do_and(val);
            }
            Op::Sre => {
                let val = self.modify(bus, operand, Self::do_lsr);
                self.do_eor(val);
            }
            Op::Rra => {
                let val = self.modify(bus, operand, Self::do_ror);
                self.do_adc(val);
            }
            Op::Anc => {
                let val = self.load(bus, operand);
                self.do_and(val);
                self.regs.p.set_if(C, self.regs.a & 0x80 != 0);
            }
            Op::Alr => {
                let val = self.load(bus, operand);
                self.do_and(val);
                self.regs.a = self.do_lsr(self.regs.a);
            }
            Op::Arr => {
                let val = self.load(bus, operand);
                self.do_arr(val);
            }
            Op::Sbx => {
                let val = self.load(bus, operand);
                let ax = self.regs.a & self.regs.x;
                self.regs.p.set_if(C, ax >= val);
                self.do_ldx(ax.wrapping_sub(val));
            }
            Op::Las => {
                let val = self.load(bus, operand) & self.regs.s;
                self.regs.s = val;
                self.regs.x = val;
                self.do_lda(val);
            }
            Op::Sha => Self::store_high_and(bus, operand, self.regs.y, self.regs.a & self.regs.x),
            Op::Shx => Self::store_high_and(bus, operand, self.regs.y, self.regs.x),
            Op::Shy => Self::store_high_and(bus, operand, self.regs.x, self.regs.y),
            Op::Tas => {
                self.regs.s = self.regs.a & self.regs.x;
                Self::store_high_and(bus, operand, self.regs.y, self.regs.s);
            }
            Op::Ane => {
                let val = self.load(bus, operand);
                self.do_lda((self.regs.a | MAGIC) & self.regs.x & val);
            }
            Op::Lxa => {
                let val = self.load(bus, operand);
                let result = (self.regs.a | MAGIC) & val;
                self.regs.x = result;
                self.do_lda(result);
            }
            Op::Jam => {
                self.jammed = true;
                self.regs.pc = opcode_pc;
                warn!("JAM at ${opcode_pc:04X}: CPU halted until reset");
            }
        }
        0
    }

    // ========================================================================
    // Operand access
    // ========================================================================

    fn load<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(val) => val,
            Operand::Address(addr) => bus.read(addr),
            Operand::Accumulator => self.regs.a,
            Operand::None | Operand::Branch(_) => 0,
        }
    }

    fn store<B: Bus>(bus: &mut B, operand: Operand, value: u8) {
        if let Operand::Address(addr) = operand {
            bus.write(addr, value);
        }
    }

    /// Read-modify-write. The unmodified value is written back first, as
    /// the real chip does, before the result.
    fn modify<B: Bus>(&mut self, bus: &mut B, operand: Operand, op: fn(&mut Self, u8) -> u8) -> u8 {
        if let Operand::Address(addr) = operand {
            let val = bus.read(addr);
            bus.write(addr, val);
            let result = op(self, val);
            bus.write(addr, result);
            result
        } else {
            let result = op(self, self.regs.a);
            self.regs.a = result;
            result
        }
    }

    /// SHA/SHX/SHY/TAS: store `value & (base_high + 1)`. When indexing
    /// crosses a page the stored value also replaces the address high byte.
    fn store_high_and<B: Bus>(bus: &mut B, operand: Operand, index: u8, value: u8) {
        let Operand::Address(addr) = operand else {
            return;
        };
        let base = addr.wrapping_sub(u16::from(index));
        let data = value & ((base >> 8) as u8).wrapping_add(1);
        let target = if (base ^ addr) & 0xFF00 != 0 {
            (u16::from(data) << 8) | (addr & 0x00FF)
        } else {
            addr
        };
        bus.write(target, data);
    }

    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    // ========================================================================
    // ALU operations
    // ========================================================================

    fn do_lda(&mut self, val: u8) {
        self.regs.a = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldx(&mut self, val: u8) {
        self.regs.x = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldy(&mut self, val: u8) {
        self.regs.y = val;
        self.regs.p.update_nz(val);
    }

    fn do_ora(&mut self, val: u8) {
        self.do_lda(self.regs.a | val);
    }

    fn do_and(&mut self, val: u8) {
        self.do_lda(self.regs.a & val);
    }

    fn do_eor(&mut self, val: u8) {
        self.do_lda(self.regs.a ^ val);
    }

    fn do_bit(&mut self, val: u8) {
        self.regs.p.set_if(Z, self.regs.a & val == 0);
        self.regs.p.set_if(N, val & 0x80 != 0);
        self.regs.p.set_if(V, val & 0x40 != 0);
    }

    fn compare(&mut self, reg: u8, val: u8) {
        self.regs.p.set_if(C, reg >= val);
        self.regs.p.update_nz(reg.wrapping_sub(val));
    }

    fn do_adc(&mut self, val: u8) {
        if self.regs.p.is_set(D) {
            self.do_adc_decimal(val);
        } else {
            self.do_adc_binary(val);
        }
    }

    fn do_adc_binary(&mut self, val: u8) {
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(val) + u16::from(self.regs.p.carry());
        let result = sum as u8;

        self.regs.p.set_if(C, sum > 0xFF);
        self.regs
            .p
            .set_if(V, (a ^ result) & (val ^ result) & 0x80 != 0);
        self.do_lda(result);
    }

    /// NMOS decimal add. Z comes from the binary sum; N and V come from
    /// the result before the high nibble is adjusted.
    fn do_adc_decimal(&mut self, val: u8) {
        let a = self.regs.a;
        let carry = self.regs.p.carry();

        let mut lo = (a & 0x0F) + (val & 0x0F) + carry;
        if lo > 9 {
            lo += 6;
        }
        let mut hi = (a >> 4) + (val >> 4) + u8::from(lo > 0x0F);

        let binary = a.wrapping_add(val).wrapping_add(carry);
        let intermediate = (hi << 4) | (lo & 0x0F);
        self.regs.p.set_if(Z, binary == 0);
        self.regs.p.set_if(N, intermediate & 0x80 != 0);
        self.regs
            .p
            .set_if(V, (a ^ intermediate) & !(a ^ val) & 0x80 != 0);

        if hi > 9 {
            hi += 6;
        }
        self.regs.p.set_if(C, hi > 0x0F);
        self.regs.a = (hi << 4) | (lo & 0x0F);
    }

    fn do_sbc(&mut self, val: u8) {
        if self.regs.p.is_set(D) {
            self.do_sbc_decimal(val);
        } else {
            // SBC is ADC with the operand inverted
            self.do_adc_binary(!val);
        }
    }

    /// NMOS decimal subtract. All flags come from the binary result; only
    /// the accumulator is decimal-adjusted.
    fn do_sbc_decimal(&mut self, val: u8) {
        let a = self.regs.a;
        let borrow = i16::from(1 - self.regs.p.carry());

        let binary = i16::from(a) - i16::from(val) - borrow;
        self.regs.p.set_if(C, binary >= 0);
        self.regs.p.set_if(Z, binary as u8 == 0);
        self.regs.p.set_if(N, binary & 0x80 != 0);
        self.regs.p.set_if(
            V,
            (i16::from(a) ^ binary) & (i16::from(a) ^ i16::from(val)) & 0x80 != 0,
        );

        let mut lo = i16::from(a & 0x0F) - i16::from(val & 0x0F) - borrow;
        let mut hi = i16::from(a >> 4) - i16::from(val >> 4);
        if lo < 0 {
            lo -= 6;
            hi -= 1;
        }
        if hi < 0 {
            hi -= 6;
        }
        self.regs.a = ((hi << 4) as u8) | ((lo & 0x0F) as u8);
    }

    /// ARR: AND then ROR, with flags taken from the rotate's bits 5 and 6.
    /// In decimal mode each nibble is then fixed up like a BCD adjust.
    fn do_arr(&mut self, val: u8) {
        let and = self.regs.a & val;
        let carry_in = self.regs.p.carry() << 7;
        let mut result = (and >> 1) | carry_in;

        if self.regs.p.is_set(D) {
            self.regs.p.set_if(N, carry_in != 0);
            self.regs.p.set_if(Z, result == 0);
            self.regs.p.set_if(V, (and ^ result) & 0x40 != 0);
            if (and & 0x0F) + (and & 0x01) > 5 {
                result = (result & 0xF0) | (result.wrapping_add(6) & 0x0F);
            }
            let high_fix = u16::from(and & 0xF0) + u16::from(and & 0x10) > 0x50;
            if high_fix {
                result = (result & 0x0F) | (result.wrapping_add(0x60) & 0xF0);
            }
            self.regs.p.set_if(C, high_fix);
            self.regs.a = result;
        } else {
            self.do_lda(result);
            self.regs.p.set_if(C, result & 0x40 != 0);
            self.regs
                .p
                .set_if(V, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);
        }
    }

    fn do_asl(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = val << 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_lsr(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = val >> 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_rol(&mut self, val: u8) -> u8 {
        let carry = self.regs.p.carry();
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = (val << 1) | carry;
        self.regs.p.update_nz(result);
        result
    }

    fn do_ror(&mut self, val: u8) -> u8 {
        let carry = self.regs.p.carry() << 7;
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = (val >> 1) | carry;
        self.regs.p.update_nz(result);
        result
    }

    fn do_inc(&mut self, val: u8) -> u8 {
        let result = val.wrapping_add(1);
        self.regs.p.update_nz(result);
        result
    }

    fn do_dec(&mut self, val: u8) -> u8 {
        let result = val.wrapping_sub(1);
        self.regs.p.update_nz(result);
        result
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// Returns 0 if not taken, 1 if taken, 2 if taken across a page.
    fn branch(&mut self, operand: Operand, taken: bool) -> u32 {
        let Operand::Branch(offset) = operand else {
            return 0;
        };
        if !taken {
            return 0;
        }
        let target = self.regs.pc.wrapping_add_signed(i16::from(offset));
        let extra = if (target ^ self.regs.pc) & 0xFF00 != 0 { 2 } else { 1 };
        self.regs.pc = target;
        extra
    }

    fn op_jsr<B: Bus>(&mut self, bus: &mut B, operand: Operand) {
        let Operand::Address(target) = operand else {
            return;
        };
        // The pushed address is the last byte of the JSR instruction
        let ret = self.regs.pc.wrapping_sub(1);
        self.push(bus, (ret >> 8) as u8);
        self.push(bus, ret as u8);
        self.regs.pc = target;
    }

    fn op_rts<B: Bus>(&mut self, bus: &mut B) {
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        self.regs.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);
    }

    fn op_brk<B: Bus>(&mut self, bus: &mut B) {
        // BRK has a padding byte after the opcode
        let ret = self.regs.pc.wrapping_add(1);
        self.push(bus, (ret >> 8) as u8);
        self.push(bus, ret as u8);
        self.push(bus, self.regs.p.to_byte_brk());
        self.regs.p.set(I);
        self.regs.pc = Self::read_word(bus, BRK_VECTOR);
    }

    fn op_rti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.p = Status::from_byte(self.pull(bus));
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        self.regs.pc = u16::from_le_bytes([lo, hi]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{B, U};
    use emu_core::{Cpu, SimpleBus};

    fn run(program: &[u8], setup: impl FnOnce(&mut Mos6502)) -> (Mos6502, SimpleBus, u32) {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, program);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        setup(&mut cpu);
        let cycles = cpu.step(&mut bus);
        (cpu, bus, cycles)
    }

    #[test]
    fn decimal_adc_carries_between_digits() {
        let (cpu, _, _) = run(&[0x69, 0x46], |cpu| {
            cpu.regs.a = 0x58;
            cpu.regs.p.set(D);
            cpu.regs.p.set(C);
        });
        assert_eq!(cpu.regs.a, 0x05);
        assert!(cpu.regs.p.is_set(C));
    }

    #[test]
    fn decimal_adc_99_plus_1_rolls_over() {
        let (cpu, _, _) = run(&[0x69, 0x01], |cpu| {
            cpu.regs.a = 0x99;
            cpu.regs.p.set(D);
        });
        assert_eq!(cpu.regs.a, 0x00);
        assert!(cpu.regs.p.is_set(C));
        // Z follows the binary sum $9A on NMOS parts
        assert!(!cpu.regs.p.is_set(Z));
    }

    #[test]
    fn decimal_sbc() {
        let (cpu, _, _) = run(&[0xE9, 0x01], |cpu| {
            cpu.regs.a = 0x00;
            cpu.regs.p.set(D);
            cpu.regs.p.set(C);
        });
        assert_eq!(cpu.regs.a, 0x99);
        assert!(!cpu.regs.p.is_set(C));
    }

    #[test]
    fn binary_adc_overflow() {
        let (cpu, _, _) = run(&[0x69, 0x50], |cpu| cpu.regs.a = 0x50);
        assert_eq!(cpu.regs.a, 0xA0);
        assert!(cpu.regs.p.is_set(V));
        assert!(cpu.regs.p.is_set(N));
        assert!(!cpu.regs.p.is_set(C));
    }

    #[test]
    fn lax_loads_a_and_x() {
        let (cpu, _, cycles) = run(&[0xA7, 0x10], |_| {});
        assert_eq!(cycles, 3);
        assert_eq!(cpu.regs.a, 0);
        assert_eq!(cpu.regs.x, 0);
        assert!(cpu.regs.p.is_set(Z));
    }

    #[test]
    fn sax_stores_a_and_x() {
        let (_, bus, _) = run(&[0x87, 0x10], |cpu| {
            cpu.regs.a = 0xF0;
            cpu.regs.x = 0x3C;
        });
        assert_eq!(bus.peek(0x0010), 0x30);
    }

    #[test]
    fn dcp_decrements_then_compares() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xC7, 0x10]);
        bus.load(0x0010, &[0x43]);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        cpu.regs.a = 0x42;
        assert_eq!(cpu.step(&mut bus), 5);
        assert_eq!(bus.peek(0x0010), 0x42);
        assert!(cpu.regs.p.is_set(Z));
        assert!(cpu.regs.p.is_set(C));
    }

    #[test]
    fn isc_increments_then_subtracts() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xE7, 0x10]);
        bus.load(0x0010, &[0x0F]);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        cpu.regs.a = 0x20;
        cpu.regs.p.set(C);
        cpu.step(&mut bus);
        assert_eq!(bus.peek(0x0010), 0x10);
        assert_eq!(cpu.regs.a, 0x10);
    }

    #[test]
    fn slo_shifts_then_ors() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0x07, 0x10]);
        bus.load(0x0010, &[0x81]);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        cpu.regs.a = 0x01;
        cpu.step(&mut bus);
        assert_eq!(bus.peek(0x0010), 0x02);
        assert_eq!(cpu.regs.a, 0x03);
        assert!(cpu.regs.p.is_set(C));
    }

    #[test]
    fn rra_feeds_rotate_carry_into_adc() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0x67, 0x10]);
        bus.load(0x0010, &[0x03]);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        cpu.regs.a = 0x10;
        cpu.step(&mut bus);
        // ROR $03 -> $01 with carry out, then $10 + $01 + 1
        assert_eq!(bus.peek(0x0010), 0x01);
        assert_eq!(cpu.regs.a, 0x12);
    }

    #[test]
    fn anc_copies_n_into_c() {
        let (cpu, _, _) = run(&[0x0B, 0x80], |cpu| cpu.regs.a = 0xFF);
        assert_eq!(cpu.regs.a, 0x80);
        assert!(cpu.regs.p.is_set(C));
        assert!(cpu.regs.p.is_set(N));
    }

    #[test]
    fn alr_ands_then_shifts() {
        let (cpu, _, _) = run(&[0x4B, 0x03], |cpu| cpu.regs.a = 0xFF);
        assert_eq!(cpu.regs.a, 0x01);
        assert!(cpu.regs.p.is_set(C));
    }

    #[test]
    fn arr_binary_flags() {
        let (cpu, _, _) = run(&[0x6B, 0xFF], |cpu| {
            cpu.regs.a = 0xC0;
            cpu.regs.p.set(C);
        });
        // ($C0 >> 1) | $80 = $E0: bit 6 set, bit 5 set
        assert_eq!(cpu.regs.a, 0xE0);
        assert!(cpu.regs.p.is_set(C));
        assert!(!cpu.regs.p.is_set(V));
        assert!(cpu.regs.p.is_set(N));
    }

    #[test]
    fn sbx_subtracts_from_a_and_x() {
        let (cpu, _, _) = run(&[0xCB, 0x02], |cpu| {
            cpu.regs.a = 0x0F;
            cpu.regs.x = 0x07;
        });
        assert_eq!(cpu.regs.x, 0x05);
        assert!(cpu.regs.p.is_set(C));
    }

    #[test]
    fn sbc_mirror_at_eb() {
        let (cpu, _, cycles) = run(&[0xEB, 0x01], |cpu| {
            cpu.regs.a = 0x05;
            cpu.regs.p.set(C);
        });
        assert_eq!(cycles, 2);
        assert_eq!(cpu.regs.a, 0x04);
    }

    #[test]
    fn lxa_and_ane_use_magic_constant() {
        let (cpu, _, _) = run(&[0xAB, 0x0F], |cpu| cpu.regs.a = 0x00);
        assert_eq!(cpu.regs.a, 0x0E);
        assert_eq!(cpu.regs.x, 0x0E);

        let (cpu, _, _) = run(&[0x8B, 0xFF], |cpu| {
            cpu.regs.a = 0x01;
            cpu.regs.x = 0x0F;
        });
        assert_eq!(cpu.regs.a, 0x0F);
    }

    #[test]
    fn shx_stores_x_and_high_plus_one() {
        let (_, bus, cycles) = run(&[0x9E, 0x00, 0x12], |cpu| {
            cpu.regs.x = 0xFF;
            cpu.regs.y = 0x01;
        });
        assert_eq!(cycles, 5);
        assert_eq!(bus.peek(0x1201), 0x13);
    }

    #[test]
    fn las_ands_with_stack_pointer() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0xBB, 0x00, 0x03]);
        bus.load(0x0300, &[0xF3]);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        cpu.regs.s = 0x3F;
        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.regs.a, 0x33);
        assert_eq!(cpu.regs.x, 0x33);
        assert_eq!(cpu.regs.s, 0x33);
    }

    #[test]
    fn multi_byte_nops_skip_operands() {
        let (cpu, _, cycles) = run(&[0x0C, 0x00, 0x10], |_| {});
        assert_eq!(cycles, 4);
        assert_eq!(cpu.regs.pc, 0x0203);

        let (cpu, _, cycles) = run(&[0x80, 0xFF], |_| {});
        assert_eq!(cycles, 2);
        assert_eq!(cpu.regs.pc, 0x0202);
    }

    #[test]
    fn brk_and_rti_round_trip() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0x00, 0xEA]);
        bus.load(BRK_VECTOR, &[0x00, 0x03]);
        bus.load(0x0300, &[0x40]);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        cpu.regs.s = 0xFF;
        cpu.regs.p = Status::from_byte(C);

        assert_eq!(cpu.step(&mut bus), 7);
        assert_eq!(cpu.regs.pc, 0x0300);
        assert!(cpu.regs.p.is_set(I));
        assert_eq!(bus.peek(0x01FF), 0x02);
        assert_eq!(bus.peek(0x01FE), 0x02);
        assert_eq!(bus.peek(0x01FD), C | U | B);

        assert_eq!(cpu.step(&mut bus), 6);
        assert_eq!(cpu.regs.pc, 0x0202);
        assert!(cpu.regs.p.is_set(C));
        assert!(cpu.regs.p.is_set(U));
        assert_eq!(cpu.regs.s, 0xFF);
    }

    #[test]
    fn jsr_rts_round_trip() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0x20, 0x00, 0x03]);
        bus.load(0x0300, &[0x60]);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        cpu.regs.s = 0xFF;
        assert_eq!(cpu.step(&mut bus), 6);
        assert_eq!(bus.peek(0x01FF), 0x02);
        assert_eq!(bus.peek(0x01FE), 0x02);
        assert_eq!(cpu.step(&mut bus), 6);
        assert_eq!(cpu.regs.pc, 0x0203);
    }

    #[test]
    fn plp_keeps_unused_bit() {
        let mut bus = SimpleBus::new();
        bus.load(0x0200, &[0x28]);
        bus.load(0x01FF, &[0x00]);
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0200;
        cpu.regs.s = 0xFE;
        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.regs.p.0, U);
    }

    #[test]
    fn txs_leaves_flags() {
        let (cpu, _, _) = run(&[0x9A], |cpu| {
            cpu.regs.x = 0x00;
            cpu.regs.p = Status::new();
        });
        assert_eq!(cpu.regs.s, 0x00);
        assert!(!cpu.regs.p.is_set(Z));
    }
}
