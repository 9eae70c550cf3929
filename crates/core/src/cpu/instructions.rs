//! Instruction effects. Every handler has the `opcodes::Handler` shape so
//! the table can point straight at it; the mode argument is ignored by
//! the implied-mode instructions.

use super::{Cpu, Interrupt, Mode, Status};

impl Cpu {
    fn add_with_carry(&mut self, operand: u8) {
        let a = self.a;
        let result = a as u16 + operand as u16 + self.p.carry as u16;
        self.p.carry = result > 0xFF;
        self.p.overflow = (a ^ result as u8) & (operand ^ result as u8) & 0x80 != 0;
        self.a = result as u8;
        self.p.set_zero_negative(self.a);
    }

    fn compare(&mut self, register: u8, operand: u8) {
        self.p.set_zero_negative(register.wrapping_sub(operand));
        self.p.carry = register >= operand;
    }

    /// Read-modify-write on the accumulator or on memory.
    fn modify(&mut self, mode: Mode, f: impl FnOnce(&mut Self, u8) -> u8) {
        if mode == Mode::Accumulator {
            let value = self.a;
            self.a = f(self, value);
            return;
        }
        let address = self.operand_address(mode);
        let operand = self.bus.read(address);
        let result = f(self, operand);
        self.bus.write(address, result);
    }

    fn branch(&mut self, mode: Mode, condition: bool) {
        let target = self.operand_address(mode);
        if condition {
            self.pc = target;
        }
    }

    // Loads and stores

    pub(super) fn lda(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.p.set_zero_negative(operand);
        self.a = operand;
    }

    pub(super) fn ldx(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.p.set_zero_negative(operand);
        self.x = operand;
    }

    pub(super) fn ldy(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.p.set_zero_negative(operand);
        self.y = operand;
    }

    pub(super) fn sta(&mut self, mode: Mode) {
        let address = self.operand_address(mode);
        self.bus.write(address, self.a);
    }

    pub(super) fn stx(&mut self, mode: Mode) {
        let address = self.operand_address(mode);
        self.bus.write(address, self.x);
    }

    pub(super) fn sty(&mut self, mode: Mode) {
        let address = self.operand_address(mode);
        self.bus.write(address, self.y);
    }

    // Arithmetic and comparisons

    pub(super) fn adc(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.add_with_carry(operand);
    }

    /// A - M - !C, computed as A + !M + C.
    pub(super) fn sbc(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.add_with_carry(!operand);
    }

    pub(super) fn cmp(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.compare(self.a, operand);
    }

    pub(super) fn cpx(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.compare(self.x, operand);
    }

    pub(super) fn cpy(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.compare(self.y, operand);
    }

    // Bitwise operations

    pub(super) fn and(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        let result = self.a & operand;
        self.p.set_zero_negative(result);
        self.a = result;
    }

    pub(super) fn ora(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        let result = self.a | operand;
        self.p.set_zero_negative(result);
        self.a = result;
    }

    pub(super) fn eor(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        let result = self.a ^ operand;
        self.p.set_zero_negative(result);
        self.a = result;
    }

    pub(super) fn bit(&mut self, mode: Mode) {
        let operand = self.read_operand(mode);
        self.p.zero = self.a & operand == 0;
        self.p.overflow = operand & 0b0100_0000 != 0;
        self.p.negative = operand & 0b1000_0000 != 0;
    }

    // Shifts and rotates

    pub(super) fn asl(&mut self, mode: Mode) {
        self.modify(mode, |cpu, operand| {
            let result = operand << 1;
            cpu.p.carry = operand & 0b1000_0000 != 0;
            cpu.p.set_zero_negative(result);
            result
        });
    }

    pub(super) fn lsr(&mut self, mode: Mode) {
        self.modify(mode, |cpu, operand| {
            let result = operand >> 1;
            cpu.p.carry = operand & 0b0000_0001 != 0;
            cpu.p.set_zero_negative(result);
            result
        });
    }

    pub(super) fn rol(&mut self, mode: Mode) {
        self.modify(mode, |cpu, operand| {
            let result = (operand << 1) | cpu.p.carry as u8;
            cpu.p.carry = operand & 0b1000_0000 != 0;
            cpu.p.set_zero_negative(result);
            result
        });
    }

    pub(super) fn ror(&mut self, mode: Mode) {
        self.modify(mode, |cpu, operand| {
            let result = (operand >> 1) | ((cpu.p.carry as u8) << 7);
            cpu.p.carry = operand & 0b0000_0001 != 0;
            cpu.p.set_zero_negative(result);
            result
        });
    }

    // Increments and decrements

    pub(super) fn inc(&mut self, mode: Mode) {
        self.modify(mode, |cpu, operand| {
            let result = operand.wrapping_add(1);
            cpu.p.set_zero_negative(result);
            result
        });
    }

    pub(super) fn dec(&mut self, mode: Mode) {
        self.modify(mode, |cpu, operand| {
            let result = operand.wrapping_sub(1);
            cpu.p.set_zero_negative(result);
            result
        });
    }

    pub(super) fn inx(&mut self, _mode: Mode) {
        self.x = self.x.wrapping_add(1);
        self.p.set_zero_negative(self.x);
    }

    pub(super) fn dex(&mut self, _mode: Mode) {
        self.x = self.x.wrapping_sub(1);
        self.p.set_zero_negative(self.x);
    }

    pub(super) fn iny(&mut self, _mode: Mode) {
        self.y = self.y.wrapping_add(1);
        self.p.set_zero_negative(self.y);
    }

    pub(super) fn dey(&mut self, _mode: Mode) {
        self.y = self.y.wrapping_sub(1);
        self.p.set_zero_negative(self.y);
    }

    // Register moves

    pub(super) fn tax(&mut self, _mode: Mode) {
        self.x = self.a;
        self.p.set_zero_negative(self.x);
    }

    pub(super) fn tay(&mut self, _mode: Mode) {
        self.y = self.a;
        self.p.set_zero_negative(self.y);
    }

    pub(super) fn txa(&mut self, _mode: Mode) {
        self.a = self.x;
        self.p.set_zero_negative(self.a);
    }

    pub(super) fn tya(&mut self, _mode: Mode) {
        self.a = self.y;
        self.p.set_zero_negative(self.a);
    }

    pub(super) fn txs(&mut self, _mode: Mode) {
        self.sp = self.x;
    }

    pub(super) fn tsx(&mut self, _mode: Mode) {
        self.x = self.sp;
        self.p.set_zero_negative(self.x);
    }

    // Flag operations

    pub(super) fn clc(&mut self, _mode: Mode) {
        self.p.carry = false;
    }

    pub(super) fn sec(&mut self, _mode: Mode) {
        self.p.carry = true;
    }

    pub(super) fn cli(&mut self, _mode: Mode) {
        self.p.interrupt_disable = false;
    }

    pub(super) fn sei(&mut self, _mode: Mode) {
        self.p.interrupt_disable = true;
    }

    pub(super) fn clv(&mut self, _mode: Mode) {
        self.p.overflow = false;
    }

    pub(super) fn cld(&mut self, _mode: Mode) {
        self.p.decimal = false;
    }

    pub(super) fn sed(&mut self, _mode: Mode) {
        self.p.decimal = true;
    }

    // Branches

    pub(super) fn bpl(&mut self, mode: Mode) {
        let negative = self.p.negative;
        self.branch(mode, !negative);
    }

    pub(super) fn bmi(&mut self, mode: Mode) {
        let negative = self.p.negative;
        self.branch(mode, negative);
    }

    pub(super) fn bvc(&mut self, mode: Mode) {
        let overflow = self.p.overflow;
        self.branch(mode, !overflow);
    }

    pub(super) fn bvs(&mut self, mode: Mode) {
        let overflow = self.p.overflow;
        self.branch(mode, overflow);
    }

    pub(super) fn bcc(&mut self, mode: Mode) {
        let carry = self.p.carry;
        self.branch(mode, !carry);
    }

    pub(super) fn bcs(&mut self, mode: Mode) {
        let carry = self.p.carry;
        self.branch(mode, carry);
    }

    pub(super) fn bne(&mut self, mode: Mode) {
        let zero = self.p.zero;
        self.branch(mode, !zero);
    }

    pub(super) fn beq(&mut self, mode: Mode) {
        let zero = self.p.zero;
        self.branch(mode, zero);
    }

    // Jumps and procedure calls

    pub(super) fn jmp(&mut self, mode: Mode) {
        self.pc = self.operand_address(mode);
    }

    /// Pushes the address of the last operand byte; RTS adds the one back.
    pub(super) fn jsr(&mut self, mode: Mode) {
        let target_address = self.operand_address(mode);
        let return_address = self.pc.wrapping_sub(1);
        self.push_word(return_address);
        self.pc = target_address;
    }

    pub(super) fn rts(&mut self, _mode: Mode) {
        self.pc = self.pop_word().wrapping_add(1);
    }

    /// The byte after BRK is padding and is skipped on return.
    pub(super) fn brk(&mut self, _mode: Mode) {
        self.increment_pc();
        self.interrupt(Interrupt::Break);
    }

    pub(super) fn rti(&mut self, _mode: Mode) {
        self.p = Status::from_byte(self.pop_byte());
        self.pc = self.pop_word();
    }

    // Stack operations

    pub(super) fn pha(&mut self, _mode: Mode) {
        self.push_byte(self.a);
    }

    pub(super) fn pla(&mut self, _mode: Mode) {
        let result = self.pop_byte();
        self.p.set_zero_negative(result);
        self.a = result;
    }

    pub(super) fn php(&mut self, _mode: Mode) {
        self.push_byte(self.p.to_byte());
    }

    pub(super) fn plp(&mut self, _mode: Mode) {
        self.p = Status::from_byte(self.pop_byte());
    }

    pub(super) fn nop(&mut self, _mode: Mode) {}
}
