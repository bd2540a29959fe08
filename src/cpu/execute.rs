//! Per-instruction semantics.
//!
//! Each instruction family works through the resolved [`Operand`] at the
//! width selected by the status register, charging the width penalty for
//! 16-bit data paths (one cycle for plain accesses, two for memory
//! read-modify-write).

use crate::error::CpuError;
use crate::memory::Mapper;
use crate::cpu::addressing::Operand;
use crate::cpu::opcodes::{AddressingMode, Instruction, Opcode};
use crate::cpu::{Cpu, StatusFlags};

pub fn execute(
    cpu: &mut Cpu,
    mapper: &mut Mapper,
    opcode: &Opcode,
    operand: Operand,
) -> Result<(), CpuError> {
    match opcode.instruction {
        Instruction::Lda => {
            let is8 = cpu.a_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            set_accumulator(cpu, value);
        }
        Instruction::Ldx => {
            let is8 = cpu.index_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            cpu.x = value;
            set_nz(cpu, value, is8);
        }
        Instruction::Ldy => {
            let is8 = cpu.index_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            cpu.y = value;
            set_nz(cpu, value, is8);
        }
        Instruction::Sta => {
            let (value, is8) = (cpu.a, cpu.a_is_8bit());
            store(cpu, mapper, operand, value, is8)?;
        }
        Instruction::Stx => {
            let (value, is8) = (cpu.x, cpu.index_is_8bit());
            store(cpu, mapper, operand, value, is8)?;
        }
        Instruction::Sty => {
            let (value, is8) = (cpu.y, cpu.index_is_8bit());
            store(cpu, mapper, operand, value, is8)?;
        }
        Instruction::Stz => {
            let is8 = cpu.a_is_8bit();
            store(cpu, mapper, operand, 0, is8)?;
        }

        Instruction::Adc => {
            let is8 = cpu.a_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            add_with_carry(cpu, value);
        }
        Instruction::Sbc => {
            let is8 = cpu.a_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            subtract_with_borrow(cpu, value);
        }
        Instruction::Cmp => {
            let (register, is8) = (cpu.a, cpu.a_is_8bit());
            let value = load(cpu, mapper, operand, is8)?;
            compare(cpu, register, value, is8);
        }
        Instruction::Cpx => {
            let (register, is8) = (cpu.x, cpu.index_is_8bit());
            let value = load(cpu, mapper, operand, is8)?;
            compare(cpu, register, value, is8);
        }
        Instruction::Cpy => {
            let (register, is8) = (cpu.y, cpu.index_is_8bit());
            let value = load(cpu, mapper, operand, is8)?;
            compare(cpu, register, value, is8);
        }
        Instruction::Inc => modify(cpu, mapper, operand, |value, is8| {
            mask(value.wrapping_add(1), is8)
        })?,
        Instruction::Dec => modify(cpu, mapper, operand, |value, is8| {
            mask(value.wrapping_sub(1), is8)
        })?,
        Instruction::Inx => {
            let is8 = cpu.index_is_8bit();
            cpu.x = mask(cpu.x.wrapping_add(1), is8);
            let value = cpu.x;
            set_nz(cpu, value, is8);
        }
        Instruction::Iny => {
            let is8 = cpu.index_is_8bit();
            cpu.y = mask(cpu.y.wrapping_add(1), is8);
            let value = cpu.y;
            set_nz(cpu, value, is8);
        }
        Instruction::Dex => {
            let is8 = cpu.index_is_8bit();
            cpu.x = mask(cpu.x.wrapping_sub(1), is8);
            let value = cpu.x;
            set_nz(cpu, value, is8);
        }
        Instruction::Dey => {
            let is8 = cpu.index_is_8bit();
            cpu.y = mask(cpu.y.wrapping_sub(1), is8);
            let value = cpu.y;
            set_nz(cpu, value, is8);
        }

        Instruction::And => {
            let is8 = cpu.a_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            let result = cpu.a & value;
            set_accumulator(cpu, result);
        }
        Instruction::Ora => {
            let is8 = cpu.a_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            let result = cpu.a | value;
            set_accumulator(cpu, result);
        }
        Instruction::Eor => {
            let is8 = cpu.a_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            let result = cpu.a ^ value;
            set_accumulator(cpu, result);
        }
        Instruction::Bit => {
            let is8 = cpu.a_is_8bit();
            let value = load(cpu, mapper, operand, is8)?;
            let zero = mask(cpu.a, is8) & value == 0;
            cpu.set_flag(StatusFlags::ZERO, zero);
            // The immediate form only tests; memory forms also copy the top
            // two operand bits into N and V.
            if opcode.mode != AddressingMode::Immediate {
                let (n_bit, v_bit) = if is8 {
                    (0x0080, 0x0040)
                } else {
                    (0x8000, 0x4000)
                };
                cpu.set_flag(StatusFlags::NEGATIVE, value & n_bit != 0);
                cpu.set_flag(StatusFlags::OVERFLOW, value & v_bit != 0);
            }
        }
        Instruction::Tsb => test_and_modify(cpu, mapper, operand, |data, a| data | a)?,
        Instruction::Trb => test_and_modify(cpu, mapper, operand, |data, a| data & !a)?,

        Instruction::Asl => modify_with_carry(cpu, mapper, operand, |value, is8, _carry| {
            let top = if is8 { 0x0080 } else { 0x8000 };
            (mask(value << 1, is8), value & top != 0)
        })?,
        Instruction::Lsr => modify_with_carry(cpu, mapper, operand, |value, _is8, _carry| {
            (value >> 1, value & 0x0001 != 0)
        })?,
        Instruction::Rol => modify_with_carry(cpu, mapper, operand, |value, is8, carry| {
            let top = if is8 { 0x0080 } else { 0x8000 };
            (mask(value << 1 | u16::from(carry), is8), value & top != 0)
        })?,
        Instruction::Ror => modify_with_carry(cpu, mapper, operand, |value, is8, carry| {
            let top = if is8 { 0x0080 } else { 0x8000 };
            let carried = if carry { top } else { 0 };
            (value >> 1 | carried, value & 0x0001 != 0)
        })?,

        Instruction::Bpl => {
            let taken = !cpu.flag(StatusFlags::NEGATIVE);
            branch(cpu, operand, taken);
        }
        Instruction::Bmi => {
            let taken = cpu.flag(StatusFlags::NEGATIVE);
            branch(cpu, operand, taken);
        }
        Instruction::Bvc => {
            let taken = !cpu.flag(StatusFlags::OVERFLOW);
            branch(cpu, operand, taken);
        }
        Instruction::Bvs => {
            let taken = cpu.flag(StatusFlags::OVERFLOW);
            branch(cpu, operand, taken);
        }
        Instruction::Bcc => {
            let taken = !cpu.flag(StatusFlags::CARRY);
            branch(cpu, operand, taken);
        }
        Instruction::Bcs => {
            let taken = cpu.flag(StatusFlags::CARRY);
            branch(cpu, operand, taken);
        }
        Instruction::Bne => {
            let taken = !cpu.flag(StatusFlags::ZERO);
            branch(cpu, operand, taken);
        }
        Instruction::Beq => {
            let taken = cpu.flag(StatusFlags::ZERO);
            branch(cpu, operand, taken);
        }
        Instruction::Bra => {
            if let Operand::Value(target) = operand {
                cpu.pc = target;
            }
        }

        Instruction::Jmp => {
            if let Operand::Address(address) = operand {
                cpu.pc = address as u16;
            }
        }
        Instruction::Jsr => {
            if let Operand::Address(address) = operand {
                let return_address = cpu.pc.wrapping_sub(1);
                cpu.push_word(mapper, return_address)?;
                cpu.pc = address as u16;
            }
        }
        Instruction::Rts => {
            cpu.pc = cpu.pull_word(mapper)?.wrapping_add(1);
        }
        Instruction::Rti => {
            let status = cpu.pull_byte(mapper)?;
            cpu.load_status(status);
            cpu.pc = cpu.pull_word(mapper)?;
            if !cpu.emulation_mode {
                cpu.pbr = cpu.pull_byte(mapper)?;
            }
        }
        Instruction::Brk => software_interrupt(cpu, mapper, true)?,
        Instruction::Cop => software_interrupt(cpu, mapper, false)?,

        Instruction::Pha => {
            let (value, is8) = (cpu.a, cpu.a_is_8bit());
            push_register(cpu, mapper, value, is8)?;
        }
        Instruction::Pla => {
            let is8 = cpu.a_is_8bit();
            let value = pull_register(cpu, mapper, is8)?;
            cpu.a = if is8 { cpu.a & 0xFF00 | value } else { value };
            set_nz(cpu, value, is8);
        }
        Instruction::Phx => {
            let (value, is8) = (cpu.x, cpu.index_is_8bit());
            push_register(cpu, mapper, value, is8)?;
        }
        Instruction::Plx => {
            let is8 = cpu.index_is_8bit();
            let value = pull_register(cpu, mapper, is8)?;
            cpu.x = value;
            set_nz(cpu, value, is8);
        }
        Instruction::Phy => {
            let (value, is8) = (cpu.y, cpu.index_is_8bit());
            push_register(cpu, mapper, value, is8)?;
        }
        Instruction::Ply => {
            let is8 = cpu.index_is_8bit();
            let value = pull_register(cpu, mapper, is8)?;
            cpu.y = value;
            set_nz(cpu, value, is8);
        }
        Instruction::Php => {
            let status = cpu.p.bits();
            cpu.push_byte(mapper, status)?;
        }
        Instruction::Plp => {
            let status = cpu.pull_byte(mapper)?;
            cpu.load_status(status);
        }
        Instruction::Phb => {
            let dbr = cpu.dbr;
            cpu.push_byte(mapper, dbr)?;
        }
        Instruction::Plb => {
            cpu.dbr = cpu.pull_byte(mapper)?;
            let dbr = cpu.dbr;
            cpu.set_nz_8(dbr);
        }
        Instruction::Phd => {
            let dp = cpu.dp;
            cpu.push_word(mapper, dp)?;
        }
        Instruction::Pld => {
            cpu.dp = cpu.pull_word(mapper)?;
            let dp = cpu.dp;
            cpu.set_nz_16(dp);
        }
        Instruction::Phk => {
            let pbr = cpu.pbr;
            cpu.push_byte(mapper, pbr)?;
        }

        Instruction::Clc => cpu.set_flag(StatusFlags::CARRY, false),
        Instruction::Sec => cpu.set_flag(StatusFlags::CARRY, true),
        Instruction::Cli => cpu.set_flag(StatusFlags::IRQ_DISABLE, false),
        Instruction::Sei => cpu.set_flag(StatusFlags::IRQ_DISABLE, true),
        Instruction::Cld => cpu.set_flag(StatusFlags::DECIMAL, false),
        Instruction::Sed => cpu.set_flag(StatusFlags::DECIMAL, true),
        Instruction::Clv => cpu.set_flag(StatusFlags::OVERFLOW, false),
        Instruction::Sep => {
            if let Operand::Value(bits) = operand {
                let status = cpu.p.bits() | bits as u8;
                cpu.load_status(status);
            }
        }
        Instruction::Rep => {
            if let Operand::Value(bits) = operand {
                let status = cpu.p.bits() & !(bits as u8);
                cpu.load_status(status);
            }
        }
        Instruction::Nop => {}

        Instruction::Tax => {
            let source = cpu.a;
            transfer_to_index(cpu, source, |cpu, v| cpu.x = v);
        }
        Instruction::Tay => {
            let source = cpu.a;
            transfer_to_index(cpu, source, |cpu, v| cpu.y = v);
        }
        Instruction::Txa => {
            let is8 = cpu.a_is_8bit();
            let value = mask(cpu.x, is8);
            set_accumulator(cpu, value);
        }
        Instruction::Tya => {
            let is8 = cpu.a_is_8bit();
            let value = mask(cpu.y, is8);
            set_accumulator(cpu, value);
        }
        Instruction::Txy => {
            let source = cpu.x;
            transfer_to_index(cpu, source, |cpu, v| cpu.y = v);
        }
        Instruction::Tyx => {
            let source = cpu.y;
            transfer_to_index(cpu, source, |cpu, v| cpu.x = v);
        }
        Instruction::Tsx => {
            let source = cpu.sp;
            transfer_to_index(cpu, source, |cpu, v| cpu.x = v);
        }
        Instruction::Txs => {
            cpu.sp = if cpu.emulation_mode {
                0x0100 | (cpu.x & 0x00FF)
            } else {
                cpu.x
            };
        }
        Instruction::Tcd => {
            cpu.dp = cpu.a;
            let dp = cpu.dp;
            cpu.set_nz_16(dp);
        }
        Instruction::Tdc => {
            cpu.a = cpu.dp;
            let a = cpu.a;
            cpu.set_nz_16(a);
        }
        Instruction::Tcs => {
            cpu.sp = if cpu.emulation_mode {
                0x0100 | (cpu.a & 0x00FF)
            } else {
                cpu.a
            };
        }
        Instruction::Tsc => {
            cpu.a = cpu.sp;
            let a = cpu.a;
            cpu.set_nz_16(a);
        }
        Instruction::Xba => {
            cpu.a = cpu.a.rotate_right(8);
            let low = cpu.a as u8;
            cpu.set_nz_8(low);
        }
        Instruction::Xce => {
            let carry = cpu.flag(StatusFlags::CARRY);
            cpu.set_flag(StatusFlags::CARRY, cpu.emulation_mode);
            cpu.emulation_mode = carry;
            cpu.enforce_mode_constraints();
        }
    }
    Ok(())
}

fn mask(value: u16, is8: bool) -> u16 {
    if is8 {
        value & 0x00FF
    } else {
        value
    }
}

fn set_nz(cpu: &mut Cpu, value: u16, is8: bool) {
    if is8 {
        cpu.set_nz_8(value as u8);
    } else {
        cpu.set_nz_16(value);
    }
}

/// Fetch the operand value at the given width, charging the 16-bit access
/// penalty.
fn load(cpu: &mut Cpu, mapper: &mut Mapper, operand: Operand, is8: bool) -> Result<u16, CpuError> {
    if !is8 {
        cpu.add_cycles(1);
    }
    match operand {
        Operand::Value(value) => Ok(value),
        Operand::Address(address) => {
            if is8 {
                Ok(u16::from(mapper.read(address)?))
            } else {
                Ok(mapper.read_word(address)?)
            }
        }
        Operand::Accumulator => Ok(mask(cpu.a, is8)),
        Operand::None => Ok(0),
    }
}

fn store(
    cpu: &mut Cpu,
    mapper: &mut Mapper,
    operand: Operand,
    value: u16,
    is8: bool,
) -> Result<(), CpuError> {
    if !is8 {
        cpu.add_cycles(1);
    }
    if let Operand::Address(address) = operand {
        if is8 {
            mapper.write(address, value as u8)?;
        } else {
            mapper.write_word(address, value)?;
        }
    }
    Ok(())
}

/// Read-modify-write through the operand. Accumulator forms pay no extra
/// cycles; 16-bit memory forms pay two for the wide read and write.
fn modify(
    cpu: &mut Cpu,
    mapper: &mut Mapper,
    operand: Operand,
    f: impl Fn(u16, bool) -> u16,
) -> Result<(), CpuError> {
    let is8 = cpu.a_is_8bit();
    match operand {
        Operand::Accumulator => {
            let result = f(mask(cpu.a, is8), is8);
            set_accumulator(cpu, result);
        }
        Operand::Address(address) => {
            if !is8 {
                cpu.add_cycles(2);
            }
            let value = if is8 {
                u16::from(mapper.read(address)?)
            } else {
                mapper.read_word(address)?
            };
            let result = f(value, is8);
            if is8 {
                mapper.write(address, result as u8)?;
            } else {
                mapper.write_word(address, result)?;
            }
            set_nz(cpu, result, is8);
        }
        _ => {}
    }
    Ok(())
}

fn modify_with_carry(
    cpu: &mut Cpu,
    mapper: &mut Mapper,
    operand: Operand,
    f: impl Fn(u16, bool, bool) -> (u16, bool),
) -> Result<(), CpuError> {
    let is8 = cpu.a_is_8bit();
    let carry_in = cpu.flag(StatusFlags::CARRY);
    match operand {
        Operand::Accumulator => {
            let (result, carry) = f(mask(cpu.a, is8), is8, carry_in);
            cpu.set_flag(StatusFlags::CARRY, carry);
            set_accumulator(cpu, result);
        }
        Operand::Address(address) => {
            if !is8 {
                cpu.add_cycles(2);
            }
            let value = if is8 {
                u16::from(mapper.read(address)?)
            } else {
                mapper.read_word(address)?
            };
            let (result, carry) = f(value, is8, carry_in);
            cpu.set_flag(StatusFlags::CARRY, carry);
            if is8 {
                mapper.write(address, result as u8)?;
            } else {
                mapper.write_word(address, result)?;
            }
            set_nz(cpu, result, is8);
        }
        _ => {}
    }
    Ok(())
}

/// TSB/TRB: the zero flag tests the accumulator against the original data,
/// then the masked update is written back.
fn test_and_modify(
    cpu: &mut Cpu,
    mapper: &mut Mapper,
    operand: Operand,
    f: impl Fn(u16, u16) -> u16,
) -> Result<(), CpuError> {
    let is8 = cpu.a_is_8bit();
    if let Operand::Address(address) = operand {
        if !is8 {
            cpu.add_cycles(2);
        }
        let data = if is8 {
            u16::from(mapper.read(address)?)
        } else {
            mapper.read_word(address)?
        };
        let a = mask(cpu.a, is8);
        cpu.set_flag(StatusFlags::ZERO, a & data == 0);
        let result = mask(f(data, a), is8);
        if is8 {
            mapper.write(address, result as u8)?;
        } else {
            mapper.write_word(address, result)?;
        }
    }
    Ok(())
}

/// Replace the accumulator at the current width and update N/Z. In 8-bit
/// mode the high byte is untouched.
fn set_accumulator(cpu: &mut Cpu, value: u16) {
    if cpu.a_is_8bit() {
        cpu.a = cpu.a & 0xFF00 | value & 0x00FF;
        cpu.set_nz_8(value as u8);
    } else {
        cpu.a = value;
        cpu.set_nz_16(value);
    }
}

fn transfer_to_index(cpu: &mut Cpu, source: u16, assign: impl Fn(&mut Cpu, u16)) {
    let is8 = cpu.index_is_8bit();
    let value = mask(source, is8);
    assign(cpu, value);
    set_nz(cpu, value, is8);
}

fn push_register(
    cpu: &mut Cpu,
    mapper: &mut Mapper,
    value: u16,
    is8: bool,
) -> Result<(), CpuError> {
    if is8 {
        cpu.push_byte(mapper, value as u8)
    } else {
        cpu.add_cycles(1);
        cpu.push_word(mapper, value)
    }
}

fn pull_register(cpu: &mut Cpu, mapper: &mut Mapper, is8: bool) -> Result<u16, CpuError> {
    if is8 {
        Ok(u16::from(cpu.pull_byte(mapper)?))
    } else {
        cpu.add_cycles(1);
        cpu.pull_word(mapper)
    }
}

fn branch(cpu: &mut Cpu, operand: Operand, taken: bool) {
    if !taken {
        return;
    }
    if let Operand::Value(target) = operand {
        cpu.add_cycles(1);
        if cpu.emulation_mode && target & 0xFF00 != cpu.pc & 0xFF00 {
            cpu.add_cycles(1);
        }
        cpu.pc = target;
    }
}

fn compare(cpu: &mut Cpu, register: u16, value: u16, is8: bool) {
    let register = mask(register, is8);
    let diff = mask(register.wrapping_sub(value), is8);
    cpu.set_flag(StatusFlags::CARRY, register >= value);
    set_nz(cpu, diff, is8);
}

fn add_with_carry(cpu: &mut Cpu, value: u16) {
    let is8 = cpu.a_is_8bit();
    let a = mask(cpu.a, is8);
    let carry_in = cpu.flag(StatusFlags::CARRY);

    if cpu.flag(StatusFlags::DECIMAL) {
        // Decimal arithmetic costs one extra cycle and leaves overflow
        // cleared.
        cpu.add_cycles(1);
        let digits = if is8 { 2 } else { 4 };
        let (result, carry) = decimal_add(a, value, carry_in, digits);
        cpu.set_flag(StatusFlags::CARRY, carry);
        cpu.set_flag(StatusFlags::OVERFLOW, false);
        set_accumulator(cpu, result);
        return;
    }

    let sum = u32::from(a) + u32::from(value) + u32::from(carry_in);
    let (carry_bit, sign_bit) = if is8 { (0x100, 0x80) } else { (0x1_0000, 0x8000) };
    let result = mask(sum as u16, is8);
    cpu.set_flag(StatusFlags::CARRY, sum & carry_bit != 0);
    let overflow = (u32::from(a) ^ sum) & (u32::from(value) ^ sum) & sign_bit != 0;
    cpu.set_flag(StatusFlags::OVERFLOW, overflow);
    set_accumulator(cpu, result);
}

fn subtract_with_borrow(cpu: &mut Cpu, value: u16) {
    let is8 = cpu.a_is_8bit();
    let a = mask(cpu.a, is8);
    let carry_in = cpu.flag(StatusFlags::CARRY);

    if cpu.flag(StatusFlags::DECIMAL) {
        cpu.add_cycles(1);
        let digits = if is8 { 2 } else { 4 };
        let (result, carry) = decimal_subtract(a, value, carry_in, digits);
        cpu.set_flag(StatusFlags::CARRY, carry);
        cpu.set_flag(StatusFlags::OVERFLOW, false);
        set_accumulator(cpu, result);
        return;
    }

    // Binary subtraction is addition of the inverted operand.
    let inverted = mask(!value, is8);
    let sum = u32::from(a) + u32::from(inverted) + u32::from(carry_in);
    let (carry_bit, sign_bit) = if is8 { (0x100, 0x80) } else { (0x1_0000, 0x8000) };
    let result = mask(sum as u16, is8);
    cpu.set_flag(StatusFlags::CARRY, sum & carry_bit != 0);
    let overflow = (u32::from(a) ^ sum) & (u32::from(inverted) ^ sum) & sign_bit != 0;
    cpu.set_flag(StatusFlags::OVERFLOW, overflow);
    set_accumulator(cpu, result);
}

/// Nibble-wise BCD addition with the +6 correction per digit.
fn decimal_add(a: u16, b: u16, carry_in: bool, digits: u32) -> (u16, bool) {
    let mut result = 0u16;
    let mut carry = u16::from(carry_in);
    for digit in 0..digits {
        let shift = 4 * digit;
        let mut sum = (a >> shift & 0xF) + (b >> shift & 0xF) + carry;
        if sum > 9 {
            sum += 6;
            carry = 1;
        } else {
            carry = 0;
        }
        result |= (sum & 0xF) << shift;
    }
    (result, carry == 1)
}

/// Nibble-wise BCD subtraction; a set carry flag means no incoming borrow,
/// and the returned carry is clear when the subtraction borrowed.
fn decimal_subtract(a: u16, b: u16, carry_in: bool, digits: u32) -> (u16, bool) {
    let mut result = 0u16;
    let mut borrow = i32::from(!carry_in);
    for digit in 0..digits {
        let shift = 4 * digit;
        let mut diff = (a >> shift & 0xF) as i32 - (b >> shift & 0xF) as i32 - borrow;
        if diff < 0 {
            diff += 10;
            borrow = 1;
        } else {
            borrow = 0;
        }
        result |= ((diff as u16) & 0xF) << shift;
    }
    (result, borrow == 0)
}

/// BRK and COP: stack the return context, mask interrupts, leave decimal
/// mode, and vector through the cartridge header. Native mode also stacks
/// the program bank.
fn software_interrupt(cpu: &mut Cpu, mapper: &mut Mapper, brk: bool) -> Result<(), CpuError> {
    if !cpu.emulation_mode {
        let pbr = cpu.pbr;
        cpu.push_byte(mapper, pbr)?;
        cpu.add_cycles(1);
    }
    let pc = cpu.pc;
    cpu.push_word(mapper, pc)?;
    let status = cpu.p.bits();
    cpu.push_byte(mapper, status)?;

    cpu.set_flag(StatusFlags::IRQ_DISABLE, true);
    cpu.set_flag(StatusFlags::DECIMAL, false);

    let cartridge = mapper.cartridge();
    let vector = if cpu.emulation_mode {
        let vectors = cartridge.emulation_vectors();
        if brk {
            vectors.irq_brk
        } else {
            vectors.cop
        }
    } else {
        let vectors = cartridge.native_vectors();
        if brk {
            vectors.brk
        } else {
            vectors.cop
        }
    };
    cpu.pbr = 0;
    cpu.pc = vector;
    Ok(())
}
