//! Operand resolution.
//!
//! Turns a decoded instruction's addressing mode into either an immediate
//! value or a 24-bit effective address, consuming operand bytes from the
//! instruction stream and charging the direct-page misalignment penalty
//! where it applies.

use crate::error::CpuError;
use crate::memory::Mapper;
use crate::cpu::opcodes::{AddressingMode, Opcode};
use crate::cpu::Cpu;

/// A resolved operand, ready for the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand.
    None,
    /// The instruction targets the accumulator register.
    Accumulator,
    /// An immediate value, already masked to the operating width.
    Value(u16),
    /// A 24-bit effective address.
    Address(u32),
}

pub fn resolve(cpu: &mut Cpu, mapper: &mut Mapper, opcode: &Opcode) -> Result<Operand, CpuError> {
    match opcode.mode {
        AddressingMode::Implied | AddressingMode::StackPush | AddressingMode::StackPull => {
            Ok(Operand::None)
        }
        AddressingMode::Accumulator => Ok(Operand::Accumulator),
        AddressingMode::StackInterrupt => {
            // The byte after the opcode is a signature byte, fetched and
            // discarded.
            fetch_byte(cpu, mapper)?;
            Ok(Operand::None)
        }
        AddressingMode::Immediate => {
            let low = fetch_byte(cpu, mapper)?;
            if cpu.immediate_is_8bit(opcode.width) {
                Ok(Operand::Value(u16::from(low)))
            } else {
                let high = fetch_byte(cpu, mapper)?;
                Ok(Operand::Value(u16::from(low) | u16::from(high) << 8))
            }
        }
        AddressingMode::Absolute => {
            let address = u16::from(fetch_byte(cpu, mapper)?)
                | u16::from(fetch_byte(cpu, mapper)?) << 8;
            Ok(Operand::Address(
                u32::from(cpu.dbr) << 16 | u32::from(address),
            ))
        }
        AddressingMode::DirectPage => Ok(Operand::Address(direct_page(cpu, mapper, 0)?)),
        AddressingMode::DirectPageX => {
            let index = cpu.x;
            Ok(Operand::Address(direct_page(cpu, mapper, index)?))
        }
        AddressingMode::DirectPageY => {
            let index = cpu.y;
            Ok(Operand::Address(direct_page(cpu, mapper, index)?))
        }
        AddressingMode::DirectPageIndirectLongY => {
            let pointer = direct_page(cpu, mapper, 0)?;
            let low = mapper.read(pointer)?;
            let mid = mapper.read(bank_zero_next(pointer, 1))?;
            let high = mapper.read(bank_zero_next(pointer, 2))?;
            let base = u32::from(low) | u32::from(mid) << 8 | u32::from(high) << 16;
            Ok(Operand::Address(
                base.wrapping_add(u32::from(cpu.y)) & 0x00FF_FFFF,
            ))
        }
        AddressingMode::PcRelative => {
            let offset = fetch_byte(cpu, mapper)? as i8;
            Ok(Operand::Value(cpu.pc.wrapping_add(offset as u16)))
        }
    }
}

/// Consume one byte from the instruction stream.
fn fetch_byte(cpu: &mut Cpu, mapper: &mut Mapper) -> Result<u8, CpuError> {
    cpu.fetch_operand(mapper)
}

/// Direct-page effective address: always bank 0, 16-bit wraparound, one
/// extra cycle when the direct-page base is not page aligned.
fn direct_page(cpu: &mut Cpu, mapper: &mut Mapper, index: u16) -> Result<u32, CpuError> {
    let offset = fetch_byte(cpu, mapper)?;
    if cpu.dp & 0x00FF != 0 {
        cpu.add_cycles(1);
    }
    let address = cpu.dp.wrapping_add(u16::from(offset)).wrapping_add(index);
    Ok(u32::from(address))
}

/// Advance a bank-0 pointer without leaving the bank.
fn bank_zero_next(pointer: u32, amount: u16) -> u32 {
    u32::from((pointer as u16).wrapping_add(amount))
}
