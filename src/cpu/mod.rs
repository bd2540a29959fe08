//! 65C816 execution core.
//!
//! The core owns the register file and the fetch/decode/execute loop.
//! Operand resolution lives in [`addressing`], per-instruction semantics in
//! [`execute`], and the descriptor table in [`opcodes`]. Memory goes through
//! the bank-aware mapper; every access can fault, and faults abort the
//! current step with the failing address intact.

pub mod addressing;
mod execute;
pub mod opcodes;

use bitflags::bitflags;
use log::{error, trace};

use crate::error::CpuError;
use crate::memory::Mapper;
use opcodes::{AddressingMode, TABLE};

bitflags! {
    /// Processor status register, `nvmxdizc`.
    ///
    /// In emulation mode the `m` and `x` bits are forced set and the
    /// break/unused bits of the original 6502 layout occupy the same
    /// positions, so the register is always rendered through this one type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const NEGATIVE     = 0x80;
        const OVERFLOW     = 0x40;
        const MEMORY_WIDTH = 0x20;
        const INDEX_WIDTH  = 0x10;
        const DECIMAL      = 0x08;
        const IRQ_DISABLE  = 0x04;
        const ZERO         = 0x02;
        const CARRY        = 0x01;
    }
}

/// What the last executed step looked like, for logging and debugging.
#[derive(Debug, Clone)]
pub struct TraceRecord {
    pub pbr: u8,
    pub pc: u16,
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub operand: u32,
    pub operand_bytes: u8,
}

pub struct Cpu {
    /// Accumulator. The high byte is preserved across 8-bit operations.
    pub a: u16,
    pub x: u16,
    pub y: u16,
    pub pc: u16,
    pub sp: u16,
    /// Direct page base, added to direct-page operands in bank 0.
    pub dp: u16,
    /// Data bank, prepended to 16-bit absolute addresses.
    pub dbr: u8,
    /// Program bank, prepended to the program counter.
    pub pbr: u8,
    pub p: StatusFlags,
    pub emulation_mode: bool,
    /// Cycles consumed by the step in progress.
    cycles: u32,
    /// Operand bytes captured while the resolver fetched them.
    operand_value: u32,
    operand_count: u8,
    last_trace: Option<TraceRecord>,
}

impl Cpu {
    /// Power-on state: emulation mode, stack at the top of page 1, interrupts
    /// disabled, 8-bit widths, execution starting at the reset address.
    pub fn new(reset_address: u16) -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            pc: reset_address,
            sp: 0x01FF,
            dp: 0,
            dbr: 0,
            pbr: 0,
            p: StatusFlags::MEMORY_WIDTH | StatusFlags::INDEX_WIDTH | StatusFlags::IRQ_DISABLE,
            emulation_mode: true,
            cycles: 0,
            operand_value: 0,
            operand_count: 0,
            last_trace: None,
        }
    }

    /// Fetch, decode, and execute one instruction. Returns the cycle count
    /// for the step, with all width, direct-page, branch, and page-crossing
    /// penalties applied.
    pub fn step(&mut self, mapper: &mut Mapper) -> Result<u32, CpuError> {
        self.cycles = 0;
        let pbr = self.pbr;
        let pc = self.pc;
        let opcode_byte = mapper.read(self.program_address())?;
        let opcode = TABLE[opcode_byte as usize].as_ref().ok_or_else(|| {
            error!("opcode {opcode_byte:#04X} has no descriptor at {pbr:02X}:{pc:04X}");
            CpuError::UnimplementedOpcode {
                opcode: opcode_byte,
                pbr,
                pc,
            }
        })?;

        self.operand_value = 0;
        self.operand_count = 0;
        self.increment_pc(1);
        self.cycles += u32::from(opcode.cycles);

        let operand = addressing::resolve(self, mapper, opcode)?;
        // The trace is assembled from the bytes the resolver already
        // consumed; recording never issues bus reads of its own.
        self.last_trace = Some(TraceRecord {
            pbr,
            pc,
            opcode: opcode_byte,
            mnemonic: opcode.mnemonic,
            mode: opcode.mode,
            operand: self.operand_value,
            operand_bytes: self.operand_count,
        });
        execute::execute(self, mapper, opcode, operand)?;

        if let Some(record) = &self.last_trace {
            trace!("{}", render_trace(record));
        }
        Ok(self.cycles)
    }

    /// Disassembly of the most recently executed instruction.
    pub fn disassemble(&self) -> Option<String> {
        self.last_trace.as_ref().map(render_trace)
    }

    /// Consume one operand byte from the instruction stream, keeping a copy
    /// for the step's trace record.
    pub(crate) fn fetch_operand(&mut self, mapper: &mut Mapper) -> Result<u8, CpuError> {
        let value = mapper.read(self.program_address())?;
        self.increment_pc(1);
        self.operand_value |= u32::from(value) << (8 * self.operand_count);
        self.operand_count += 1;
        Ok(value)
    }

    pub(crate) fn immediate_is_8bit(&self, width: opcodes::WidthClass) -> bool {
        match width {
            opcodes::WidthClass::Memory => self.a_is_8bit(),
            opcodes::WidthClass::Index => self.index_is_8bit(),
            opcodes::WidthClass::Byte => true,
        }
    }

    pub fn a_is_8bit(&self) -> bool {
        self.emulation_mode || self.p.contains(StatusFlags::MEMORY_WIDTH)
    }

    pub fn index_is_8bit(&self) -> bool {
        self.emulation_mode || self.p.contains(StatusFlags::INDEX_WIDTH)
    }

    pub(crate) fn program_address(&self) -> u32 {
        u32::from(self.pbr) << 16 | u32::from(self.pc)
    }

    /// Advance the program counter. In emulation mode each advance that
    /// crosses a page boundary costs one extra cycle.
    pub(crate) fn increment_pc(&mut self, amount: u16) {
        let next = self.pc.wrapping_add(amount);
        if self.emulation_mode && next & 0xFF00 != self.pc & 0xFF00 {
            self.cycles += 1;
        }
        self.pc = next;
    }

    pub(crate) fn add_cycles(&mut self, amount: u32) {
        self.cycles += amount;
    }

    // Stack. In emulation mode the pointer lives in page 1 and only its low
    // byte moves; in native mode it is a full 16-bit bank-0 address.

    pub(crate) fn push_byte(&mut self, mapper: &mut Mapper, value: u8) -> Result<(), CpuError> {
        mapper.write(u32::from(self.stack_address()), value)?;
        self.sp = if self.emulation_mode {
            0x0100 | u16::from((self.sp as u8).wrapping_sub(1))
        } else {
            self.sp.wrapping_sub(1)
        };
        Ok(())
    }

    pub(crate) fn pull_byte(&mut self, mapper: &mut Mapper) -> Result<u8, CpuError> {
        self.sp = if self.emulation_mode {
            0x0100 | u16::from((self.sp as u8).wrapping_add(1))
        } else {
            self.sp.wrapping_add(1)
        };
        Ok(mapper.read(u32::from(self.stack_address()))?)
    }

    pub(crate) fn push_word(&mut self, mapper: &mut Mapper, value: u16) -> Result<(), CpuError> {
        self.push_byte(mapper, (value >> 8) as u8)?;
        self.push_byte(mapper, value as u8)
    }

    pub(crate) fn pull_word(&mut self, mapper: &mut Mapper) -> Result<u16, CpuError> {
        let low = self.pull_byte(mapper)?;
        let high = self.pull_byte(mapper)?;
        Ok(u16::from(low) | u16::from(high) << 8)
    }

    fn stack_address(&self) -> u16 {
        if self.emulation_mode {
            0x0100 | (self.sp & 0x00FF)
        } else {
            self.sp
        }
    }

    // Flag helpers.

    pub(crate) fn set_flag(&mut self, flag: StatusFlags, value: bool) {
        self.p.set(flag, value);
    }

    pub(crate) fn flag(&self, flag: StatusFlags) -> bool {
        self.p.contains(flag)
    }

    pub(crate) fn set_nz_8(&mut self, value: u8) {
        self.p.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
        self.p.set(StatusFlags::ZERO, value == 0);
    }

    pub(crate) fn set_nz_16(&mut self, value: u16) {
        self.p.set(StatusFlags::NEGATIVE, value & 0x8000 != 0);
        self.p.set(StatusFlags::ZERO, value == 0);
    }

    /// Apply a full status-register image, then re-apply the mode forcing
    /// rules: emulation mode pins `m` and `x` set; entering 8-bit index
    /// width truncates both index registers to their low bytes.
    pub(crate) fn load_status(&mut self, value: u8) {
        self.p = StatusFlags::from_bits_retain(value);
        self.enforce_mode_constraints();
    }

    pub(crate) fn enforce_mode_constraints(&mut self) {
        if self.emulation_mode {
            self.p
                .insert(StatusFlags::MEMORY_WIDTH | StatusFlags::INDEX_WIDTH);
            self.sp = 0x0100 | (self.sp & 0x00FF);
        }
        if self.p.contains(StatusFlags::INDEX_WIDTH) {
            self.x &= 0x00FF;
            self.y &= 0x00FF;
        }
    }
}

fn render_trace(record: &TraceRecord) -> String {
    let operand = match record.mode {
        AddressingMode::Implied
        | AddressingMode::Accumulator
        | AddressingMode::StackPush
        | AddressingMode::StackPull => String::new(),
        AddressingMode::Immediate | AddressingMode::StackInterrupt => {
            if record.operand_bytes == 2 {
                format!(" #${:04X}", record.operand)
            } else {
                format!(" #${:02X}", record.operand)
            }
        }
        AddressingMode::Absolute => format!(" ${:04X}", record.operand),
        AddressingMode::DirectPage => format!(" ${:02X}", record.operand),
        AddressingMode::DirectPageX => format!(" ${:02X},X", record.operand),
        AddressingMode::DirectPageY => format!(" ${:02X},Y", record.operand),
        AddressingMode::DirectPageIndirectLongY => format!(" [${:02X}],Y", record.operand),
        AddressingMode::PcRelative => {
            let target = record
                .pc
                .wrapping_add(2)
                .wrapping_add(record.operand as u8 as i8 as u16);
            format!(" ${target:04X}")
        }
    };
    format!(
        "{:02X}:{:04X} {}{}",
        record.pbr, record.pc, record.mnemonic, operand
    )
}


#[cfg(test)]
#[path = "addressing_tests.rs"]
mod addressing_tests;
