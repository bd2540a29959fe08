//! Internal CPU register block at $4200-$42FF.
//!
//! Registers are addressed by name through a fixed offset table, with
//! individual read/write legality: the $4200-$420D group is write-only, the
//! $4210-$421F group read-only. Touching a register against its legality, or
//! an offset with no register at all, is a fault.

use crate::error::MemoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    ReadOnly,
    WriteOnly,
}

#[derive(Debug, Clone, Copy)]
pub struct RegisterInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub access: RegisterAccess,
}

const fn write_only(name: &'static str, description: &'static str) -> RegisterInfo {
    RegisterInfo {
        name,
        description,
        access: RegisterAccess::WriteOnly,
    }
}

const fn read_only(name: &'static str, description: &'static str) -> RegisterInfo {
    RegisterInfo {
        name,
        description,
        access: RegisterAccess::ReadOnly,
    }
}

/// Offset -> register descriptor, for the offsets that exist.
pub fn register_info(offset: u16) -> Option<RegisterInfo> {
    let info = match offset {
        0x4200 => write_only("NMITIMEN", "Interrupt Enable Register (NMI/V-IRQ/H-IRQ)"),
        0x4201 => write_only("WRIO", "I/O Port Write Register"),
        0x4202 => write_only("WRMPYA", "Multiplicand A"),
        0x4203 => write_only("WRMPYB", "Multiplicand B (Start Multiply)"),
        0x4204 => write_only("WRDIVL", "Dividend Low Byte"),
        0x4205 => write_only("WRDIVH", "Dividend High Byte"),
        0x4206 => write_only("WRDIVB", "Divisor (Start Division)"),
        0x4207 => write_only("HTIMEL", "H-IRQ Timer Low Byte"),
        0x4208 => write_only("HTIMEH", "H-IRQ Timer High Byte"),
        0x4209 => write_only("VTIMEL", "V-IRQ Timer Low Byte"),
        0x420A => write_only("VTIMEH", "V-IRQ Timer High Byte"),
        0x420B => write_only("MDMAEN", "DMA Enable Register"),
        0x420C => write_only("HDMAEN", "HDMA Enable Register"),
        0x420D => write_only("MEMSEL", "ROM Speed (FastROM Enable)"),
        0x4210 => read_only("RDNMI", "NMI Occurred Flag"),
        0x4211 => read_only("TIMEUP", "IRQ Occurred Flag"),
        0x4212 => read_only("HVBJOY", "PPU Status Register (V/H Blank, Joypad Ready)"),
        0x4213 => read_only("RDIO", "I/O Port Read Register"),
        0x4214 => read_only("RDDIVL", "Division Result Low Byte"),
        0x4215 => read_only("RDDIVH", "Division Result High Byte"),
        0x4216 => read_only("RDMPYL", "Multiplication Result Low Byte"),
        0x4217 => read_only("RDMPYH", "Multiplication Result High Byte"),
        0x4218 => read_only("JOY1L", "Joypad 1 Low Byte"),
        0x4219 => read_only("JOY1H", "Joypad 1 High Byte"),
        0x421A => read_only("JOY2L", "Joypad 2 Low Byte"),
        0x421B => read_only("JOY2H", "Joypad 2 High Byte"),
        0x421C => read_only("JOY3L", "Joypad 3 Low Byte"),
        0x421D => read_only("JOY3H", "Joypad 3 High Byte"),
        0x421E => read_only("JOY4L", "Joypad 4 Low Byte"),
        0x421F => read_only("JOY4H", "Joypad 4 High Byte"),
        _ => return None,
    };
    Some(info)
}

/// Backing storage for the register block, one value slot per offset.
pub struct InternalRegisters {
    values: [u8; 0x100],
}

impl Default for InternalRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl InternalRegisters {
    pub fn new() -> Self {
        Self { values: [0; 0x100] }
    }

    pub fn read(&self, offset: u16) -> Result<u8, MemoryError> {
        let info = register_info(offset).ok_or(MemoryError::InvalidRegister { offset })?;
        if info.access == RegisterAccess::WriteOnly {
            return Err(MemoryError::RegisterNotReadable {
                name: info.name,
                offset,
            });
        }
        Ok(self.values[(offset & 0xFF) as usize])
    }

    pub fn write(&mut self, offset: u16, value: u8) -> Result<(), MemoryError> {
        let info = register_info(offset).ok_or(MemoryError::InvalidRegister { offset })?;
        if info.access == RegisterAccess::ReadOnly {
            return Err(MemoryError::RegisterNotWritable {
                name: info.name,
                offset,
            });
        }
        log::trace!("internal register write {} = {:#04X}", info.name, value);
        self.values[(offset & 0xFF) as usize] = value;
        Ok(())
    }

    /// Backdoor for peripherals and tests that model the hardware side of a
    /// read-only register (e.g. latching a division result).
    pub fn set(&mut self, offset: u16, value: u8) {
        self.values[(offset & 0xFF) as usize] = value;
    }
}
