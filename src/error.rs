//! Structured error types for the CPU core and memory mapper.
//!
//! Every variant is fatal to the running emulation session: the mapper and
//! the execution engine never clamp, retry, or substitute default values.

use thiserror::Error;

use crate::cartridge::MapMode;

/// Faults raised while resolving a CPU-visible address to a backing store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("bank out of range for address {bank:#04X}:{offset:#06X}")]
    BankOutOfRange { bank: u32, offset: u32 },

    #[error("offset out of range for address {bank:#04X}:{offset:#06X}")]
    OffsetOutOfRange { bank: u32, offset: u32 },

    /// The address is inside the legal 24-bit range but no region claims it.
    #[error("unmapped address {bank:#04X}:{offset:#06X}")]
    Unmapped { bank: u8, offset: u16 },

    #[error("write into ROM at {bank:#04X}:{offset:#06X}")]
    RomWrite { bank: u8, offset: u16 },

    #[error("{mode:?} translation is not yet supported ({bank:#04X}:{offset:#06X})")]
    UnsupportedMapMode { mode: MapMode, bank: u8, offset: u16 },

    #[error("register {name} ({offset:#06X}) is write-only")]
    RegisterNotReadable { name: &'static str, offset: u16 },

    #[error("register {name} ({offset:#06X}) is read-only")]
    RegisterNotWritable { name: &'static str, offset: u16 },

    #[error("no internal CPU register at offset {offset:#06X}")]
    InvalidRegister { offset: u16 },
}

/// Faults raised by the fetch-execute engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The opcode byte has no descriptor in the table. A development-time
    /// gap, not a hardware exception; execution must not continue past it.
    #[error("opcode {opcode:#04X} not implemented at {pbr:#04X}:{pc:#06X}")]
    UnimplementedOpcode { opcode: u8, pbr: u8, pc: u16 },

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Faults raised while taking apart cartridge metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartridgeError {
    #[error("ROM image ({len} bytes) too small for the {mode:?} vector window at {offset:#08X}")]
    RomTooSmall {
        mode: MapMode,
        len: usize,
        offset: usize,
    },
}
