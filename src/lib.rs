//! SNES machine core: a 65C816 CPU and the bank-aware memory fabric
//! around it.
//!
//! The crate models the CPU-visible side of the console. [`cpu::Cpu`] runs
//! the instruction set with dual-width registers and emulation-mode quirks;
//! [`memory::Mapper`] routes 24-bit addresses across ROM, WRAM, save RAM,
//! internal registers, and peripheral register windows according to the
//! cartridge's LoROM or HiROM layout. [`console::Console`] wires the two
//! together and boots from the cartridge's reset vector.
//!
//! Peripherals (PPU, APU, controllers, DMA) are register facades behind a
//! trait; this crate does not implement their behavior.

pub mod cartridge;
pub mod console;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod peripherals;
pub mod registers;

pub use cartridge::{Cartridge, MapMode};
pub use console::Console;
pub use cpu::{Cpu, StatusFlags};
pub use error::{CartridgeError, CpuError, MemoryError};
pub use memory::{Mapper, Peripherals};
pub use peripherals::{shared, FrameSlot, PeripheralRegisters, RegisterBlock, SharedPeripheral};
pub use registers::{InternalRegisters, RegisterAccess};
