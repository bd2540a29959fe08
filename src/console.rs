//! Top-level machine: one CPU wired to one mapper.

use log::debug;

use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::memory::{Mapper, Peripherals};

pub struct Console {
    cpu: Cpu,
    mapper: Mapper,
}

impl Console {
    /// Builds the machine around a cartridge and a set of peripheral
    /// facades, starting execution at the emulation-mode reset vector.
    pub fn new(cartridge: Cartridge, peripherals: Peripherals) -> Self {
        let reset = cartridge.emulation_vectors().reset;
        debug!(
            "console up: {:?} mapping, reset vector {reset:#06X}",
            cartridge.mapping()
        );
        Console {
            cpu: Cpu::new(reset),
            mapper: Mapper::new(cartridge, peripherals),
        }
    }

    /// Executes one instruction and returns its cycle cost.
    pub fn step(&mut self) -> Result<u32, CpuError> {
        self.cpu.step(&mut self.mapper)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut Mapper {
        &mut self.mapper
    }
}
