//! Bank-aware memory mapper: the sole path between the CPU (or any external
//! collaborator) and the backing stores.
//!
//! Every access splits the 24-bit address into bank and offset, validates the
//! ranges, classifies the bank, and routes to ROM, work RAM, save RAM, the
//! internal CPU register block, or a peripheral register facade. ROM and save
//! RAM go through the mapping-mode-specific translation formulas.

pub mod region;

use std::sync::MutexGuard;

use crate::cartridge::{Cartridge, MapMode};
use crate::error::MemoryError;
use crate::peripherals::{PeripheralRegisters, SharedPeripheral};
use crate::registers::InternalRegisters;
use region::{BankClass, SystemRegion};

fn lock(peripheral: &SharedPeripheral) -> MutexGuard<'_, dyn PeripheralRegisters + 'static> {
    peripheral.lock().unwrap_or_else(|e| e.into_inner())
}

/// Work RAM: 128 KiB, linear across banks 0x7E-0x7F.
pub const WRAM_SIZE: usize = 0x20000;

/// Sequential WRAM access port at $2180-$2183. $2180 reads/writes the byte at
/// the latched 17-bit address and post-increments it; $2181-$2183 latch the
/// address and are write-only.
struct WramPort {
    address: u32,
}

impl WramPort {
    fn new() -> Self {
        Self { address: 0 }
    }

    fn advance(&mut self) {
        self.address = (self.address + 1) & 0x1FFFF;
    }
}

/// The peripheral facades the mapper routes system-bank register windows to.
pub struct Peripherals {
    pub ppu: SharedPeripheral,
    pub apu: SharedPeripheral,
    pub controller: SharedPeripheral,
    pub dma: SharedPeripheral,
}

impl Default for Peripherals {
    fn default() -> Self {
        use crate::peripherals::{shared, RegisterBlock};
        Self {
            ppu: shared(RegisterBlock::new()),
            apu: shared(RegisterBlock::new()),
            controller: shared(RegisterBlock::new()),
            dma: shared(RegisterBlock::new()),
        }
    }
}

pub struct Mapper {
    mapping: MapMode,
    cartridge: Cartridge,
    ram: Box<[u8]>,
    sram: Box<[u8]>,
    cpu_registers: InternalRegisters,
    wram_port: WramPort,
    peripherals: Peripherals,
}

impl Mapper {
    pub fn new(cartridge: Cartridge, peripherals: Peripherals) -> Self {
        let mapping = cartridge.mapping();
        let sram = vec![0u8; cartridge.sram_size()].into_boxed_slice();
        Self {
            mapping,
            cartridge,
            ram: vec![0u8; WRAM_SIZE].into_boxed_slice(),
            sram,
            cpu_registers: InternalRegisters::new(),
            wram_port: WramPort::new(),
            peripherals,
        }
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn cpu_registers(&mut self) -> &mut InternalRegisters {
        &mut self.cpu_registers
    }

    /// Reads one byte at a 24-bit address.
    pub fn read(&mut self, address: u32) -> Result<u8, MemoryError> {
        let bank = address >> 16;
        let offset = address & 0xFFFF;
        region::check(bank, offset)?;
        let (bank, offset) = (bank as u8, offset as u16);
        log::trace!("read {:#04X}:{:#06X}", bank, offset);

        match region::classify_bank(bank) {
            BankClass::System => self.system_read(bank, offset),
            BankClass::Rom => self.rom_bank_read(bank, offset),
            BankClass::Ram => Ok(self.ram[Self::ram_position(bank, offset)]),
        }
    }

    /// Writes one byte at a 24-bit address.
    pub fn write(&mut self, address: u32, value: u8) -> Result<(), MemoryError> {
        let bank = address >> 16;
        let offset = address & 0xFFFF;
        region::check(bank, offset)?;
        let (bank, offset) = (bank as u8, offset as u16);
        log::trace!("write {:#04X}:{:#06X} = {:#04X}", bank, offset, value);

        match region::classify_bank(bank) {
            BankClass::System => self.system_write(bank, offset, value),
            BankClass::Rom => self.rom_bank_write(bank, offset, value),
            BankClass::Ram => {
                self.ram[Self::ram_position(bank, offset)] = value;
                Ok(())
            }
        }
    }

    /// Little-endian word read.
    pub fn read_word(&mut self, address: u32) -> Result<u16, MemoryError> {
        let lo = self.read(address)?;
        let hi = self.read((address + 1) & 0xFF_FFFF)?;
        Ok(u16::from(lo) | (u16::from(hi) << 8))
    }

    /// Little-endian word write.
    pub fn write_word(&mut self, address: u32, value: u16) -> Result<(), MemoryError> {
        self.write(address, (value & 0xFF) as u8)?;
        self.write((address + 1) & 0xFF_FFFF, (value >> 8) as u8)
    }

    // Bank 0x7E mirrors low RAM below 0x2000; the rest is linear with bank
    // 0x7F offset by +0x10000.
    fn ram_position(bank: u8, offset: u16) -> usize {
        usize::from(bank - 0x7E) * 0x10000 + usize::from(offset)
    }

    fn system_read(&mut self, bank: u8, offset: u16) -> Result<u8, MemoryError> {
        let region = region::classify_system_offset(offset)
            .ok_or(MemoryError::Unmapped { bank, offset })?;
        match region {
            SystemRegion::LowRam => Ok(self.ram[usize::from(offset)]),
            SystemRegion::Ppu => Ok(lock(&self.peripherals.ppu).read(offset)),
            SystemRegion::Apu => Ok(lock(&self.peripherals.apu).read(offset)),
            SystemRegion::WramPort => self.wram_port_read(offset),
            SystemRegion::Controller => Ok(lock(&self.peripherals.controller).read(offset)),
            SystemRegion::CpuRegisters => self.cpu_registers.read(offset),
            SystemRegion::Dma => Ok(lock(&self.peripherals.dma).read(offset)),
            SystemRegion::Expansion => {
                let window = region::sram_window(self.mapping);
                if window.contains(bank, offset) {
                    self.sram_read(bank, offset)
                } else {
                    Err(MemoryError::Unmapped { bank, offset })
                }
            }
            SystemRegion::Rom => self.rom_read(bank, offset),
        }
    }

    fn system_write(&mut self, bank: u8, offset: u16, value: u8) -> Result<(), MemoryError> {
        let region = region::classify_system_offset(offset)
            .ok_or(MemoryError::Unmapped { bank, offset })?;
        match region {
            SystemRegion::LowRam => {
                self.ram[usize::from(offset)] = value;
                Ok(())
            }
            SystemRegion::Ppu => {
                lock(&self.peripherals.ppu).write(offset, value);
                Ok(())
            }
            SystemRegion::Apu => {
                lock(&self.peripherals.apu).write(offset, value);
                Ok(())
            }
            SystemRegion::WramPort => self.wram_port_write(offset, value),
            SystemRegion::Controller => {
                lock(&self.peripherals.controller).write(offset, value);
                Ok(())
            }
            SystemRegion::CpuRegisters => self.cpu_registers.write(offset, value),
            SystemRegion::Dma => {
                lock(&self.peripherals.dma).write(offset, value);
                Ok(())
            }
            SystemRegion::Expansion => {
                let window = region::sram_window(self.mapping);
                if window.contains(bank, offset) {
                    self.sram_write(bank, offset, value)
                } else {
                    Err(MemoryError::Unmapped { bank, offset })
                }
            }
            SystemRegion::Rom => Err(MemoryError::RomWrite { bank, offset }),
        }
    }

    fn rom_bank_read(&mut self, bank: u8, offset: u16) -> Result<u8, MemoryError> {
        let window = region::sram_window(self.mapping);
        if window.contains(bank, offset) {
            self.sram_read(bank, offset)
        } else {
            self.rom_read(bank, offset)
        }
    }

    fn rom_bank_write(&mut self, bank: u8, offset: u16, value: u8) -> Result<(), MemoryError> {
        let window = region::sram_window(self.mapping);
        if window.contains(bank, offset) {
            self.sram_write(bank, offset, value)
        } else {
            Err(MemoryError::RomWrite { bank, offset })
        }
    }

    fn rom_read(&self, bank: u8, offset: u16) -> Result<u8, MemoryError> {
        let position = self.rom_position(bank, offset)?;
        let rom = self.cartridge.rom();
        if rom.is_empty() {
            return Err(MemoryError::Unmapped { bank, offset });
        }
        // Undersized images mirror.
        Ok(rom[position % rom.len()])
    }

    /// Mapping-mode-specific ROM offset translation.
    pub fn rom_position(&self, bank: u8, offset: u16) -> Result<usize, MemoryError> {
        match self.mapping {
            MapMode::LoRom => Ok((u32::from(bank & 0x7F) * region::LOROM_PAGE
                + u32::from(offset & 0x7FFF)) as usize),
            MapMode::HiRom => {
                if region::in_hirom_region(bank, offset) {
                    let full = (u32::from(bank) << 16) | u32::from(offset);
                    Ok((full - 0xC0_0000) as usize)
                } else if region::in_first_hirom_mirror(bank, offset) {
                    Ok((u32::from(bank & 0x7F) * region::HIROM_MIRROR_PAGE
                        + u32::from(offset & 0x7FFF)) as usize)
                } else if region::in_second_hirom_mirror(bank, offset) {
                    // The second mirror sits 0x40 banks up; the gap between
                    // the two mirrors is real and must not be smoothed over.
                    Ok((u32::from((bank - 0x40) & 0x7F) * region::HIROM_MIRROR_PAGE
                        + u32::from(offset & 0x7FFF)) as usize)
                } else {
                    Err(MemoryError::Unmapped { bank, offset })
                }
            }
            MapMode::ExHiRom => Err(MemoryError::UnsupportedMapMode {
                mode: MapMode::ExHiRom,
                bank,
                offset,
            }),
        }
    }

    fn sram_position(&self, bank: u8, offset: u16) -> Result<usize, MemoryError> {
        if self.mapping == MapMode::ExHiRom {
            return Err(MemoryError::UnsupportedMapMode {
                mode: MapMode::ExHiRom,
                bank,
                offset,
            });
        }
        if self.sram.is_empty() {
            return Err(MemoryError::Unmapped { bank, offset });
        }
        let window = region::sram_window(self.mapping);
        Ok(window.translate(bank, offset) % self.sram.len())
    }

    fn sram_read(&self, bank: u8, offset: u16) -> Result<u8, MemoryError> {
        let position = self.sram_position(bank, offset)?;
        Ok(self.sram[position])
    }

    fn sram_write(&mut self, bank: u8, offset: u16, value: u8) -> Result<(), MemoryError> {
        let position = self.sram_position(bank, offset)?;
        self.sram[position] = value;
        Ok(())
    }

    fn wram_port_read(&mut self, offset: u16) -> Result<u8, MemoryError> {
        match offset {
            0x2180 => {
                let value = self.ram[self.wram_port.address as usize];
                self.wram_port.advance();
                Ok(value)
            }
            _ => Err(MemoryError::RegisterNotReadable {
                name: "WMADD",
                offset,
            }),
        }
    }

    fn wram_port_write(&mut self, offset: u16, value: u8) -> Result<(), MemoryError> {
        match offset {
            0x2180 => {
                self.ram[self.wram_port.address as usize] = value;
                self.wram_port.advance();
            }
            0x2181 => {
                self.wram_port.address = (self.wram_port.address & 0x1FF00) | u32::from(value);
            }
            0x2182 => {
                self.wram_port.address =
                    (self.wram_port.address & 0x100FF) | (u32::from(value) << 8);
            }
            0x2183 => {
                self.wram_port.address =
                    (self.wram_port.address & 0x0FFFF) | (u32::from(value & 0x01) << 16);
            }
            _ => return Err(MemoryError::InvalidRegister { offset }),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
