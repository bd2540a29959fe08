//! Cartridge-side metadata consumed by the core.
//!
//! Header parsing proper lives outside this crate; what the core needs is the
//! mapping-mode tag, the raw ROM bytes, the declared SRAM size, and the
//! interrupt vector tables sitting in the fixed window near the end of the
//! first ROM bank.

use crate::error::CartridgeError;

/// Cartridge memory-layout convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    LoRom,
    HiRom,
    ExHiRom,
}

impl MapMode {
    /// ROM offset of the cartridge header for this layout.
    pub fn header_base(self) -> usize {
        match self {
            MapMode::LoRom => 0x7FC0,
            MapMode::HiRom => 0xFFC0,
            MapMode::ExHiRom => 0x40FFC0,
        }
    }
}

/// 65C816 native-mode interrupt vectors, bank 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeVectors {
    pub cop: u16,
    pub brk: u16,
    pub abort: u16,
    pub nmi: u16,
    pub irq: u16,
}

/// 6502 emulation-mode interrupt vectors, bank 0. The CPU always resets
/// through `reset` in emulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulationVectors {
    pub cop: u16,
    pub abort: u16,
    pub nmi: u16,
    pub reset: u16,
    pub irq_brk: u16,
}

#[derive(Debug)]
pub struct Cartridge {
    mapping: MapMode,
    rom: Vec<u8>,
    sram_size: usize,
    native_vectors: NativeVectors,
    emulation_vectors: EmulationVectors,
}

impl Cartridge {
    /// Wraps a raw ROM image, reading the interrupt vectors out of the
    /// header window for `mapping`.
    pub fn new(mapping: MapMode, rom: Vec<u8>, sram_size: usize) -> Result<Self, CartridgeError> {
        // Vector table sits 36 bytes into the header block.
        let base = mapping.header_base() + 36;
        if rom.len() < base + 28 {
            return Err(CartridgeError::RomTooSmall {
                mode: mapping,
                len: rom.len(),
                offset: base,
            });
        }

        let word = |at: usize| u16::from(rom[at]) | (u16::from(rom[at + 1]) << 8);

        let native_vectors = NativeVectors {
            cop: word(base),
            brk: word(base + 2),
            abort: word(base + 4),
            nmi: word(base + 6),
            irq: word(base + 10),
        };
        let emulation_vectors = EmulationVectors {
            cop: word(base + 16),
            abort: word(base + 20),
            nmi: word(base + 22),
            reset: word(base + 24),
            irq_brk: word(base + 26),
        };

        Ok(Self {
            mapping,
            rom,
            sram_size,
            native_vectors,
            emulation_vectors,
        })
    }

    pub fn mapping(&self) -> MapMode {
        self.mapping
    }

    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn sram_size(&self) -> usize {
        self.sram_size
    }

    pub fn native_vectors(&self) -> &NativeVectors {
        &self.native_vectors
    }

    pub fn emulation_vectors(&self) -> &EmulationVectors {
        &self.emulation_vectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom_with_vectors() -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        let base = MapMode::LoRom.header_base() + 36;
        // native BRK = 0xBEEF, emulation RESET = 0x8000
        rom[base + 2] = 0xEF;
        rom[base + 3] = 0xBE;
        rom[base + 24] = 0x00;
        rom[base + 25] = 0x80;
        rom
    }

    #[test]
    fn extracts_vectors_little_endian() {
        let cart = Cartridge::new(MapMode::LoRom, rom_with_vectors(), 0).unwrap();
        assert_eq!(cart.native_vectors().brk, 0xBEEF);
        assert_eq!(cart.emulation_vectors().reset, 0x8000);
    }

    #[test]
    fn rejects_rom_without_header_window() {
        let err = Cartridge::new(MapMode::LoRom, vec![0u8; 0x100], 0).unwrap_err();
        assert!(matches!(err, CartridgeError::RomTooSmall { .. }));
    }
}
