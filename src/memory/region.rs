//! Static description of the CPU-visible address-space geometry.
//!
//! Banks split into three classes covering 0x00-0xFF; system banks split
//! further by offset; save RAM and the HiROM mirror windows are keyed by the
//! cartridge mapping mode.

use crate::cartridge::MapMode;
use crate::error::MemoryError;

pub const BANK_MAX: u32 = 0xFF;
pub const OFFSET_MAX: u32 = 0xFFFF;

/// The three mutually exclusive bank classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankClass {
    System,
    Rom,
    Ram,
}

/// Offset sub-regions of a system bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemRegion {
    LowRam,
    Ppu,
    Apu,
    WramPort,
    Controller,
    CpuRegisters,
    Dma,
    Expansion,
    Rom,
}

/// Validates that a split address is inside the legal 8-bit bank and 16-bit
/// offset ranges. Violations are caller bugs and abort the session.
pub fn check(bank: u32, offset: u32) -> Result<(), MemoryError> {
    if bank > BANK_MAX {
        return Err(MemoryError::BankOutOfRange { bank, offset });
    }
    if offset > OFFSET_MAX {
        return Err(MemoryError::OffsetOutOfRange { bank, offset });
    }
    Ok(())
}

pub fn classify_bank(bank: u8) -> BankClass {
    match bank {
        0x00..=0x3F | 0x80..=0xBF => BankClass::System,
        0x7E..=0x7F => BankClass::Ram,
        0x40..=0x7D | 0xC0..=0xFF => BankClass::Rom,
    }
}

/// Sub-classifies an offset within a system bank. `None` means the offset is
/// unmapped (open bus on real hardware).
pub fn classify_system_offset(offset: u16) -> Option<SystemRegion> {
    match offset {
        0x0000..=0x1FFF => Some(SystemRegion::LowRam),
        0x2100..=0x213F => Some(SystemRegion::Ppu),
        0x2140..=0x217F => Some(SystemRegion::Apu),
        0x2180..=0x2183 => Some(SystemRegion::WramPort),
        0x4000..=0x41FF => Some(SystemRegion::Controller),
        0x4200..=0x42FF => Some(SystemRegion::CpuRegisters),
        0x4300..=0x43FF => Some(SystemRegion::Dma),
        0x6000..=0x7FFF => Some(SystemRegion::Expansion),
        0x8000..=0xFFFF => Some(SystemRegion::Rom),
        _ => None,
    }
}

/// Save-RAM window for one mapping mode: a bank range, an offset range, and
/// the per-bank page stride used to linearize the window.
#[derive(Debug, Clone, Copy)]
pub struct SramWindow {
    pub first_bank: u8,
    pub last_bank: u8,
    pub first_offset: u16,
    pub last_offset: u16,
    pub page_size: u32,
}

impl SramWindow {
    pub fn contains(&self, bank: u8, offset: u16) -> bool {
        (self.first_bank..=self.last_bank).contains(&bank)
            && (self.first_offset..=self.last_offset).contains(&offset)
    }

    /// Position of `(bank, offset)` in the linearized save RAM.
    pub fn translate(&self, bank: u8, offset: u16) -> usize {
        let page = u32::from(bank - self.first_bank) * self.page_size;
        (page + u32::from(offset - self.first_offset)) as usize
    }
}

pub fn sram_window(mode: MapMode) -> SramWindow {
    match mode {
        MapMode::LoRom => SramWindow {
            first_bank: 0x70,
            last_bank: 0x7D,
            first_offset: 0x0000,
            last_offset: 0x7FFF,
            page_size: 0x8000,
        },
        MapMode::HiRom => SramWindow {
            first_bank: 0x30,
            last_bank: 0x3F,
            first_offset: 0x6000,
            last_offset: 0x7FFF,
            page_size: 0x2000,
        },
        MapMode::ExHiRom => SramWindow {
            first_bank: 0x80,
            last_bank: 0xBF,
            first_offset: 0x6000,
            last_offset: 0x7FFF,
            page_size: 0x2000,
        },
    }
}

/// LoROM maps 32 KiB pages: one per bank, upper half of the offset space.
pub const LOROM_PAGE: u32 = 0x8000;

/// HiROM mirror windows also use 32 KiB pages.
pub const HIROM_MIRROR_PAGE: u32 = 0x8000;

/// Primary HiROM region: a direct 64 KiB-per-bank mapping.
pub fn in_hirom_region(bank: u8, _offset: u16) -> bool {
    bank >= 0xC0
}

/// First HiROM mirror: system banks 0x00-0x3F, upper offset half only.
pub fn in_first_hirom_mirror(bank: u8, offset: u16) -> bool {
    bank <= 0x3F && offset >= 0x8000
}

/// Second HiROM mirror: ROM banks 0x40-0x7D over the full offset range, and
/// system banks 0x80-0xBF over the upper half. Not contiguous with the first
/// mirror or with the primary region.
pub fn in_second_hirom_mirror(bank: u8, offset: u16) -> bool {
    matches!(bank, 0x40..=0x7D) || (matches!(bank, 0x80..=0xBF) && offset >= 0x8000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_classes_cover_the_whole_range() {
        for bank in 0x00..=0xFFu8 {
            let class = classify_bank(bank);
            match bank {
                0x00..=0x3F | 0x80..=0xBF => assert_eq!(class, BankClass::System),
                0x7E | 0x7F => assert_eq!(class, BankClass::Ram),
                _ => assert_eq!(class, BankClass::Rom),
            }
        }
    }

    #[test]
    fn range_check_rejects_wide_values() {
        assert_eq!(
            check(0x100, 0x0000),
            Err(MemoryError::BankOutOfRange {
                bank: 0x100,
                offset: 0x0000
            })
        );
        assert_eq!(
            check(0x00, 0x10000),
            Err(MemoryError::OffsetOutOfRange {
                bank: 0x00,
                offset: 0x10000
            })
        );
        assert_eq!(check(0xFF, 0xFFFF), Ok(()));
    }

    #[test]
    fn system_offsets_classify_per_region_table() {
        assert_eq!(classify_system_offset(0x0000), Some(SystemRegion::LowRam));
        assert_eq!(classify_system_offset(0x1FFF), Some(SystemRegion::LowRam));
        assert_eq!(classify_system_offset(0x2100), Some(SystemRegion::Ppu));
        assert_eq!(classify_system_offset(0x2140), Some(SystemRegion::Apu));
        assert_eq!(classify_system_offset(0x2180), Some(SystemRegion::WramPort));
        assert_eq!(
            classify_system_offset(0x4016),
            Some(SystemRegion::Controller)
        );
        assert_eq!(
            classify_system_offset(0x4210),
            Some(SystemRegion::CpuRegisters)
        );
        assert_eq!(classify_system_offset(0x4300), Some(SystemRegion::Dma));
        assert_eq!(classify_system_offset(0x6000), Some(SystemRegion::Expansion));
        assert_eq!(classify_system_offset(0x8000), Some(SystemRegion::Rom));
        // Gaps stay unmapped.
        assert_eq!(classify_system_offset(0x2000), None);
        assert_eq!(classify_system_offset(0x5000), None);
    }

    #[test]
    fn sram_windows_do_not_overlap_rom_mirrors_within_a_mode() {
        let w = sram_window(MapMode::HiRom);
        assert!(w.contains(0x30, 0x6000));
        assert!(!w.contains(0x30, 0x8000));
        assert_eq!(w.translate(0x30, 0x6000), 0);
        assert_eq!(w.translate(0x31, 0x6000), 0x2000);

        let w = sram_window(MapMode::LoRom);
        assert!(w.contains(0x70, 0x0000));
        assert!(!w.contains(0x6F, 0x0000));
        assert_eq!(w.translate(0x70, 0x0000), 0);
        assert_eq!(w.translate(0x71, 0x0000), 0x8000);
    }

    #[test]
    fn hirom_mirrors_are_disjoint_from_the_primary_region() {
        assert!(in_hirom_region(0xC0, 0x0000));
        assert!(!in_hirom_region(0xBF, 0xFFFF));
        assert!(in_first_hirom_mirror(0x00, 0x8000));
        assert!(!in_first_hirom_mirror(0x00, 0x7FFF));
        assert!(in_second_hirom_mirror(0x40, 0x0000));
        assert!(in_second_hirom_mirror(0x80, 0x8000));
        assert!(!in_second_hirom_mirror(0x80, 0x7FFF));
    }
}
