use super::*;
use crate::cartridge::{Cartridge, MapMode};
use crate::peripherals::PeripheralRegisters;

/// ROM image large enough for both header windows, filled so every offset
/// carries a recognizable byte.
fn patterned_rom(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i / 0x1000) as u8 ^ (i as u8)).collect()
}

fn lorom_mapper(sram_size: usize) -> Mapper {
    let cart = Cartridge::new(MapMode::LoRom, patterned_rom(0x40_0000), sram_size).unwrap();
    Mapper::new(cart, Peripherals::default())
}

fn hirom_mapper() -> Mapper {
    let cart = Cartridge::new(MapMode::HiRom, patterned_rom(0x40_0000), 0x20000).unwrap();
    Mapper::new(cart, Peripherals::default())
}

#[test]
fn lorom_translation_first_pages() {
    let mapper = lorom_mapper(0);
    assert_eq!(mapper.rom_position(0x00, 0x8000).unwrap(), 0);
    assert_eq!(mapper.rom_position(0x01, 0x8000).unwrap(), 0x8000);
    // Mirror banks in the upper half translate identically.
    assert_eq!(mapper.rom_position(0x80, 0x8000).unwrap(), 0);
    // Dedicated ROM banks use the full offset range, folded to 32 KiB pages.
    assert_eq!(
        mapper.rom_position(0x40, 0x0000).unwrap(),
        0x40 * 0x8000usize
    );
}

#[test]
fn lorom_upper_rom_read_matches_rom_bytes() {
    let mut mapper = lorom_mapper(0);
    let expected = mapper.cartridge().rom()[0x8000];
    assert_eq!(mapper.read(0x01_8000).unwrap(), expected);
}

#[test]
fn lorom_sram_window_origin_is_save_ram_offset_zero() {
    let mut mapper = lorom_mapper(0x10000);
    mapper.write(0x70_0000, 0x5A).unwrap();
    assert_eq!(mapper.read(0x70_0000).unwrap(), 0x5A);
    // Second SRAM bank sits one 32 KiB page up.
    mapper.write(0x71_0000, 0xA5).unwrap();
    assert_eq!(mapper.read(0x71_0000).unwrap(), 0xA5);
    assert_ne!(mapper.read(0x70_0000).unwrap(), 0xA5);
}

#[test]
fn hirom_primary_region_starts_at_rom_offset_zero() {
    let mapper = hirom_mapper();
    assert_eq!(mapper.rom_position(0xC0, 0x0000).unwrap(), 0);
    assert_eq!(mapper.rom_position(0xC1, 0x1234).unwrap(), 0x11234);
}

#[test]
fn hirom_first_mirror_aliases_the_primary_region() {
    let mut mapper = hirom_mapper();
    // Bank 0x00 offset 0x8000 translates to ROM offset 0, same as 0xC0:0000.
    let mirror = mapper.read(0x00_8000).unwrap();
    let primary = mapper.read(0xC0_0000).unwrap();
    assert_eq!(mirror, primary);
}

#[test]
fn hirom_mirrors_are_not_contiguous() {
    let mapper = hirom_mapper();
    // Last byte of the first mirror and first byte of the second mirror do
    // not join up: the second mirror re-biases its bank by -0x40.
    assert_eq!(
        mapper.rom_position(0x3F, 0xFFFF).unwrap(),
        0x3F * 0x8000usize + 0x7FFF
    );
    assert_eq!(mapper.rom_position(0x40, 0x0000).unwrap(), 0);
}

#[test]
fn hirom_sram_window_lives_in_system_banks() {
    let mut mapper = hirom_mapper();
    mapper.write(0x30_6000, 0x42).unwrap();
    assert_eq!(mapper.read(0x30_6000).unwrap(), 0x42);
    // 8 KiB stride per bank.
    mapper.write(0x31_6000, 0x24).unwrap();
    assert_eq!(mapper.read(0x31_6000).unwrap(), 0x24);
    assert_eq!(mapper.read(0x30_6000).unwrap(), 0x42);
}

#[test]
fn exhirom_faults_distinguishably_on_first_access() {
    let cart = Cartridge::new(MapMode::ExHiRom, patterned_rom(0x42_0000), 0).unwrap();
    let mut mapper = Mapper::new(cart, Peripherals::default());
    assert!(matches!(
        mapper.read(0xC0_0000),
        Err(MemoryError::UnsupportedMapMode {
            mode: MapMode::ExHiRom,
            ..
        })
    ));
}

#[test]
fn range_violations_identify_bank_and_offset() {
    let mut mapper = lorom_mapper(0);
    assert_eq!(
        mapper.read(0x100_0000),
        Err(MemoryError::BankOutOfRange {
            bank: 0x100,
            offset: 0x0000
        })
    );
    assert_eq!(
        region::check(0x00, 0x10000),
        Err(MemoryError::OffsetOutOfRange {
            bank: 0x00,
            offset: 0x10000
        })
    );
}

#[test]
fn ram_banks_are_linear_and_mirror_low_ram() {
    let mut mapper = lorom_mapper(0);
    mapper.write(0x7E_0010, 0x11).unwrap();
    // Low RAM in any system bank aliases the first 8 KiB of bank 0x7E.
    assert_eq!(mapper.read(0x00_0010).unwrap(), 0x11);
    assert_eq!(mapper.read(0x80_0010).unwrap(), 0x11);

    mapper.write(0x7F_0000, 0x77).unwrap();
    assert_eq!(mapper.read(0x7F_0000).unwrap(), 0x77);
    assert_ne!(mapper.read(0x7E_0000).unwrap(), 0x77);
}

#[test]
fn expansion_without_sram_window_is_unmapped() {
    let mut mapper = lorom_mapper(0x8000);
    // LoROM has no save RAM at 0x00:6000.
    assert_eq!(
        mapper.read(0x00_6000),
        Err(MemoryError::Unmapped {
            bank: 0x00,
            offset: 0x6000
        })
    );
}

#[test]
fn rom_is_not_writable() {
    let mut mapper = lorom_mapper(0);
    assert_eq!(
        mapper.write(0x00_8000, 0xFF),
        Err(MemoryError::RomWrite {
            bank: 0x00,
            offset: 0x8000
        })
    );
    assert_eq!(
        mapper.write(0x40_0000, 0xFF),
        Err(MemoryError::RomWrite {
            bank: 0x40,
            offset: 0x0000
        })
    );
}

#[test]
fn internal_register_legality_is_enforced_through_the_bus() {
    let mut mapper = lorom_mapper(0);
    mapper.write(0x00_4200, 0x81).unwrap();
    assert!(matches!(
        mapper.read(0x00_4200),
        Err(MemoryError::RegisterNotReadable { name: "NMITIMEN", .. })
    ));
    mapper.cpu_registers().set(0x4210, 0xC2);
    assert_eq!(mapper.read(0x00_4210).unwrap(), 0xC2);
    assert!(matches!(
        mapper.write(0x00_4210, 0x00),
        Err(MemoryError::RegisterNotWritable { name: "RDNMI", .. })
    ));
}

#[test]
fn wram_port_autoincrements_through_the_latched_address() {
    let mut mapper = lorom_mapper(0);
    mapper.write(0x7E_0100, 0xAA).unwrap();
    mapper.write(0x7E_0101, 0xBB).unwrap();

    mapper.write(0x00_2181, 0x00).unwrap();
    mapper.write(0x00_2182, 0x01).unwrap();
    mapper.write(0x00_2183, 0x00).unwrap();
    assert_eq!(mapper.read(0x00_2180).unwrap(), 0xAA);
    assert_eq!(mapper.read(0x00_2180).unwrap(), 0xBB);

    // Address registers are write-only.
    assert!(matches!(
        mapper.read(0x00_2181),
        Err(MemoryError::RegisterNotReadable { .. })
    ));
}

struct CountingPeripheral {
    reads: u32,
    last_write: Option<(u16, u8)>,
}

impl PeripheralRegisters for CountingPeripheral {
    fn read(&mut self, _offset: u16) -> u8 {
        self.reads += 1;
        0x7F
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.last_write = Some((offset, value));
    }
}

#[test]
fn peripheral_facades_are_substitutable_through_the_trait() {
    let ppu = std::sync::Arc::new(std::sync::Mutex::new(CountingPeripheral {
        reads: 0,
        last_write: None,
    }));
    let peripherals = Peripherals {
        ppu: ppu.clone(),
        ..Peripherals::default()
    };
    let cart = Cartridge::new(MapMode::LoRom, patterned_rom(0x40_0000), 0).unwrap();
    let mut mapper = Mapper::new(cart, peripherals);

    assert_eq!(mapper.read(0x00_2100).unwrap(), 0x7F);
    mapper.write(0x00_2105, 0x09).unwrap();

    let fake = ppu.lock().unwrap();
    assert_eq!(fake.reads, 1);
    assert_eq!(fake.last_write, Some((0x2105, 0x09)));
}

#[test]
fn word_access_is_little_endian() {
    let mut mapper = lorom_mapper(0);
    mapper.write_word(0x7E_2000, 0x1234).unwrap();
    assert_eq!(mapper.read(0x7E_2000).unwrap(), 0x34);
    assert_eq!(mapper.read(0x7E_2001).unwrap(), 0x12);
    assert_eq!(mapper.read_word(0x7E_2000).unwrap(), 0x1234);
}
