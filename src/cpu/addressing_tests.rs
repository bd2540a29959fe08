use super::Cpu;
use crate::cartridge::{Cartridge, MapMode};
use crate::memory::{Mapper, Peripherals};

fn fixture(program: &[u8]) -> (Cpu, Mapper) {
    let mut rom = vec![0u8; 0x1_0000];
    rom[..program.len()].copy_from_slice(program);
    let vectors = MapMode::LoRom.header_base() + 36;
    rom[vectors + 24] = 0x00;
    rom[vectors + 25] = 0x80;
    let cartridge = Cartridge::new(MapMode::LoRom, rom, 0).unwrap();
    let cpu = Cpu::new(cartridge.emulation_vectors().reset);
    (cpu, Mapper::new(cartridge, Peripherals::default()))
}

#[test]
fn absolute_addresses_use_the_data_bank() {
    // LDA #$42 / STA $0010
    let (mut cpu, mut mapper) = fixture(&[0xA9, 0x42, 0x8D, 0x10, 0x00]);
    cpu.dbr = 0x7E;
    cpu.step(&mut mapper).unwrap();
    cpu.step(&mut mapper).unwrap();
    assert_eq!(mapper.read(0x7E_0010).unwrap(), 0x42);
    // Bank 0 low RAM mirrors the same WRAM bytes.
    assert_eq!(mapper.read(0x00_0010).unwrap(), 0x42);
}

#[test]
fn direct_page_is_relative_to_the_dp_register() {
    // LDA $10
    let (mut cpu, mut mapper) = fixture(&[0xA5, 0x10]);
    cpu.dp = 0x0300;
    mapper.write(0x00_0310, 0x77).unwrap();
    let cycles = cpu.step(&mut mapper).unwrap();
    assert_eq!(cpu.a & 0x00FF, 0x77);
    // Page-aligned direct page pays no penalty.
    assert_eq!(cycles, 3);
}

#[test]
fn misaligned_direct_page_costs_one_extra_cycle() {
    let (mut cpu, mut mapper) = fixture(&[0xA5, 0x10]);
    cpu.dp = 0x0301;
    mapper.write(0x00_0311, 0x77).unwrap();
    let cycles = cpu.step(&mut mapper).unwrap();
    assert_eq!(cpu.a & 0x00FF, 0x77);
    assert_eq!(cycles, 4);
}

#[test]
fn direct_page_wraps_within_bank_zero() {
    let (mut cpu, mut mapper) = fixture(&[0xA5, 0x20]);
    cpu.dp = 0xFFF0;
    mapper.write(0x00_0010, 0x55).unwrap();
    cpu.step(&mut mapper).unwrap();
    assert_eq!(cpu.a & 0x00FF, 0x55);
}

#[test]
fn direct_page_indexed_adds_x_after_the_base() {
    // LDX #$04 / LDA $10,X
    let (mut cpu, mut mapper) = fixture(&[0xA2, 0x04, 0xB5, 0x10]);
    mapper.write(0x00_0014, 0x66).unwrap();
    cpu.step(&mut mapper).unwrap();
    cpu.step(&mut mapper).unwrap();
    assert_eq!(cpu.a & 0x00FF, 0x66);
}

#[test]
fn indirect_long_indexed_reads_a_full_pointer() {
    // LDY #$05 / LDA [$20],Y with the pointer aimed at WRAM bank $7E.
    let (mut cpu, mut mapper) = fixture(&[0xA0, 0x05, 0xB7, 0x20]);
    mapper.write(0x00_0020, 0x00).unwrap();
    mapper.write(0x00_0021, 0x10).unwrap();
    mapper.write(0x00_0022, 0x7E).unwrap();
    mapper.write(0x7E_1005, 0x99).unwrap();
    cpu.step(&mut mapper).unwrap();
    cpu.step(&mut mapper).unwrap();
    assert_eq!(cpu.a & 0x00FF, 0x99);
}

#[test]
fn store_through_indirect_long_reaches_high_wram() {
    // LDA #$AB / LDY #$02 / STA [$40],Y
    let (mut cpu, mut mapper) = fixture(&[0xA9, 0xAB, 0xA0, 0x02, 0x97, 0x40]);
    mapper.write(0x00_0040, 0x00).unwrap();
    mapper.write(0x00_0041, 0x00).unwrap();
    mapper.write(0x00_0042, 0x7F).unwrap();
    for _ in 0..3 {
        cpu.step(&mut mapper).unwrap();
    }
    assert_eq!(mapper.read(0x7F_0002).unwrap(), 0xAB);
}

#[test]
fn pc_relative_targets_are_signed() {
    // BRA -2 loops back onto itself.
    let (mut cpu, mut mapper) = fixture(&[0x80, 0xFE]);
    cpu.step(&mut mapper).unwrap();
    assert_eq!(cpu.pc, 0x8000);
}
