//! Capability interfaces for the peripheral register blocks the mapper
//! routes into (PPU, APU, controller I/O, DMA), plus the one-slot frame
//! hand-off between the pixel pipeline and a display consumer.
//!
//! The core treats peripheral registers as opaque bytes; each facade sits
//! behind its own mutex so a register access is atomic with respect to the
//! peripheral's own stepping. Tests substitute in-memory fakes through the
//! same trait.

use std::sync::{Arc, Mutex};

/// A peripheral's register window as seen from the system bus.
pub trait PeripheralRegisters: Send {
    fn read(&mut self, offset: u16) -> u8;
    fn write(&mut self, offset: u16, value: u8);
}

pub type SharedPeripheral = Arc<Mutex<dyn PeripheralRegisters>>;

pub fn shared<P: PeripheralRegisters + 'static>(peripheral: P) -> SharedPeripheral {
    Arc::new(Mutex::new(peripheral))
}

/// Default facade: a flat byte array keyed by the low 8 bits of the offset.
/// Also serves as the in-memory fake for tests.
pub struct RegisterBlock {
    bytes: [u8; 0x100],
}

impl Default for RegisterBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBlock {
    pub fn new() -> Self {
        Self { bytes: [0; 0x100] }
    }
}

impl PeripheralRegisters for RegisterBlock {
    fn read(&mut self, offset: u16) -> u8 {
        self.bytes[(offset & 0xFF) as usize]
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.bytes[(offset & 0xFF) as usize] = value;
    }
}

/// One-slot frame hand-off: the producer overwrites any unread frame, the
/// consumer pops without blocking. Dropping an unread frame is acceptable;
/// blocking either side is not.
pub struct FrameSlot<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    pub fn publish(&self, frame: T) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(frame);
    }

    pub fn take(&self) -> Option<T> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_block_round_trips_by_low_offset_byte() {
        let mut block = RegisterBlock::new();
        block.write(0x2100, 0x8F);
        assert_eq!(block.read(0x2100), 0x8F);
        // Offsets alias on the low byte.
        assert_eq!(block.read(0x4100), 0x8F);
    }

    #[test]
    fn frame_slot_overwrites_and_pops_nonblocking() {
        let slot = FrameSlot::new();
        assert_eq!(slot.take(), None);
        slot.publish(1u32);
        slot.publish(2u32);
        assert_eq!(slot.take(), Some(2));
        assert_eq!(slot.take(), None);
    }
}
