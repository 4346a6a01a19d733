use log::info;

use crate::consts;
use crate::error::{InitError, MachineError};

/// Flat 4K address space. The font lives at 0x000 and programs load at 0x200.
#[derive(Debug)]
pub struct Ram {
    buffer: [u8; consts::RAM_BYTES],
}

impl Default for Ram {
    fn default() -> Self {
        Ram {
            buffer: [0; consts::RAM_BYTES],
        }
    }
}

impl Ram {
    /// Zeroes the store, installs the font and copies `rom` to 0x200.
    pub fn init(&mut self, rom: &[u8]) -> Result<(), InitError> {
        if rom.len() > consts::MAX_ROM_BYTES {
            return Err(InitError::too_large(rom.len()));
        }
        self.buffer = [0; consts::RAM_BYTES];
        self.buffer[0..consts::FONT_SET_SIZE].copy_from_slice(&consts::FONT_SET);
        self.buffer[consts::PROG_OFFSET..consts::PROG_OFFSET + rom.len()].copy_from_slice(rom);
        info!("loaded {} program bytes at {:#05x}", rom.len(), consts::PROG_OFFSET);
        Ok(())
    }

    pub fn read(&self, addr: usize) -> Result<u8, MachineError> {
        self.buffer
            .get(addr)
            .copied()
            .ok_or(MachineError::MemoryOutOfRange { address: addr })
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), MachineError> {
        let cell = self
            .buffer
            .get_mut(addr)
            .ok_or(MachineError::MemoryOutOfRange { address: addr })?;
        *cell = value;
        Ok(())
    }

    /// Big-endian word at `addr`, `addr + 1`.
    pub fn read_word(&self, addr: usize) -> Result<u16, MachineError> {
        let hi = self.read(addr)? as u16;
        let lo = self.read(addr + 1)? as u16;
        Ok((hi << 8) | lo)
    }

    /// Checked view of `len` bytes starting at `addr`. Fails as a whole when
    /// any byte of the range lies outside the store.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], MachineError> {
        let end = Self::range_end(addr, len)?;
        Ok(&self.buffer[addr..end])
    }

    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8], MachineError> {
        let end = Self::range_end(addr, len)?;
        Ok(&mut self.buffer[addr..end])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    fn range_end(addr: usize, len: usize) -> Result<usize, MachineError> {
        let end = addr + len;
        if end > consts::RAM_BYTES {
            let address = addr.max(consts::RAM_BYTES);
            return Err(MachineError::MemoryOutOfRange { address });
        }
        Ok(end)
    }
}
