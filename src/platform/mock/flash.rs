//! Mock flash implementation for testing
//!
//! Provides in-memory flash simulation for unit tests.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use std::vec::Vec;

/// Mock flash implementation
///
/// Simulates a flash device in memory for testing. Supports:
/// - Init/read/write/erase/finalize with cursor-advancing read/write
/// - An arbitrary base address, so a device can model the STM32 internal
///   flash window as well as a zero-based SPI flash
/// - Failure injection for every operation kind
/// - Operation recording (erase ranges, read/write counts) for test assertions
/// - Corruption injection for checksum tests
///
/// Reads are serviced even before `init`, matching a memory-mapped device; the
/// firmware stager relies on this for its staging-flag probe.
#[derive(Debug)]
pub struct MockFlash {
    base: u32,
    /// Backing storage (0xFF = erased state)
    storage: Vec<u8>,
    initialized: bool,
    init_count: u32,
    finalize_count: u32,
    read_count: u32,
    write_count: u32,
    erase_ops: Vec<(u32, u32)>,
    fail_next_init: bool,
    fail_next_read: bool,
    fail_read_after: Option<u32>,
    fail_next_write: bool,
    fail_next_erase: bool,
}

impl MockFlash {
    /// Create a mock flash covering `[base, base + capacity)`, fully erased
    pub fn new(base: u32, capacity: u32) -> Self {
        Self {
            base,
            storage: vec![0xFF; capacity as usize],
            initialized: false,
            init_count: 0,
            finalize_count: 0,
            read_count: 0,
            write_count: 0,
            erase_ops: Vec::new(),
            fail_next_init: false,
            fail_next_read: false,
            fail_read_after: None,
            fail_next_write: false,
            fail_next_erase: false,
        }
    }

    /// Get flash contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> Vec<u8> {
        let off = (address - self.base) as usize;
        self.storage[off..off + len].to_vec()
    }

    /// Program bytes directly, bypassing the erase-before-write rule
    ///
    /// Test setup helper for seeding staged images, checksums and flag bytes.
    pub fn program(&mut self, address: u32, data: &[u8]) {
        let off = (address - self.base) as usize;
        self.storage[off..off + data.len()].copy_from_slice(data);
    }

    /// Inject corruption at address (for testing checksum verification)
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        let off = (address - self.base) as usize;
        for b in &mut self.storage[off..off + len] {
            *b = 0xAA; // Corrupt pattern
        }
    }

    /// Make the next `init` call fail
    pub fn fail_next_init(&mut self) {
        self.fail_next_init = true;
    }

    /// Make the next `read` call fail
    pub fn fail_next_read(&mut self) {
        self.fail_next_read = true;
    }

    /// Make the read following `count` successful reads fail
    ///
    /// Lets a test target a specific read in a longer sequence (e.g. the first
    /// copy-phase chunk after the probe and checksum reads).
    pub fn fail_read_after(&mut self, count: u32) {
        self.fail_read_after = Some(count);
    }

    /// Make the next `write` call fail
    pub fn fail_next_write(&mut self) {
        self.fail_next_write = true;
    }

    /// Make the next `erase` call fail
    pub fn fail_next_erase(&mut self) {
        self.fail_next_erase = true;
    }

    /// Recorded erase ranges, in call order
    pub fn erase_ops(&self) -> &[(u32, u32)] {
        &self.erase_ops
    }

    /// Whether any recorded erase covered `address`
    pub fn was_erased(&self, address: u32) -> bool {
        self.erase_ops
            .iter()
            .any(|&(start, end)| (start..=end).contains(&address))
    }

    /// Number of successful reads
    pub fn read_count(&self) -> u32 {
        self.read_count
    }

    /// Number of successful writes
    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    /// Number of `init` calls that succeeded
    pub fn init_count(&self) -> u32 {
        self.init_count
    }

    /// Number of `finalize` calls
    pub fn finalize_count(&self) -> u32 {
        self.finalize_count
    }

    /// Translate a device address to a storage offset, bounds-checked
    fn offset(&self, address: u32, len: usize) -> Result<usize> {
        let end = self.base as usize + self.storage.len();
        let addr = address as usize;
        if addr < self.base as usize || addr + len > end {
            return Err(FlashError::InvalidAddress.into());
        }
        Ok(addr - self.base as usize)
    }
}

impl FlashInterface for MockFlash {
    fn init(&mut self) -> Result<()> {
        if self.fail_next_init {
            self.fail_next_init = false;
            return Err(FlashError::InitFailed.into());
        }
        self.initialized = true;
        self.init_count += 1;
        Ok(())
    }

    fn erase(&mut self, start: u32, end: u32) -> Result<()> {
        if !self.initialized {
            return Err(FlashError::EraseFailed.into());
        }
        if self.fail_next_erase {
            self.fail_next_erase = false;
            return Err(FlashError::EraseFailed.into());
        }
        if end < start {
            return Err(FlashError::InvalidAddress.into());
        }
        let len = (end - start) as usize + 1;
        let off = self.offset(start, len)?;
        for b in &mut self.storage[off..off + len] {
            *b = 0xFF;
        }
        self.erase_ops.push((start, end));
        Ok(())
    }

    fn read(&mut self, address: &mut u32, buf: &mut [u8]) -> Result<()> {
        // Reads work without init (memory-mapped device model)
        if self.fail_next_read {
            self.fail_next_read = false;
            return Err(FlashError::ReadFailed.into());
        }
        if self.fail_read_after == Some(self.read_count) {
            self.fail_read_after = None;
            return Err(FlashError::ReadFailed.into());
        }
        let off = self.offset(*address, buf.len())?;
        buf.copy_from_slice(&self.storage[off..off + buf.len()]);
        *address += buf.len() as u32;
        self.read_count += 1;
        Ok(())
    }

    fn write(&mut self, address: &mut u32, data: &[u8]) -> Result<()> {
        if !self.initialized {
            return Err(FlashError::WriteFailed.into());
        }
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(FlashError::WriteFailed.into());
        }
        let off = self.offset(*address, data.len())?;
        // Flash can only change bits from 1 to 0
        for (b, d) in self.storage[off..off + data.len()].iter_mut().zip(data) {
            *b &= d;
        }
        *address += data.len() as u32;
        self.write_count += 1;
        Ok(())
    }

    fn finalize(&mut self) {
        self.initialized = false;
        self.finalize_count += 1;
    }
}
