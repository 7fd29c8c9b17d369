//! Flash interface trait
//!
//! This module defines the flash storage interface that platform implementations
//! must provide. The board uses two flash devices: the MCU-internal flash (which
//! also holds the staged radio firmware image) and the external SPI flash the
//! radio driver is copied into.

use crate::platform::Result;

/// Flash interface trait
///
/// Platform implementations must provide this interface for flash
/// init/read/write/erase/finalize operations.
///
/// # Flash Characteristics
///
/// - Erase operations set all bytes in the affected sectors to 0xFF
/// - Write operations can only change bits from 1 to 0 (erase first to reset)
/// - Operations are blocking and may take 100ms+
///
/// # Safety Invariants
///
/// - [`init`](FlashInterface::init) must succeed before erase/write are used
/// - Memory-mapped devices (the MCU-internal flash) must service reads at any
///   time; the firmware stager probes its staging flag before initializing
///   either device
/// - Only one owner per device handle (no concurrent access)
/// - [`finalize`](FlashInterface::finalize) releases driver-level locks and
///   must be paired with a successful or failed `init`
pub trait FlashInterface {
    /// Initialize the flash device
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::InitFailed)` if the device
    /// cannot be brought up.
    fn init(&mut self) -> Result<()>;

    /// Erase the address range `[start, end]` (inclusive)
    ///
    /// The device rounds the range outward to sector boundaries; erasing a
    /// single byte address erases the word or sector containing it.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::EraseFailed)` if the erase
    /// operation fails, `FlashError::InvalidAddress` if the range is out of
    /// bounds.
    fn erase(&mut self, start: u32, end: u32) -> Result<()>;

    /// Read `buf.len()` bytes starting at `*address`
    ///
    /// On success `*address` is advanced past the bytes read, so sequential
    /// chunked reads can share one cursor.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::ReadFailed)` if the read
    /// fails, `FlashError::InvalidAddress` if the range is out of bounds.
    /// The cursor is not advanced on failure.
    fn read(&mut self, address: &mut u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `*address`
    ///
    /// On success `*address` is advanced past the bytes written. The target
    /// range must have been erased beforehand.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash(FlashError::WriteFailed)` if the write
    /// fails, `FlashError::InvalidAddress` if the range is out of bounds.
    /// The cursor is not advanced on failure.
    fn write(&mut self, address: &mut u32, data: &[u8]) -> Result<()>;

    /// Release the device handle
    ///
    /// Best-effort; always safe to call, including after a failed `init`.
    fn finalize(&mut self);
}
