//! Radio firmware copy-and-verify procedure
//!
//! A linear, run-once-per-boot routine: probe the staging flag, copy the staged
//! image from internal flash to the SPI flash in 4 KB chunks through one scratch
//! buffer, read the destination back under a CRC-8 digest, compare against the
//! checksum byte stored at the end of the staging region, and erase the flag on
//! success. A checksum mismatch is fatal by design: an unverified radio image
//! must never be allowed to run, so the production entry point halts instead of
//! continuing the boot.

use crate::platform::traits::FlashInterface;
use crate::platform::PlatformError;
use core::fmt;
use crc::{Crc, CRC_8_MAXIM_DOW};

/// Scratch buffer / transfer chunk size in bytes
pub const CHUNK_SIZE: usize = 4096;

/// Hard ceiling on how much is ever copied in one run (256 KiB)
pub const MAX_IMAGE_LEN: u32 = 0x40000;

/// Flag byte value marking a staged image that still needs copying.
/// Anything else (in practice the erased value 0xFF) means the copy is done.
const STAGE_PENDING: u8 = 0x00;

/// CRC-8 with the Dallas/Maxim reflected table: per byte,
/// `acc = table[acc ^ byte]`, seeded at 0. Bit-identical to the checksum the
/// factory tooling stores with the image.
const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_MAXIM_DOW);

/// Flash layout of the staging scheme
///
/// All addresses are absolute device addresses: the flag and source fields
/// address the MCU-internal flash, the destination fields address the SPI
/// flash. The checksum byte occupies the last address of the source region,
/// `source_end`, regardless of the image length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StagingLayout {
    /// Address of the staging flag byte
    pub copy_flag_addr: u32,
    /// First address of the staged image
    pub source_base: u32,
    /// Last address of the staging region; holds the CRC-8 checksum byte
    pub source_end: u32,
    /// First address of the destination region
    pub dest_start: u32,
    /// Last address of the destination region
    pub dest_end: u32,
    /// Configured image length; clamped to [`MAX_IMAGE_LEN`] at run time
    pub image_len: u32,
}

impl StagingLayout {
    /// Production layout of the MiCOKit-3165
    pub const fn micokit_3165() -> Self {
        Self {
            copy_flag_addr: 0x0800_8000,
            source_base: 0x0804_0000,
            source_end: 0x0807_FFFF,
            dest_start: 0x0000_0000,
            dest_end: 0x0003_FFFF,
            image_len: MAX_IMAGE_LEN,
        }
    }

    /// Number of bytes actually copied and verified
    pub const fn total_length(&self) -> u32 {
        if self.image_len < MAX_IMAGE_LEN {
            self.image_len
        } else {
            MAX_IMAGE_LEN
        }
    }
}

/// Result of a staging run that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StageOutcome {
    /// Flag byte was not pending; nothing to do
    Skipped,
    /// Image copied, verified, and flag retired
    Completed,
}

/// Staging failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StageError {
    /// A flash driver call failed; the run was aborted and both devices
    /// finalized. Recoverable: the flag stays pending and the next boot
    /// retries.
    Flash(PlatformError),
    /// The destination read back with the wrong checksum. Fatal: the flag is
    /// left pending, the devices are left open, and the production entry point
    /// halts the processor.
    ChecksumMismatch { stored: u8, computed: u8 },
}

impl From<PlatformError> for StageError {
    fn from(e: PlatformError) -> Self {
        StageError::Flash(e)
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageError::Flash(e) => write!(f, "staging aborted: {}", e),
            StageError::ChecksumMismatch { stored, computed } => write!(
                f,
                "check-sum error: stored {:#04x}, computed {:#04x}",
                stored, computed
            ),
        }
    }
}

/// The copy-and-verify procedure plus its scratch buffer
///
/// The scratch buffer is owned here for the whole run and reused for every
/// copy and verify chunk; nothing else executes while the stager runs (no-OS
/// bootloader context), so exclusive ownership is structural.
pub struct FirmwareStager {
    layout: StagingLayout,
    scratch: [u8; CHUNK_SIZE],
}

impl FirmwareStager {
    /// Create a stager for the given layout
    pub const fn new(layout: StagingLayout) -> Self {
        Self {
            layout,
            scratch: [0; CHUNK_SIZE],
        }
    }

    /// The layout this stager operates on
    pub fn layout(&self) -> &StagingLayout {
        &self.layout
    }

    /// Run the staging procedure
    ///
    /// `internal` is the MCU-internal flash holding the flag byte and the
    /// staged image; `driver` is the SPI flash the image is copied into.
    ///
    /// The common case after the first successful run is an immediate
    /// [`StageOutcome::Skipped`]: the flag probe (a plain memory-mapped read,
    /// before either device is initialized) finds the flag already retired.
    ///
    /// Every path finalizes both devices except the checksum-mismatch error,
    /// which leaves them open because the caller is expected to halt (see
    /// [`run_or_halt`](FirmwareStager::run_or_halt)).
    pub fn run<S, D>(&mut self, internal: &mut S, driver: &mut D) -> Result<StageOutcome, StageError>
    where
        S: FlashInterface,
        D: FlashInterface,
    {
        let mut flag = [0xFF_u8; 1];
        let mut addr = self.layout.copy_flag_addr;
        internal.read(&mut addr, &mut flag).map_err(StageError::Flash)?;
        if flag[0] != STAGE_PENDING {
            return Ok(StageOutcome::Skipped);
        }

        crate::log_info!("bootloader copying staged radio firmware");
        let result = self.stage(internal, driver);

        if !matches!(result, Err(StageError::ChecksumMismatch { .. })) {
            internal.finalize();
            driver.finalize();
        }
        result
    }

    /// Production entry point: like [`run`](FirmwareStager::run), but a
    /// checksum mismatch logs and halts the processor permanently
    pub fn run_or_halt<S, D>(
        &mut self,
        internal: &mut S,
        driver: &mut D,
    ) -> Result<StageOutcome, PlatformError>
    where
        S: FlashInterface,
        D: FlashInterface,
    {
        match self.run(internal, driver) {
            Ok(outcome) => Ok(outcome),
            Err(StageError::Flash(e)) => Err(e),
            Err(StageError::ChecksumMismatch { stored, computed }) => {
                crate::log_error!(
                    "radio firmware check-sum error: stored {:#x}, computed {:#x}",
                    stored,
                    computed
                );
                loop {
                    core::hint::spin_loop();
                }
            }
        }
    }

    fn stage<S, D>(&mut self, internal: &mut S, driver: &mut D) -> Result<StageOutcome, StageError>
    where
        S: FlashInterface,
        D: FlashInterface,
    {
        driver.init()?;
        internal.init()?;
        driver.erase(self.layout.dest_start, self.layout.dest_end)?;

        let total = self.layout.total_length();

        // Checksum byte sits at the last address of the staging region
        let stored = {
            let mut addr = self.layout.source_end;
            let mut byte = [0_u8; 1];
            internal.read(&mut addr, &mut byte)?;
            byte[0]
        };

        // Copy phase: staged image -> SPI flash, one scratch chunk at a time
        let mut src = self.layout.source_base;
        let mut dst = self.layout.dest_start;
        let mut remaining = total;
        while remaining > 0 {
            let len = remaining.min(CHUNK_SIZE as u32) as usize;
            let chunk = &mut self.scratch[..len];
            internal.read(&mut src, chunk)?;
            driver.write(&mut dst, chunk)?;
            remaining -= len as u32;
        }

        // Verify phase: read the destination back under the CRC digest
        crate::log_info!("bootloader verifying radio firmware");
        let mut digest = CRC8.digest();
        let mut dst = self.layout.dest_start;
        let mut remaining = total;
        while remaining > 0 {
            let len = remaining.min(CHUNK_SIZE as u32) as usize;
            let chunk = &mut self.scratch[..len];
            driver.read(&mut dst, chunk)?;
            digest.update(chunk);
            remaining -= len as u32;
        }
        let computed = digest.finalize();
        if computed != stored {
            return Err(StageError::ChecksumMismatch { stored, computed });
        }

        // Retire the flag: erase its word back to 0xFF so later boots skip
        crate::log_info!("bootloader clearing staging flag");
        internal.init()?;
        internal.erase(self.layout.copy_flag_addr, self.layout.copy_flag_addr)?;

        Ok(StageOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::FlashError;
    use crate::platform::mock::MockFlash;

    /// Layout used by the tests: real internal-flash addresses, small image
    fn layout(image_len: u32) -> StagingLayout {
        StagingLayout {
            image_len,
            ..StagingLayout::micokit_3165()
        }
    }

    /// Deterministic non-trivial image contents
    fn image(len: u32) -> Vec<u8> {
        (0..len).map(|i| (i.wrapping_mul(31) % 251) as u8).collect()
    }

    /// Classic Dallas/Maxim CRC-8 lookup table, as published with the
    /// factory image format
    const CRC8_TABLE: [u8; 256] = [
        0, 94, 188, 226, 97, 63, 221, 131, 194, 156, 126, 32, 163, 253, 31, 65, 157, 195, 33, 127,
        252, 162, 64, 30, 95, 1, 227, 189, 62, 96, 130, 220, 35, 125, 159, 193, 66, 28, 254, 160,
        225, 191, 93, 3, 128, 222, 60, 98, 190, 224, 2, 92, 223, 129, 99, 61, 124, 34, 192, 158,
        29, 67, 161, 255, 70, 24, 250, 164, 39, 121, 155, 197, 132, 218, 56, 102, 229, 187, 89, 7,
        219, 133, 103, 57, 186, 228, 6, 88, 25, 71, 165, 251, 120, 38, 196, 154, 101, 59, 217, 135,
        4, 90, 184, 230, 167, 249, 27, 69, 198, 152, 122, 36, 248, 166, 68, 26, 153, 199, 37, 123,
        58, 100, 134, 216, 91, 5, 231, 185, 140, 210, 48, 110, 237, 179, 81, 15, 78, 16, 242, 172,
        47, 113, 147, 205, 17, 79, 173, 243, 112, 46, 204, 146, 211, 141, 111, 49, 178, 236, 14,
        80, 175, 241, 19, 77, 206, 144, 114, 44, 109, 51, 209, 143, 12, 82, 176, 238, 50, 108, 142,
        208, 83, 13, 239, 177, 240, 174, 76, 18, 145, 207, 45, 115, 202, 148, 118, 40, 171, 245,
        23, 73, 8, 86, 180, 234, 105, 55, 213, 139, 87, 9, 235, 181, 54, 104, 138, 212, 149, 203,
        41, 119, 244, 170, 72, 22, 233, 183, 85, 11, 136, 214, 52, 106, 43, 117, 151, 201, 74, 20,
        246, 168, 116, 42, 200, 150, 21, 75, 169, 247, 182, 232, 10, 84, 215, 137, 107, 53,
    ];

    fn table_crc8(data: &[u8]) -> u8 {
        data.iter().fold(0, |acc, &b| CRC8_TABLE[(acc ^ b) as usize])
    }

    /// Build the two mock devices with a pending staged image of `len` bytes
    fn staged_devices(len: u32) -> (MockFlash, MockFlash) {
        let lay = layout(len);
        let img = image(len);

        // Internal flash window covering flag, staging region and checksum
        let mut internal = MockFlash::new(0x0800_0000, 0x0008_0000);
        internal.program(lay.copy_flag_addr, &[STAGE_PENDING]);
        internal.program(lay.source_base, &img);
        internal.program(lay.source_end, &[table_crc8(&img)]);

        let driver = MockFlash::new(0, 0x0004_0000);
        (internal, driver)
    }

    #[test]
    fn test_crc8_digest_matches_published_table() {
        for data in [
            &b"123456789"[..],
            &[],
            &[0x00],
            &[0xFF; 300],
            &image(1000)[..],
        ] {
            let mut digest = CRC8.digest();
            digest.update(data);
            assert_eq!(digest.finalize(), table_crc8(data));
        }
    }

    #[test]
    fn test_crc8_check_value() {
        // CRC-8/MAXIM-DOW reference check value
        assert_eq!(table_crc8(b"123456789"), 0xA1);
    }

    #[test]
    fn test_total_length_clamped() {
        assert_eq!(layout(0x1000).total_length(), 0x1000);
        assert_eq!(layout(MAX_IMAGE_LEN).total_length(), MAX_IMAGE_LEN);
        assert_eq!(layout(0x0008_0000).total_length(), MAX_IMAGE_LEN);
    }

    #[test]
    fn test_skips_when_flag_already_retired() {
        let lay = layout(4096);
        let mut internal = MockFlash::new(0x0800_0000, 0x0008_0000);
        // Flag byte left in erased state (0xFF)
        let mut driver = MockFlash::new(0, 0x0004_0000);

        let mut stager = FirmwareStager::new(lay);
        let outcome = stager.run(&mut internal, &mut driver).unwrap();

        assert_eq!(outcome, StageOutcome::Skipped);
        assert_eq!(driver.init_count(), 0);
        assert!(driver.erase_ops().is_empty());
    }

    #[test]
    fn test_successful_stage_end_to_end() {
        let len = 4096;
        let lay = layout(len);
        let (mut internal, mut driver) = staged_devices(len);

        let mut stager = FirmwareStager::new(lay);
        let outcome = stager.run(&mut internal, &mut driver).unwrap();
        assert_eq!(outcome, StageOutcome::Completed);

        // Destination equals the staged image
        assert_eq!(driver.get_contents(lay.dest_start, len as usize), image(len));

        // Flag word erased back to 0xFF
        assert!(internal.was_erased(lay.copy_flag_addr));
        assert_eq!(internal.get_contents(lay.copy_flag_addr, 1), vec![0xFF]);

        // Both devices released exactly once
        assert_eq!(internal.finalize_count(), 1);
        assert_eq!(driver.finalize_count(), 1);

        // Destination region was erased before the copy
        assert_eq!(driver.erase_ops()[0], (lay.dest_start, lay.dest_end));
    }

    #[test]
    fn test_chunk_count_is_ceil_of_total_over_chunk_size() {
        for len in [1, 100, 4095, 4096, 4097, 3 * 4096 + 5, 8 * 4096] {
            let expected = len.div_ceil(CHUNK_SIZE as u32);
            let (mut internal, mut driver) = staged_devices(len);

            let mut stager = FirmwareStager::new(layout(len));
            stager.run(&mut internal, &mut driver).unwrap();

            // Copy phase: one write per chunk; verify phase: one read per chunk
            assert_eq!(driver.write_count(), expected, "len {}", len);
            assert_eq!(driver.read_count(), expected, "len {}", len);
            // Internal reads: flag probe + checksum + one per copy chunk
            assert_eq!(internal.read_count(), expected + 2, "len {}", len);
        }
    }

    #[test]
    fn test_checksum_mismatch_keeps_flag_pending() {
        let len = 4096;
        let lay = layout(len);
        let (mut internal, mut driver) = staged_devices(len);
        // Corrupt the stored checksum byte
        internal.inject_corruption(lay.source_end, 1);

        let mut stager = FirmwareStager::new(lay);
        let err = stager.run(&mut internal, &mut driver).unwrap_err();
        assert!(matches!(err, StageError::ChecksumMismatch { .. }));

        // Flag word untouched: still pending
        assert!(!internal.was_erased(lay.copy_flag_addr));
        assert_eq!(internal.get_contents(lay.copy_flag_addr, 1), vec![STAGE_PENDING]);

        // The unverified copy may be present in the destination
        assert_eq!(driver.get_contents(lay.dest_start, len as usize), image(len));

        // Halt path: devices deliberately not finalized
        assert_eq!(internal.finalize_count(), 0);
        assert_eq!(driver.finalize_count(), 0);
    }

    #[test]
    fn test_corrupted_image_also_mismatches() {
        let len = 8192;
        let lay = layout(len);
        let (mut internal, mut driver) = staged_devices(len);
        internal.inject_corruption(lay.source_base + 5000, 16);

        let mut stager = FirmwareStager::new(lay);
        let err = stager.run(&mut internal, &mut driver).unwrap_err();
        assert!(matches!(err, StageError::ChecksumMismatch { .. }));
        assert!(!internal.was_erased(lay.copy_flag_addr));
    }

    #[test]
    fn test_driver_init_failure_aborts_before_erase() {
        let (mut internal, mut driver) = staged_devices(4096);
        driver.fail_next_init();

        let mut stager = FirmwareStager::new(layout(4096));
        let err = stager.run(&mut internal, &mut driver).unwrap_err();
        assert_eq!(
            err,
            StageError::Flash(PlatformError::Flash(FlashError::InitFailed))
        );

        // Nothing erased or written
        assert!(driver.erase_ops().is_empty());
        assert_eq!(driver.write_count(), 0);
        // Both devices still finalized during cleanup
        assert_eq!(internal.finalize_count(), 1);
        assert_eq!(driver.finalize_count(), 1);
    }

    #[test]
    fn test_internal_init_failure_aborts_before_erase() {
        let (mut internal, mut driver) = staged_devices(4096);
        internal.fail_next_init();

        let mut stager = FirmwareStager::new(layout(4096));
        let err = stager.run(&mut internal, &mut driver).unwrap_err();
        assert_eq!(
            err,
            StageError::Flash(PlatformError::Flash(FlashError::InitFailed))
        );
        assert!(driver.erase_ops().is_empty());
        assert_eq!(internal.finalize_count(), 1);
        assert_eq!(driver.finalize_count(), 1);
    }

    #[test]
    fn test_erase_failure_aborts_copy() {
        let (mut internal, mut driver) = staged_devices(4096);
        driver.fail_next_erase();

        let mut stager = FirmwareStager::new(layout(4096));
        let err = stager.run(&mut internal, &mut driver).unwrap_err();
        assert_eq!(
            err,
            StageError::Flash(PlatformError::Flash(FlashError::EraseFailed))
        );
        assert_eq!(driver.write_count(), 0);
        assert_eq!(driver.finalize_count(), 1);
    }

    #[test]
    fn test_source_read_failure_aborts_remaining_chunks() {
        let len = 4 * 4096;
        let (mut internal, mut driver) = staged_devices(len);
        // Reads: probe, checksum, then copy chunks. Fail the second chunk.
        internal.fail_read_after(3);

        let mut stager = FirmwareStager::new(layout(len));
        let err = stager.run(&mut internal, &mut driver).unwrap_err();
        assert_eq!(
            err,
            StageError::Flash(PlatformError::Flash(FlashError::ReadFailed))
        );

        // One chunk made it across before the abort
        assert_eq!(driver.write_count(), 1);
        assert!(!internal.was_erased(layout(len).copy_flag_addr));
        assert_eq!(driver.finalize_count(), 1);
    }

    #[test]
    fn test_write_failure_aborts_remaining_chunks() {
        let len = 4 * 4096;
        let (mut internal, mut driver) = staged_devices(len);
        driver.fail_next_write();

        let mut stager = FirmwareStager::new(layout(len));
        let err = stager.run(&mut internal, &mut driver).unwrap_err();
        assert_eq!(
            err,
            StageError::Flash(PlatformError::Flash(FlashError::WriteFailed))
        );
        assert_eq!(driver.write_count(), 0);
        assert_eq!(driver.finalize_count(), 1);
    }

    #[test]
    fn test_verify_read_failure_keeps_flag_pending() {
        let len = 4096;
        let lay = layout(len);
        let (mut internal, mut driver) = staged_devices(len);
        // Driver reads happen only in the verify phase
        driver.fail_next_read();

        let mut stager = FirmwareStager::new(lay);
        let err = stager.run(&mut internal, &mut driver).unwrap_err();
        assert_eq!(
            err,
            StageError::Flash(PlatformError::Flash(FlashError::ReadFailed))
        );
        assert!(!internal.was_erased(lay.copy_flag_addr));
        assert_eq!(internal.finalize_count(), 1);
        assert_eq!(driver.finalize_count(), 1);
    }

    #[test]
    fn test_second_run_skips_after_completion() {
        let (mut internal, mut driver) = staged_devices(4096);
        let mut stager = FirmwareStager::new(layout(4096));

        assert_eq!(
            stager.run(&mut internal, &mut driver).unwrap(),
            StageOutcome::Completed
        );
        let writes_after_first = driver.write_count();

        assert_eq!(
            stager.run(&mut internal, &mut driver).unwrap(),
            StageOutcome::Skipped
        );
        assert_eq!(driver.write_count(), writes_after_first);
    }

    #[test]
    fn test_run_or_halt_passes_through_flash_errors() {
        let (mut internal, mut driver) = staged_devices(4096);
        driver.fail_next_init();

        let mut stager = FirmwareStager::new(layout(4096));
        let err = stager
            .run_or_halt(&mut internal, &mut driver)
            .unwrap_err();
        assert_eq!(err, PlatformError::Flash(FlashError::InitFailed));
    }
}
