//! One-time radio firmware staging
//!
//! Production modules ship with the radio driver image parked in a staging
//! region of the MCU-internal flash. On the first boot the bootloader copies it
//! to its final home on the external SPI flash, verifies the copy with CRC-8,
//! and retires the staging flag so the work never repeats. See
//! [`stager::FirmwareStager`].

pub mod stager;

pub use stager::{
    FirmwareStager, StageError, StageOutcome, StagingLayout, CHUNK_SIZE, MAX_IMAGE_LEN,
};
