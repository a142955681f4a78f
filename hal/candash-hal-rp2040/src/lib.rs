//! RP2040-specific HAL for the dashboard firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `candash-hal` traits:
//!
//! - Flash storage driver (implements `candash_hal::FlashStorage`)

#![no_std]

pub mod flash;

// Re-export shared traits from candash-hal for convenience
pub use candash_hal::{FlashStorage as FlashStorageTrait, StorageKey};
