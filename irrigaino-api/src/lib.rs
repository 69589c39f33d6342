#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod error;
pub mod models;

pub use config::*;
pub use error::*;
pub use models::*;

/// 7-bit I2C address of the DS1307 real-time clock.
pub const DS1307_ADDRESS: u8 = 0x68;
