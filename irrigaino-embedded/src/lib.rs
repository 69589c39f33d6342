#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod monitor;
pub mod rtc;
pub mod sensor;

pub use error::*;
pub use monitor::*;
pub use rtc::{Clock, DS1307_ADDRESS, Ds1307};
pub use sensor::SoilSensor;
