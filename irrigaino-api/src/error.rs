#[cfg(feature = "std")]
use alloc::string::String;

use crate::models::TimeHm;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Hour {0} out of range 0-23")]
    HourOutOfRange(u8),
    #[error("Minute {0} out of range 0-59")]
    MinuteOutOfRange(u8),
    #[error("Second {0} out of range 0-59")]
    SecondOutOfRange(u8),
    #[error("Week day {0} out of range 1-7")]
    WeekDayOutOfRange(u8),
    #[error("Month {0} out of range 1-12")]
    MonthOutOfRange(u8),
    #[error("Year {0} out of range 2000-2099")]
    YearOutOfRange(u16),
    #[error("Day {month_day} does not exist in month {month}")]
    MonthDayOutOfRange { month_day: u8, month: u8 },
    #[error("Unknown soil moisture code {0}")]
    UnknownSoilMoisture(u8),
    #[error("Unknown active screen code {0}")]
    UnknownActiveScreen(u8),
    #[error("Unknown irrigation code {0}")]
    UnknownIrrigation(u8),
    #[error("Irrigation start {start} must precede end {end}")]
    InvalidIrrigationWindow { start: TimeHm, end: TimeHm },
    #[error("Soil thresholds must be ordered disconnected <= dry <= water <= adc max")]
    InvalidThresholds,
    #[error("RTC address {0:#04x} is not a 7-bit I2C address")]
    InvalidRtcAddress(u8),
    #[cfg(feature = "std")]
    #[error("Invalid configuration: {0}")]
    Config(String),
}
