//! DS1307 time-keeping register map and BCD codec.
//!
//! The clock keeps its time in seven consecutive BCD registers starting at
//! `SECONDS`. Bit 7 of the seconds register is the clock-halt flag; bit 6
//! of the hours register selects 12-hour mode, in which bit 5 is the PM
//! flag. Writes from this crate always use 24-hour mode with the
//! oscillator running.

use irrigaino_api::{ModelError, TimeData};

use crate::error::{Error, Result};

pub const SECONDS: u8 = 0x00;
pub const MINUTES: u8 = 0x01;
pub const HOURS: u8 = 0x02;
pub const DAY: u8 = 0x03;
pub const DATE: u8 = 0x04;
pub const MONTH: u8 = 0x05;
pub const YEAR: u8 = 0x06;

pub const CLOCK_HALT: u8 = 0x80;
pub const TWELVE_HOUR: u8 = 0x40;
pub const PM: u8 = 0x20;

/// Number of time-keeping registers.
pub const TIME_REGISTERS: usize = 7;

pub fn bcd_to_dec(value: u8) -> Result<u8> {
    let tens = value >> 4;
    let ones = value & 0x0F;
    if tens > 9 || ones > 9 {
        return Err(Error::InvalidBcd(value));
    }
    Ok(tens * 10 + ones)
}

/// Encodes a value in 0..=99.
pub fn dec_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

pub fn encode(time: &TimeData) -> Result<[u8; TIME_REGISTERS]> {
    time.validate()?;

    Ok([
        dec_to_bcd(time.seconds),
        dec_to_bcd(time.minutes),
        dec_to_bcd(time.hours),
        dec_to_bcd(time.week_day),
        dec_to_bcd(time.month_day),
        dec_to_bcd(time.month),
        dec_to_bcd(time.year),
    ])
}

/// Decodes the register block. The clock-halt flag is ignored.
pub fn decode(registers: [u8; TIME_REGISTERS]) -> Result<TimeData> {
    let seconds = bcd_to_dec(registers[SECONDS as usize] & !CLOCK_HALT)?;
    let minutes = bcd_to_dec(registers[MINUTES as usize] & 0x7F)?;
    let hours = decode_hours(registers[HOURS as usize])?;
    let week_day = bcd_to_dec(registers[DAY as usize] & 0x07)?;
    let month_day = bcd_to_dec(registers[DATE as usize] & 0x3F)?;
    let month = bcd_to_dec(registers[MONTH as usize] & 0x1F)?;
    let year = bcd_to_dec(registers[YEAR as usize])?;

    Ok(TimeData::new(
        hours, minutes, seconds, week_day, month_day, month, year,
    )?)
}

fn decode_hours(register: u8) -> Result<u8> {
    if register & TWELVE_HOUR == 0 {
        return bcd_to_dec(register & 0x3F);
    }

    let hour = bcd_to_dec(register & 0x1F)?;
    if !(1..=12).contains(&hour) {
        return Err(ModelError::HourOutOfRange(hour).into());
    }

    let pm = register & PM != 0;
    Ok(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}
