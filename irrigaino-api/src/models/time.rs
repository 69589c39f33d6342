use core::fmt;

use ::time::{Date, Month, PrimitiveDateTime, Time};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const BASE_YEAR: u16 = 2000;

/// Time of day with minute resolution.
///
/// Fields missing from a serialized value read as zero.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct TimeHm {
    /// Hour of day (0-23)
    pub hours: u8,
    /// Minute of hour (0-59)
    pub minutes: u8,
}

impl TimeHm {
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
    };

    pub fn new(hours: u8, minutes: u8) -> Result<Self, ModelError> {
        let value = Self { hours, minutes };
        value.validate()?;
        Ok(value)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.hours > 23 {
            return Err(ModelError::HourOutOfRange(self.hours));
        }
        if self.minutes > 59 {
            return Err(ModelError::MinuteOutOfRange(self.minutes));
        }
        Ok(())
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        self.hours as u16 * 60 + self.minutes as u16
    }
}

impl fmt::Display for TimeHm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Wall-clock timestamp as kept by the RTC.
///
/// The layout mirrors the clock registers: every component is a plain byte,
/// `year` counts from 2000 and `week_day` runs 1-7 starting on Sunday.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeData {
    /// Hour of day (0-23)
    pub hours: u8,
    /// Minute of hour (0-59)
    pub minutes: u8,
    /// Second of minute (0-59)
    pub seconds: u8,
    /// Day of week (1-7, Sunday = 1)
    pub week_day: u8,
    /// Day of month (1-31)
    pub month_day: u8,
    /// Month of year (1-12)
    pub month: u8,
    /// Years since 2000 (0-99)
    pub year: u8,
}

impl Default for TimeData {
    /// 2000-01-01 00:00:00, a Saturday.
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            week_day: 7,
            month_day: 1,
            month: 1,
            year: 0,
        }
    }
}

impl TimeData {
    pub fn new(
        hours: u8,
        minutes: u8,
        seconds: u8,
        week_day: u8,
        month_day: u8,
        month: u8,
        year: u8,
    ) -> Result<Self, ModelError> {
        let value = Self {
            hours,
            minutes,
            seconds,
            week_day,
            month_day,
            month,
            year,
        };
        value.validate()?;
        Ok(value)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.time_hm().validate()?;
        if self.seconds > 59 {
            return Err(ModelError::SecondOutOfRange(self.seconds));
        }
        if !(1..=7).contains(&self.week_day) {
            return Err(ModelError::WeekDayOutOfRange(self.week_day));
        }
        if self.year > 99 {
            return Err(ModelError::YearOutOfRange(self.full_year()));
        }

        self.calendar_date()?;

        Ok(())
    }

    fn calendar_date(&self) -> Result<Date, ModelError> {
        let month = Month::try_from(self.month)
            .map_err(|_| ModelError::MonthOutOfRange(self.month))?;
        Date::from_calendar_date(self.full_year() as i32, month, self.month_day).map_err(|_| {
            ModelError::MonthDayOutOfRange {
                month_day: self.month_day,
                month: self.month,
            }
        })
    }

    pub fn time_hm(&self) -> TimeHm {
        TimeHm {
            hours: self.hours,
            minutes: self.minutes,
        }
    }

    pub fn full_year(&self) -> u16 {
        BASE_YEAR + self.year as u16
    }

    /// Converts to a calendar date-time, validating the fields first.
    pub fn to_datetime(&self) -> Result<PrimitiveDateTime, ModelError> {
        self.validate()?;

        let date = self.calendar_date()?;
        let time = Time::from_hms(self.hours, self.minutes, self.seconds)
            .map_err(|_| ModelError::SecondOutOfRange(self.seconds))?;

        Ok(PrimitiveDateTime::new(date, time))
    }
}

impl TryFrom<PrimitiveDateTime> for TimeData {
    type Error = ModelError;

    fn try_from(datetime: PrimitiveDateTime) -> Result<Self, Self::Error> {
        let year = datetime.year();
        let last_year = BASE_YEAR as i32 + 99;
        if !(BASE_YEAR as i32..=last_year).contains(&year) {
            let clamped = year.clamp(0, u16::MAX as i32) as u16;
            return Err(ModelError::YearOutOfRange(clamped));
        }

        Ok(Self {
            hours: datetime.hour(),
            minutes: datetime.minute(),
            seconds: datetime.second(),
            week_day: datetime.weekday().number_from_sunday(),
            month_day: datetime.day(),
            month: u8::from(datetime.month()),
            year: (year - BASE_YEAR as i32) as u8,
        })
    }
}

impl fmt::Display for TimeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.full_year(),
            self.month,
            self.month_day,
            self.hours,
            self.minutes,
            self.seconds
        )
    }
}
