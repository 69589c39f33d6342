mod ds1307;
pub mod registers;

pub use ds1307::Ds1307;
pub use irrigaino_api::DS1307_ADDRESS;

use irrigaino_api::TimeData;

use crate::error::Result;

/// Source of wall-clock time.
pub trait Clock {
    fn read_time(&mut self) -> Result<TimeData>;

    fn set_time(&mut self, time: &TimeData) -> Result<()>;
}
