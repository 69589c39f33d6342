mod status;
mod time;

pub use status::*;
pub use time::*;
