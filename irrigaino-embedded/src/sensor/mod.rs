mod soil;

pub use soil::SoilSensor;

#[cfg(test)]
pub use soil::mock;
