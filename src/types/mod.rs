pub mod sample;
pub mod rate;

pub use sample::{Axis, Sample};
pub use rate::RateSetting;
