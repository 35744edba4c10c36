pub mod bridge;
pub mod simulated;

pub use bridge::{SensorBridge, SensorError, SensorEvent, SubscriptionId};
pub use simulated::SimulatedAccelerometer;
