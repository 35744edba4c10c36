pub mod window;
pub mod trigger;

pub use window::SampleWindow;
pub use trigger::MotionTrigger;
