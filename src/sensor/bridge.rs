use std::fmt;
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::types::Sample;

/// Opaque handle for one listener registration with a [`SensorBridge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// 传感器推送给监听者的消息，带上订阅号以便丢弃退订后迟到的样本
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorEvent {
    pub subscription: SubscriptionId,
    pub sample: Sample,
}

/// 传感器错误类型
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("Sensor unavailable: {0}")]
    Unavailable(String),
    #[error("Sensor worker disconnected")]
    Disconnected,
}

/// Source of raw accelerometer samples.
///
/// Samples are delivered as [`SensorEvent`]s on the listener channel handed
/// to `subscribe`, one at a time and in production order.
pub trait SensorBridge {
    fn subscribe(&mut self, listener: Sender<SensorEvent>) -> Result<SubscriptionId, SensorError>;

    /// Unknown or already removed ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);

    fn set_update_interval(&mut self, interval: Duration);
}
