use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, info, trace, warn};

use crate::config::MotionConfig;
use crate::haptic::HapticActuator;
use crate::motion::{MotionTrigger, SampleWindow};
use crate::sensor::{SensorBridge, SensorError, SensorEvent, SubscriptionId};
use crate::types::{Axis, RateSetting, Sample};

/// 监听通道容量，UI 卡顿时传感器端丢弃最新样本
pub const LISTENER_CAPACITY: usize = 256;

/// 本次会话的计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub accepted: u64,
    pub late_dropped: u64,
    /// 积压时跳过的旧样本
    pub stale_skipped: u64,
    pub pulses: u64,
}

/// Owns the sample window and the single sensor subscription.
///
/// Idle when `subscription` is `None`, Active otherwise. Every mutation goes
/// through `&mut self` on the UI thread, so ingestion and the controls never
/// interleave.
pub struct ViewModel {
    window: SampleWindow,
    trigger: MotionTrigger,
    bridge: Box<dyn SensorBridge>,
    haptic: Box<dyn HapticActuator>,
    subscription: Option<SubscriptionId>,
    rate: RateSetting,
    listener: Sender<SensorEvent>,
    events: Receiver<SensorEvent>,
    stats: SessionStats,
    last_error: Option<String>,
    torn_down: bool,
}

impl ViewModel {
    /// Starts Idle with the default rate already applied to the bridge.
    pub fn new(
        mut bridge: Box<dyn SensorBridge>,
        haptic: Box<dyn HapticActuator>,
        config: &MotionConfig,
    ) -> Self {
        let rate = RateSetting::default();
        bridge.set_update_interval(rate.interval());
        let (listener, events) = bounded(LISTENER_CAPACITY);

        Self {
            window: SampleWindow::new(config.window_capacity),
            trigger: MotionTrigger::new(config.threshold_g),
            bridge,
            haptic,
            subscription: None,
            rate,
            listener,
            events,
            stats: SessionStats::default(),
            last_error: None,
            torn_down: false,
        }
    }

    /// 已订阅时为空操作
    pub fn subscribe(&mut self) -> Result<(), SensorError> {
        if self.torn_down {
            return Err(SensorError::Disconnected);
        }
        if let Some(id) = self.subscription {
            debug!("Already subscribed as {}, ignoring", id);
            return Ok(());
        }

        match self.bridge.subscribe(self.listener.clone()) {
            Ok(id) => {
                self.subscription = Some(id);
                self.last_error = None;
                info!("Sensor subscribed ({}), rate {}", id, self.rate.label());
                Ok(())
            }
            Err(e) => {
                warn!("Sensor subscribe failed: {}", e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// 未订阅时为空操作
    pub fn unsubscribe(&mut self) {
        match self.subscription.take() {
            Some(id) => {
                self.bridge.unsubscribe(id);
                info!("Sensor unsubscribed ({})", id);
            }
            None => debug!("Not subscribed, ignoring unsubscribe"),
        }
    }

    pub fn toggle(&mut self) -> Result<(), SensorError> {
        if self.is_active() {
            self.unsubscribe();
            Ok(())
        } else {
            self.subscribe()
        }
    }

    /// 只改变传感器更新间隔，不影响订阅状态和已缓存数据
    pub fn set_rate(&mut self, rate: RateSetting) {
        self.bridge.set_update_interval(rate.interval());
        if self.rate != rate {
            info!("Update rate changed to {} ({}ms)", rate.label(), rate.interval().as_millis());
        }
        self.rate = rate;
    }

    pub fn on_sample(&mut self, event: SensorEvent) {
        if self.subscription != Some(event.subscription) {
            // 退订后迟到的样本，或者属于旧订阅
            self.stats.late_dropped += 1;
            trace!("Dropping late sample from {}", event.subscription);
            return;
        }

        let sample = event.sample;
        self.window.push(&sample);
        self.stats.accepted += 1;

        if self.trigger.evaluate(&sample) {
            self.stats.pulses += 1;
            debug!(
                "Motion {:.3}g over {:.3}g, pulsing",
                sample.magnitude(),
                self.trigger.threshold()
            );
            self.haptic.pulse();
        }
    }

    /// Drains the listener channel and handles the newest `capacity` events
    /// in arrival order. Anything older would be evicted from the window
    /// anyway, so it is skipped without firing pulses.
    pub fn pump(&mut self) -> usize {
        let pending: Vec<SensorEvent> = self.events.try_iter().collect();
        let drained = pending.len();

        let skip = drained.saturating_sub(self.window.capacity());
        if skip > 0 {
            self.stats.stale_skipped += skip as u64;
            debug!("Backlog of {} samples, skipping {} stale", drained, skip);
        }

        for event in pending.into_iter().skip(skip) {
            self.on_sample(event);
        }
        drained
    }

    /// Releases the subscription. Runs once; later calls and `Drop` are no-ops.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.unsubscribe();
        info!(
            "View torn down: {} samples, {} late, {} stale, {} pulses",
            self.stats.accepted, self.stats.late_dropped, self.stats.stale_skipped, self.stats.pulses
        );
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn latest_sample(&self) -> Option<Sample> {
        self.window.latest()
    }

    pub fn window_snapshot(&self, axis: Axis) -> Vec<f64> {
        self.window.snapshot(axis)
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn rate(&self) -> RateSetting {
        self.rate
    }

    pub fn threshold(&self) -> f64 {
        self.trigger.threshold()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl Drop for ViewModel {
    fn drop(&mut self) {
        self.teardown();
    }
}
