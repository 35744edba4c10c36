use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Sender, TrySendError};
use log::{debug, info, trace, warn};
use rand::Rng;

use crate::config::SimulatorConfig;
use crate::types::{RateSetting, Sample};
use super::bridge::{SensorBridge, SensorError, SensorEvent, SubscriptionId};

/// 休眠切片，保证切换速率后最迟一个切片内生效
const POLL_SLICE: Duration = Duration::from_millis(10);

type ListenerTable = HashMap<SubscriptionId, Sender<SensorEvent>>;

/// 静止时重力在 z 轴，叠加噪声和偶发的晃动
#[derive(Debug, Clone)]
pub struct MotionModel {
    config: SimulatorConfig,
    shake_remaining: u32,
}

impl MotionModel {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            shake_remaining: 0,
        }
    }

    pub fn next_sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Sample {
        let noise = self.config.noise_g;
        let mut x = jitter(rng, noise);
        let mut y = jitter(rng, noise);
        let mut z = 1.0 + jitter(rng, noise);

        if self.shake_remaining == 0 && rng.random_bool(self.config.shake_probability) {
            self.shake_remaining = self.config.shake_samples;
        }

        if self.shake_remaining > 0 {
            self.shake_remaining -= 1;
            let amplitude = self.config.shake_amplitude_g;
            x += jitter(rng, amplitude);
            y += jitter(rng, amplitude);
            z += jitter(rng, amplitude);
        }

        Sample::new(x, y, z)
    }

    #[cfg(test)]
    pub fn is_shaking(&self) -> bool {
        self.shake_remaining > 0
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if !amplitude.is_finite() || amplitude <= 0.0 {
        0.0
    } else {
        rng.random_range(-amplitude..amplitude)
    }
}

/// Accelerometer stand-in for hosts without motion hardware.
///
/// A background worker produces one sample per update interval and fans it
/// out to every registered listener.
pub struct SimulatedAccelerometer {
    listeners: Arc<Mutex<ListenerTable>>,
    interval_ms: Arc<AtomicU64>,
    shutdown_signal: Arc<AtomicBool>,
    worker_handle: Option<JoinHandle<()>>,
    next_id: u64,
}

impl SimulatedAccelerometer {
    pub fn new(config: &SimulatorConfig) -> Result<Self, SensorError> {
        let listeners: Arc<Mutex<ListenerTable>> = Arc::new(Mutex::new(HashMap::new()));
        let interval_ms = Arc::new(AtomicU64::new(
            RateSetting::default().interval().as_millis() as u64,
        ));
        let shutdown_signal = Arc::new(AtomicBool::new(false));

        let worker_listeners = Arc::clone(&listeners);
        let worker_interval = Arc::clone(&interval_ms);
        let worker_shutdown = Arc::clone(&shutdown_signal);
        let model = MotionModel::new(config.clone());

        let worker_handle = thread::Builder::new()
            .name("accelerometer-sim".into())
            .spawn(move || run_worker(model, worker_listeners, worker_interval, worker_shutdown))
            .map_err(|e| SensorError::Unavailable(format!("failed to start simulator: {}", e)))?;

        info!("Simulated accelerometer started");

        Ok(Self {
            listeners,
            interval_ms,
            shutdown_signal,
            worker_handle: Some(worker_handle),
            next_id: 1,
        })
    }

    pub fn listener_count(&self) -> usize {
        lock_listeners(&self.listeners).len()
    }

    #[cfg(test)]
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }
}

impl SensorBridge for SimulatedAccelerometer {
    fn subscribe(&mut self, listener: Sender<SensorEvent>) -> Result<SubscriptionId, SensorError> {
        let worker_alive = self
            .worker_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished());
        if self.shutdown_signal.load(Ordering::Relaxed) || !worker_alive {
            return Err(SensorError::Disconnected);
        }

        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        lock_listeners(&self.listeners).insert(id, listener);
        debug!("Listener {} registered", id);
        Ok(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        if lock_listeners(&self.listeners).remove(&id).is_some() {
            debug!("Listener {} removed", id);
        }
    }

    fn set_update_interval(&mut self, interval: Duration) {
        let ms = (interval.as_millis() as u64).max(1);
        self.interval_ms.store(ms, Ordering::Relaxed);
        debug!("Simulator update interval set to {}ms", ms);
    }
}

impl Drop for SimulatedAccelerometer {
    fn drop(&mut self) {
        // 发送关闭信号并等待工作线程退出
        let remaining = self.listener_count();
        if remaining > 0 {
            warn!("Simulator stopping with {} listeners still registered", remaining);
        }
        self.shutdown_signal.store(true, Ordering::Relaxed);
        if let Some(handle) = self.worker_handle.take() {
            if handle.join().is_err() {
                warn!("Simulator worker panicked");
            }
        }
        info!("Simulated accelerometer stopped");
    }
}

fn lock_listeners(listeners: &Mutex<ListenerTable>) -> MutexGuard<'_, ListenerTable> {
    listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn run_worker(
    mut model: MotionModel,
    listeners: Arc<Mutex<ListenerTable>>,
    interval_ms: Arc<AtomicU64>,
    shutdown_signal: Arc<AtomicBool>,
) {
    let mut rng = rand::rng();
    let mut last_emit = Instant::now();

    while !shutdown_signal.load(Ordering::Relaxed) {
        let interval = Duration::from_millis(interval_ms.load(Ordering::Relaxed));
        let elapsed = last_emit.elapsed();
        if elapsed < interval {
            thread::sleep((interval - elapsed).min(POLL_SLICE));
            continue;
        }
        last_emit = Instant::now();

        let sample = model.next_sample(&mut rng);
        deliver(&listeners, sample);
    }
}

fn deliver(listeners: &Mutex<ListenerTable>, sample: Sample) {
    let mut table = lock_listeners(listeners);
    let mut gone = Vec::new();

    for (&subscription, sender) in table.iter() {
        match sender.try_send(SensorEvent { subscription, sample }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => trace!("Listener {} is full, sample dropped", subscription),
            Err(TrySendError::Disconnected(_)) => gone.push(subscription),
        }
    }

    // 接收端已关闭的监听者直接移除
    for subscription in gone {
        table.remove(&subscription);
        info!("Listener {} disconnected, removed", subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_config() -> SimulatorConfig {
        SimulatorConfig {
            noise_g: 0.0,
            shake_probability: 0.0,
            shake_amplitude_g: 0.0,
            shake_samples: 0,
        }
    }

    #[test]
    fn quiet_model_reports_gravity_only() {
        let mut model = MotionModel::new(quiet_config());
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(model.next_sample(&mut rng), Sample::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn noise_stays_within_amplitude() {
        let config = SimulatorConfig {
            noise_g: 0.05,
            ..quiet_config()
        };
        let mut model = MotionModel::new(config);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let s = model.next_sample(&mut rng);
            assert!(s.x.abs() <= 0.05 && s.y.abs() <= 0.05);
            assert!((s.z - 1.0).abs() <= 0.05 + 1e-12);
        }
    }

    #[test]
    fn non_finite_amplitude_yields_no_jitter() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(jitter(&mut rng, f64::NAN), 0.0);
        assert_eq!(jitter(&mut rng, f64::INFINITY), 0.0);
        assert_eq!(jitter(&mut rng, -0.5), 0.0);
    }

    #[test]
    fn shake_lasts_configured_samples() {
        let config = SimulatorConfig {
            shake_probability: 1.0,
            shake_amplitude_g: 1.5,
            shake_samples: 3,
            ..quiet_config()
        };
        let mut model = MotionModel::new(config);
        let mut rng = StdRng::seed_from_u64(1);
        model.next_sample(&mut rng);
        assert!(model.is_shaking());
        model.next_sample(&mut rng);
        model.next_sample(&mut rng);
        assert!(!model.is_shaking());
    }

    #[test]
    fn delivers_tagged_samples_until_unsubscribed() {
        let mut sensor = SimulatedAccelerometer::new(&quiet_config()).unwrap();
        sensor.set_update_interval(RateSetting::Fast.interval());
        assert_eq!(sensor.update_interval(), Duration::from_millis(50));

        let (sender, receiver) = bounded(16);
        let id = sensor.subscribe(sender).unwrap();
        assert_eq!(sensor.listener_count(), 1);

        let event = receiver.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(event.subscription, id);
        assert_eq!(event.sample, Sample::new(0.0, 0.0, 1.0));

        sensor.unsubscribe(id);
        sensor.unsubscribe(id);
        assert_eq!(sensor.listener_count(), 0);
    }

    #[test]
    fn subscriptions_get_distinct_ids() {
        let mut sensor = SimulatedAccelerometer::new(&quiet_config()).unwrap();
        let (sender, _receiver) = bounded(1);
        let a = sensor.subscribe(sender.clone()).unwrap();
        let b = sensor.subscribe(sender).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let mut sensor = SimulatedAccelerometer::new(&quiet_config()).unwrap();
        sensor.set_update_interval(Duration::from_millis(5));
        let (sender, receiver) = bounded(1);
        sensor.subscribe(sender).unwrap();
        drop(receiver);

        let deadline = Instant::now() + Duration::from_secs(2);
        while sensor.listener_count() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(sensor.listener_count(), 0);
    }
}
