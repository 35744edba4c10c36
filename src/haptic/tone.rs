use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info};
use rodio::source::SineWave;
use rodio::{OutputStreamBuilder, Sink, Source};

use crate::config::HapticConfig;
use super::actuator::{HapticActuator, HapticError};

/// 等待音频线程打开输出设备的最长时间
const OPEN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy)]
enum ToneCommand {
    Pulse,
    Shutdown,
}

/// Haptic stand-in that plays a short sine burst on the default audio device.
///
/// The output stream lives on its own worker thread; `pulse` only enqueues a
/// command. A pulse arriving while the previous burst is still audible is
/// dropped instead of queued.
pub struct TonePulse {
    command_sender: mpsc::Sender<ToneCommand>,
    worker_handle: Option<JoinHandle<()>>,
}

impl TonePulse {
    pub fn new(config: &HapticConfig) -> Result<Self, HapticError> {
        let (command_sender, command_receiver) = mpsc::channel();
        let (ready_sender, ready_receiver) = mpsc::channel();
        let config = config.clone();

        let worker_handle = thread::Builder::new()
            .name("haptic-tone".into())
            .spawn(move || tone_worker_thread(config, command_receiver, ready_sender))
            .map_err(|e| HapticError::OutputUnavailable(e.to_string()))?;

        // 等待工作线程报告输出设备是否可用
        match ready_receiver.recv_timeout(OPEN_TIMEOUT) {
            Ok(Ok(())) => Ok(Self {
                command_sender,
                worker_handle: Some(worker_handle),
            }),
            Ok(Err(message)) => {
                let _ = worker_handle.join();
                Err(HapticError::OutputUnavailable(message))
            }
            Err(_) => {
                let _ = command_sender.send(ToneCommand::Shutdown);
                Err(HapticError::OutputUnavailable(
                    "audio worker did not report readiness".to_string(),
                ))
            }
        }
    }
}

impl HapticActuator for TonePulse {
    fn pulse(&mut self) {
        if self.command_sender.send(ToneCommand::Pulse).is_err() {
            debug!("Haptic tone worker gone, pulse dropped");
        }
    }
}

impl Drop for TonePulse {
    fn drop(&mut self) {
        // 发送关闭命令并等待工作线程结束
        let _ = self.command_sender.send(ToneCommand::Shutdown);
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.join();
        }
    }
}

fn tone_worker_thread(
    config: HapticConfig,
    command_receiver: mpsc::Receiver<ToneCommand>,
    ready_sender: mpsc::Sender<Result<(), String>>,
) {
    let stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_sender.send(Err(format!("Failed to open default audio stream: {}", e)));
            return;
        }
    };
    let _ = ready_sender.send(Ok(()));
    info!("Haptic tone worker started");

    let duration = Duration::from_millis(config.duration_ms);
    let mut sink: Option<Sink> = None;

    while let Ok(command) = command_receiver.recv() {
        match command {
            ToneCommand::Pulse => {
                // 上一个脉冲还在播放时直接丢弃，不排队
                if sink.as_ref().is_some_and(|s| !s.empty()) {
                    continue;
                }

                let new_sink = Sink::connect_new(stream.mixer());
                let source = SineWave::new(config.tone_hz)
                    .take_duration(duration)
                    .amplify(config.volume);
                new_sink.append(source);
                sink = Some(new_sink);
            }
            ToneCommand::Shutdown => break,
        }
    }

    if let Some(current_sink) = sink.take() {
        current_sink.stop();
    }
    info!("Haptic tone worker shutting down");
}
