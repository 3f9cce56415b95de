//! # Frequency Readout GUI
//!
//! Live dominant-frequency readout for the default microphone.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme
//! - **Audio Thread**: Owns the microphone stream and the driving loop, one
//!   analysis attempt per refresh tick
//! - **Communication**: Crossbeam channels for thread-safe data exchange

mod ui;

use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use frequency_core::{
    audio::{self, MicrophoneCapture},
    config::{SETTINGS_FILE, Settings},
    monitor::FrequencyMonitor,
};
use iced::{Element, Subscription, Theme};
use ui::readout::create_readout_view;

/// Main entry point for the frequency readout application.
pub fn main() -> iced::Result {
    env_logger::init();
    log::info!("Starting frequency readout...");
    let result = iced::application("Frequency", FrequencyApp::update, FrequencyApp::view)
        .subscription(FrequencyApp::subscription)
        .theme(FrequencyApp::theme)
        .run();
    log::info!("Application finished with result: {:?}", result);
    result
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Timer tick: drain whatever the audio thread has produced.
    Tick,
}

/// What the audio thread reports back to the GUI.
#[derive(Debug, Clone)]
enum WorkerEvent {
    Started { sample_rate: u32, frame_size: usize },
    Estimate(f32),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureStatus {
    Starting,
    Running { sample_rate: u32, frame_size: usize },
    Failed(String),
}

/// Data the view needs, nothing else.
#[derive(Debug, Clone)]
pub struct ReadoutData {
    /// Latest estimate in Hz, if one has arrived yet.
    pub frequency: Option<f32>,
    pub status: CaptureStatus,
}

struct FrequencyApp {
    /// `None` when start-up was refused, e.g. a bad settings file.
    _audio_worker: Option<AudioWorker>,
    events: Receiver<WorkerEvent>,
    refresh_interval: Duration,
    display_data: ReadoutData,
}

/// Audio thread handle. Dropping it stops the thread and the stream.
struct AudioWorker {
    shutdown_tx: Sender<()>,
    thread_handle: Option<JoinHandle<()>>,
}

impl Default for FrequencyApp {
    fn default() -> Self {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let (audio_worker, refresh_interval, status) = match Settings::load_or_default(SETTINGS_FILE) {
            Ok(settings) => {
                let refresh_interval = settings.refresh_interval();
                (
                    Some(AudioWorker::spawn(settings, events_tx)),
                    refresh_interval,
                    CaptureStatus::Starting,
                )
            }
            Err(e) => {
                log::error!("Invalid settings, analysis not started: {e:#}");
                (
                    None,
                    Settings::default().refresh_interval(),
                    CaptureStatus::Failed(format!("{e:#}")),
                )
            }
        };
        Self {
            _audio_worker: audio_worker,
            events: events_rx,
            refresh_interval,
            display_data: ReadoutData {
                frequency: None,
                status,
            },
        }
    }
}

impl FrequencyApp {
    fn update(&mut self, message: Message) {
        match message {
            Message::Tick => {
                while let Ok(event) = self.events.try_recv() {
                    self.apply(event);
                }
            }
        }
    }

    fn apply(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Started { sample_rate, frame_size } => {
                self.display_data.status = CaptureStatus::Running { sample_rate, frame_size };
            }
            WorkerEvent::Estimate(frequency) => {
                self.display_data.frequency = Some(frequency);
            }
            WorkerEvent::Failed(reason) => {
                self.display_data.status = CaptureStatus::Failed(reason);
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        create_readout_view(&self.display_data)
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(self.refresh_interval).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

impl AudioWorker {
    /// Spawns the audio thread. Failures to open the device, and
    /// configuration errors hit while running, are reported through
    /// `events`, not returned, so the window still comes up.
    fn spawn(settings: Settings, events: Sender<WorkerEvent>) -> Self {
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
        let thread_handle = thread::spawn(move || {
            log::debug!("Audio thread starting");
            if let Err(e) = run_audio_loop(&settings, &events, &shutdown_rx) {
                log::error!("Audio thread failed: {e:#}");
                let _ = events.send(WorkerEvent::Failed(e.to_string()));
            }
            log::debug!("Audio thread finished");
        });
        Self {
            shutdown_tx,
            thread_handle: Some(thread_handle),
        }
    }
}

impl Drop for AudioWorker {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.try_send(());
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("Audio thread panicked");
            }
        }
    }
}

/// Driving loop: one monitor tick per refresh interval until shutdown.
fn run_audio_loop(
    settings: &Settings,
    events: &Sender<WorkerEvent>,
    shutdown_rx: &Receiver<()>,
) -> Result<()> {
    let capture = audio::start_capture(settings)?;
    let params = settings.analysis.with_sample_rate(capture.sample_rate())?;
    let mut monitor = FrequencyMonitor::for_source(params, capture.buffer())?;

    let _ = events.send(WorkerEvent::Started {
        sample_rate: params.sample_rate(),
        frame_size: params.frame_size(),
    });

    let ticker = crossbeam_channel::tick(settings.refresh_interval());
    let outcome = loop {
        crossbeam_channel::select! {
            recv(ticker) -> _ => match monitor.tick(capture.buffer()) {
                Ok(Some(frequency)) => {
                    if events.send(WorkerEvent::Estimate(frequency)).is_err() {
                        break Ok(());
                    }
                }
                Ok(None) => {}
                Err(e) => break Err(e),
            },
            recv(shutdown_rx) -> _ => {
                log::debug!("Audio thread received shutdown signal");
                break Ok(());
            },
        }
    };

    stop_capture(capture);
    Ok(outcome?)
}

fn stop_capture(capture: MicrophoneCapture) {
    if let Err(e) = capture.stop() {
        log::warn!("Error pausing stream: {e}");
    }
}
