// SPDX-License-Identifier: MPL-2.0

//! Shared test doubles for integration tests
#![allow(dead_code)]

use futures::future::BoxFuture;
use selfie_camera::app::{DownloadSink, Notifier, SelfieApp, Services};
use selfie_camera::backends::camera::{
    BackendError, BackendResult, CameraBackend, MediaConstraints, MediaStream,
};
use selfie_camera::backends::sensor::{AmbientLightSensor, UnavailableSensor};
use selfie_camera::backends::virtual_camera::VirtualCamera;
use selfie_camera::errors::SensorError;
use selfie_camera::{Config, FilterSink, KeyValueStore, MemoryStore};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Notifier recording every message
#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
    pub confirms: Mutex<Vec<String>>,
    pub timer_labels: Mutex<Vec<Option<String>>>,
    pub availability: Mutex<Vec<bool>>,
    pub prompt_answer: Mutex<Option<String>>,
    pub confirm_answer: AtomicBool,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn timer_labels(&self) -> Vec<Option<String>> {
        self.timer_labels.lock().unwrap().clone()
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn answer_prompt(&self, answer: Option<&str>) {
        *self.prompt_answer.lock().unwrap() = answer.map(str::to_string);
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, message: &str) {
        self.toasts.lock().unwrap().push(message.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn prompt(&self, _message: &str) -> Option<String> {
        self.prompt_answer.lock().unwrap().clone()
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn recording_timer(&self, label: Option<&str>) {
        self.timer_labels
            .lock()
            .unwrap()
            .push(label.map(str::to_string));
    }

    fn auto_mode_available(&self, available: bool) {
        self.availability.lock().unwrap().push(available);
    }
}

/// Preview sink collecting filter strings
#[derive(Default)]
pub struct CollectingSink {
    pub filters: Mutex<Vec<String>>,
    pub backgrounds: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn filters(&self) -> Vec<String> {
        self.filters.lock().unwrap().clone()
    }
}

impl FilterSink for CollectingSink {
    fn apply_filter(&self, css: &str) {
        self.filters.lock().unwrap().push(css.to_string());
    }

    fn apply_background(&self, color: &str) {
        self.backgrounds.lock().unwrap().push(color.to_string());
    }
}

/// Download sink keeping files in memory
#[derive(Default)]
pub struct MemoryDownloads {
    pub files: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl MemoryDownloads {
    pub fn files(&self) -> Vec<(String, String, Vec<u8>)> {
        self.files.lock().unwrap().clone()
    }
}

impl DownloadSink for MemoryDownloads {
    fn save(&self, filename: &str, mime_type: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .push((filename.to_string(), mime_type.to_string(), data.to_vec()));
        Ok(PathBuf::from("/downloads").join(filename))
    }
}

/// Camera refusing some ideal widths and recording every request
pub struct ScriptedCamera {
    pub inner: VirtualCamera,
    pub refused_widths: Vec<u32>,
    pub attempts: Mutex<Vec<MediaConstraints>>,
}

impl ScriptedCamera {
    pub fn new(inner: VirtualCamera, refused_widths: Vec<u32>) -> Self {
        Self {
            inner,
            refused_widths,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<MediaConstraints> {
        self.attempts.lock().unwrap().clone()
    }
}

impl CameraBackend for ScriptedCamera {
    fn acquire(
        &self,
        constraints: MediaConstraints,
    ) -> BoxFuture<'_, BackendResult<Box<dyn MediaStream>>> {
        self.attempts.lock().unwrap().push(constraints);
        if self.refused_widths.contains(&constraints.width.target()) {
            return Box::pin(async move {
                Err(BackendError::ConstraintNotSatisfied(format!(
                    "refused {}",
                    constraints.width
                )))
            });
        }
        self.inner.acquire(constraints)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Sensor fed by the test through a channel
pub struct ChannelSensor {
    receiver: Option<mpsc::Receiver<f64>>,
}

impl ChannelSensor {
    pub fn new() -> (Self, mpsc::Sender<f64>) {
        let (sender, receiver) = mpsc::channel(16);
        (
            Self {
                receiver: Some(receiver),
            },
            sender,
        )
    }
}

impl AmbientLightSensor for ChannelSensor {
    fn start(&mut self) -> Result<mpsc::Receiver<f64>, SensorError> {
        self.receiver
            .take()
            .ok_or_else(|| SensorError::StartFailed("already started".to_string()))
    }
}

/// Session wired to test doubles
pub struct Harness {
    pub app: SelfieApp,
    pub notifier: Arc<RecordingNotifier>,
    pub sink: Arc<CollectingSink>,
    pub downloads: Arc<MemoryDownloads>,
}

pub struct HarnessBuilder {
    config: Config,
    camera: Arc<dyn CameraBackend>,
    sensor: Box<dyn AmbientLightSensor>,
    store: Box<dyn KeyValueStore>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            camera: Arc::new(VirtualCamera::new(vec![(64, 48)])),
            sensor: Box::new(UnavailableSensor),
            store: Box::new(MemoryStore::new()),
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn camera(mut self, camera: Arc<dyn CameraBackend>) -> Self {
        self.camera = camera;
        self
    }

    pub fn sensor(mut self, sensor: Box<dyn AmbientLightSensor>) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.store = store;
        self
    }

    pub fn build(self) -> Harness {
        let notifier = Arc::new(RecordingNotifier::default());
        let sink = Arc::new(CollectingSink::default());
        let downloads = Arc::new(MemoryDownloads::default());
        let app = SelfieApp::new(
            self.config,
            Services {
                camera: self.camera,
                sensor: self.sensor,
                store: self.store,
                filter_sink: sink.clone(),
                notifier: notifier.clone(),
                downloads: downloads.clone(),
            },
        );
        Harness {
            app,
            notifier,
            sink,
            downloads,
        }
    }
}

pub fn harness() -> Harness {
    HarnessBuilder::new().build()
}
