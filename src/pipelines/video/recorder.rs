// SPDX-License-Identifier: MPL-2.0

//! Chunked clip recorder and elapsed-time timer
//!
//! ```text
//! MediaStream ─▶ MediaRecorder ──chunks──▶ collector task ─▶ Vec<chunk>
//!                                                              │
//! RecordingTimer ──(1 s)──▶ on_tick(elapsed)          stop ──▶ concat ─▶ blob
//! ```

use crate::app::utils::lock;
use crate::backends::camera::{MediaRecorder, MediaStream};
use crate::errors::RecordingError;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Periodic elapsed-time callback for the recording indicator
///
/// Ticks once per period with whole elapsed seconds. Stopping or dropping the
/// timer clears it.
#[derive(Debug)]
pub struct RecordingTimer {
    task: Option<JoinHandle<()>>,
}

impl RecordingTimer {
    /// Start ticking on the current runtime
    pub fn start<F>(started_at: Instant, period: Duration, on_tick: F) -> Result<Self, RecordingError>
    where
        F: Fn(u64) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| RecordingError::StartFailed(format!("no async runtime: {}", e)))?;

        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(started_at + period, period);
            loop {
                ticker.tick().await;
                on_tick(started_at.elapsed().as_secs());
            }
        });
        Ok(Self { task: Some(task) })
    }

    /// Clear the timer; idempotent
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for RecordingTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Output of a stopped recording
#[derive(Debug, Clone)]
pub struct FinishedRecording {
    pub id: Uuid,
    /// All chunks concatenated in arrival order
    pub data: Vec<u8>,
    pub mime_type: String,
    pub elapsed_secs: u64,
    pub chunk_count: usize,
}

/// One recording session bound to a live stream
pub struct VideoRecorder {
    id: Uuid,
    recorder: Box<dyn MediaRecorder>,
    chunks: Arc<Mutex<Vec<Vec<u8>>>>,
    collector: Option<JoinHandle<()>>,
    timer: RecordingTimer,
    started_at: Instant,
}

impl VideoRecorder {
    /// Create a recorder on `stream` and start collecting chunks
    ///
    /// `on_tick` receives the whole elapsed seconds once per `tick`.
    pub fn start<F>(
        stream: &dyn MediaStream,
        tick: Duration,
        on_tick: F,
    ) -> Result<Self, RecordingError>
    where
        F: Fn(u64) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| RecordingError::StartFailed(format!("no async runtime: {}", e)))?;
        let mut recorder = stream
            .create_recorder()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        let id = Uuid::new_v4();
        let chunks: Arc<Mutex<Vec<Vec<u8>>>> = Arc::new(Mutex::new(Vec::new()));
        let (sender, mut receiver) = mpsc::unbounded_channel::<Vec<u8>>();

        recorder
            .start(sender)
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        let sink = Arc::clone(&chunks);
        let collector = runtime.spawn(async move {
            while let Some(chunk) = receiver.recv().await {
                if chunk.is_empty() {
                    continue;
                }
                let mut chunks = lock(&sink);
                chunks.push(chunk);
                debug!(count = chunks.len(), "Recording chunk stored");
            }
        });

        let started_at = Instant::now();
        let timer = match RecordingTimer::start(started_at, tick, on_tick) {
            Ok(timer) => timer,
            Err(e) => {
                collector.abort();
                return Err(e);
            }
        };

        info!(%id, mime = recorder.mime_type(), "Recording started");
        Ok(Self {
            id,
            recorder,
            chunks,
            collector: Some(collector),
            timer,
            started_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whole seconds since the recording started
    pub fn elapsed_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Chunks collected so far
    pub fn chunk_count(&self) -> usize {
        lock(&self.chunks).len()
    }

    /// Stop the recorder, clear the timer and join all chunks
    pub async fn stop(mut self) -> Result<FinishedRecording, RecordingError> {
        self.timer.stop();
        let elapsed_secs = self.elapsed_secs();

        self.recorder.stop().await.map_err(|e| {
            error!(id = %self.id, error = %e, "Recorder failed to stop");
            RecordingError::StopFailed(e.to_string())
        })?;

        // Drains once the recorder has dropped its sender
        if let Some(collector) = self.collector.take()
            && let Err(e) = collector.await
        {
            warn!(id = %self.id, error = %e, "Chunk collector ended abnormally");
        }

        let chunks = std::mem::take(&mut *lock(&self.chunks));
        if chunks.is_empty() {
            return Err(RecordingError::EmptyRecording);
        }
        let chunk_count = chunks.len();
        let data = chunks.concat();

        info!(
            id = %self.id,
            elapsed_secs,
            chunk_count,
            size = data.len(),
            "Recording stopped"
        );
        Ok(FinishedRecording {
            id: self.id,
            data,
            mime_type: self.recorder.mime_type().to_string(),
            elapsed_secs,
            chunk_count,
        })
    }
}

impl Drop for VideoRecorder {
    fn drop(&mut self) {
        if let Some(collector) = self.collector.take() {
            collector.abort();
        }
    }
}

impl std::fmt::Debug for VideoRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoRecorder")
            .field("id", &self.id)
            .field("mime_type", &self.recorder.mime_type())
            .field("chunks", &self.chunk_count())
            .finish()
    }
}
