// SPDX-License-Identifier: GPL-3.0-only

//! Timesliced recorder for the virtual camera
//!
//! Emits one chunk per interval while the stream is live and a final chunk on
//! stop. The first chunk opens with the WebM/EBML magic so concatenated output
//! starts like a real container.

use crate::backends::camera::MediaRecorder;
use crate::backends::camera::types::{BackendError, BackendResult};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// EBML header magic
pub const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

/// Per-chunk tag
const CHUNK_TAG: &[u8; 4] = b"CHNK";

/// Recorder bound to a [`super::VirtualStream`]
pub struct VirtualRecorder {
    stream_live: Arc<AtomicBool>,
    interval: Duration,
    stop_sender: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl VirtualRecorder {
    pub fn new(stream_live: Arc<AtomicBool>, interval: Duration) -> Self {
        Self {
            stream_live,
            interval,
            stop_sender: None,
            task: None,
        }
    }
}

impl MediaRecorder for VirtualRecorder {
    fn start(&mut self, chunks: mpsc::UnboundedSender<Vec<u8>>) -> BackendResult<()> {
        if self.task.is_some() {
            return Err(BackendError::RecordingInProgress);
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| BackendError::NotAvailable(format!("no async runtime: {}", e)))?;

        let (stop_sender, mut stop_receiver) = oneshot::channel();
        let stream_live = Arc::clone(&self.stream_live);
        let interval = self.interval;

        let task = runtime.spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval_at(started + interval, interval);
            let mut sequence = 0u32;

            loop {
                tokio::select! {
                    _ = &mut stop_receiver => break,
                    _ = ticker.tick() => {
                        if !stream_live.load(Ordering::SeqCst) {
                            warn!("Stream ended while recording");
                            break;
                        }
                        let elapsed = started.elapsed();
                        if chunks.send(encode_chunk(sequence, elapsed)).is_err() {
                            return;
                        }
                        debug!(sequence, "Recorder chunk emitted");
                        sequence += 1;
                    }
                }
            }

            // Final flush; the sender drops with this task
            let _ = chunks.send(encode_chunk(sequence, started.elapsed()));
        });

        self.stop_sender = Some(stop_sender);
        self.task = Some(task);
        Ok(())
    }

    fn stop(&mut self) -> BoxFuture<'_, BackendResult<()>> {
        Box::pin(async move {
            let task = self.task.take().ok_or(BackendError::NoRecordingInProgress)?;
            if let Some(sender) = self.stop_sender.take() {
                // The task may already have exited on its own
                let _ = sender.send(());
            }
            task.await
                .map_err(|e| BackendError::Other(format!("recorder task failed: {}", e)))
        })
    }

    fn mime_type(&self) -> &str {
        "video/webm"
    }
}

impl Drop for VirtualRecorder {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Encode one recorder chunk
fn encode_chunk(sequence: u32, elapsed: Duration) -> Vec<u8> {
    let mut chunk = Vec::with_capacity(20);
    if sequence == 0 {
        chunk.extend_from_slice(&EBML_MAGIC);
    }
    chunk.extend_from_slice(CHUNK_TAG);
    chunk.extend_from_slice(&sequence.to_be_bytes());
    chunk.extend_from_slice(&(elapsed.as_millis() as u64).to_be_bytes());
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_chunks_arrive_in_order_and_close() {
        let live = Arc::new(AtomicBool::new(true));
        let mut recorder = VirtualRecorder::new(live, Duration::from_secs(1));
        let (sender, mut receiver) = mpsc::unbounded_channel();

        recorder.start(sender).unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        recorder.stop().await.unwrap();

        let mut chunks = Vec::new();
        while let Some(chunk) = receiver.recv().await {
            chunks.push(chunk);
        }

        // Two timeslices plus the final flush
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with(&EBML_MAGIC));
        for (index, chunk) in chunks.iter().enumerate().skip(1) {
            assert_eq!(&chunk[..4], CHUNK_TAG);
            assert_eq!(chunk[4..8], (index as u32).to_be_bytes());
        }
    }

    #[tokio::test]
    async fn test_stop_without_start_fails() {
        let mut recorder = VirtualRecorder::new(Arc::new(AtomicBool::new(true)), Duration::from_secs(1));
        assert_eq!(
            recorder.stop().await.unwrap_err(),
            BackendError::NoRecordingInProgress
        );
    }
}
