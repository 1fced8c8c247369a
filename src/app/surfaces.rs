// SPDX-License-Identifier: GPL-3.0-only

//! Outer surfaces the session talks to
//!
//! The session never renders anything itself. User-facing messages go through
//! a [`Notifier`], captured files through a [`DownloadSink`] and the preview
//! filter through a [`crate::filters::FilterSink`].

use crate::filters::FilterSink;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// User-facing messages and dialogs
pub trait Notifier: Send + Sync {
    /// Transient, non-blocking message
    fn toast(&self, message: &str);

    /// Blocking error message
    fn alert(&self, message: &str);

    /// Ask for a line of text; `None` when cancelled
    fn prompt(&self, message: &str) -> Option<String>;

    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> bool;

    /// Recording indicator: `Some("MM:SS")` while recording, `None` to hide it
    fn recording_timer(&self, _label: Option<&str>) {}

    /// Enable or disable the auto mode control
    fn auto_mode_available(&self, _available: bool) {}
}

/// Destination for captured photos and recordings
pub trait DownloadSink: Send + Sync {
    /// Store `data` under `filename`, returning where it ended up
    fn save(&self, filename: &str, mime_type: &str, data: &[u8]) -> std::io::Result<PathBuf>;
}

/// Writes downloads into a directory, creating it on first use
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownloads {
    fn save(&self, filename: &str, mime_type: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, data)?;
        info!(path = %path.display(), mime_type, size = data.len(), "Download written");
        Ok(path)
    }
}

/// Preview sink for headless sessions; logs each write
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFilterSink;

impl FilterSink for LogFilterSink {
    fn apply_filter(&self, css: &str) {
        debug!(filter = css, "Preview filter applied");
    }

    fn apply_background(&self, color: &str) {
        debug!(color, "Preview background applied");
    }
}
