// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for photo and video capture
//!
//! Both pipelines read from the session's live stream without pausing the
//! preview. CPU-bound work runs on the blocking pool.
//!
//! # Pipeline Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │ selfie_<ts>.png      │
//! │   (RGBA)     │     │  - Filter bake    │     │                      │
//! │              │     │  - PNG encoding   │     │                      │
//! └──────────────┘     └───────────────────┘     └──────────────────────┘
//!
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────────────┐
//! │ MediaStream  │ ──▶ │  Video Recorder   │ ──▶ │ recording_<ts>_Ns.webm│
//! │              │     │  - Chunk collect  │     │                      │
//! │              │     │  - Elapsed timer  │     │                      │
//! └──────────────┘     └───────────────────┘     └──────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Snapshot capture with the current filter baked in
//! - [`video`]: Chunked clip recording with a once-per-second timer

pub mod photo;
pub mod video;
