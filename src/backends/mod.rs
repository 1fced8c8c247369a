// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for capture devices and sensors
//!
//! This module provides the device-facing seams of the session:
//! - Camera acquisition, live streams and chunked recorders
//! - Ambient light readings for auto-tune
//! - A synthetic virtual camera used by the CLI and tests
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                   │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐    ┌──────────────────┐   │
//! │  │ Ambient     │    │     Camera       │   │
//! │  │ light sensor│    │ (trait + manager)│   │
//! │  └─────────────┘    └──────────────────┘   │
//! │                     ┌──────────────────┐   │
//! │                     │ Virtual Camera   │   │
//! │                     └──────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Camera backend traits and resolution negotiation
//! - [`sensor`]: Ambient light sensor trait and implementations
//! - [`virtual_camera`]: Synthetic camera, stream and recorder

pub mod camera;
pub mod sensor;
pub mod virtual_camera;
