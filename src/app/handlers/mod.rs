// SPDX-License-Identifier: GPL-3.0-only

//! Session operation handlers
//!
//! This module organizes the session's operations by functional domain,
//! keeping related functionality together for easier maintenance.

pub mod auto_tune;
pub mod camera;
pub mod capture;
pub mod color;
pub mod presets;
