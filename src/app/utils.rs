// SPDX-License-Identifier: MPL-2.0

//! Utility functions for input parsing and shared state access

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Parse a color string in format "#RRGGBB" (case-insensitive)
///
/// Returns the normalized lowercase form.
pub fn parse_hex_color(color_str: &str) -> Option<String> {
    let hex = color_str.trim().strip_prefix('#')?;
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("#{}", hex.to_ascii_lowercase()))
    } else {
        None
    }
}

/// Parse a number input field, rejecting empty and non-finite values
pub fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
