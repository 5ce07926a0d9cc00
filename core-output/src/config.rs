//! # Output Configuration
//!
//! Tunables for the output session: ring sizing, start gating, and the
//! control-event queue.

use serde::{Deserialize, Serialize};

/// Output session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Lower bound on the ring capacity in frames, applied after the
    /// multiplier.
    ///
    /// Default: 16384 frames (~0.37s at 44.1kHz).
    #[serde(default = "default_ring_frames_min")]
    pub ring_frames_min: usize,

    /// Ring capacity as a multiple of the device's preferred buffer size.
    ///
    /// Default: 4.
    #[serde(default = "default_ring_multiplier")]
    pub ring_multiplier: usize,

    /// Ring fill fraction (0.0–1.0) required before `start()` succeeds.
    ///
    /// Starting an empty ring means the first callbacks play silence or
    /// underrun immediately.
    ///
    /// Default: 0.25.
    #[serde(default = "default_start_threshold")]
    pub start_threshold: f32,

    /// Maximum pending control events.
    ///
    /// Default: 1024.
    #[serde(default = "default_event_queue_capacity")]
    pub event_queue_capacity: usize,

    /// Override for the device's preferred buffer size, in frames.
    ///
    /// When set, ring sizing uses this instead of the driver's report. The
    /// value is clamped into the device's reported range.
    ///
    /// Default: none (trust the driver).
    #[serde(default)]
    pub preferred_buffer_frames: Option<u32>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ring_frames_min: default_ring_frames_min(),
            ring_multiplier: default_ring_multiplier(),
            start_threshold: default_start_threshold(),
            event_queue_capacity: default_event_queue_capacity(),
            preferred_buffer_frames: None,
        }
    }
}

impl OutputConfig {
    /// Configuration favoring low latency.
    ///
    /// - Small ring (2× the device buffer)
    /// - Starts nearly immediately
    pub fn low_latency() -> Self {
        Self {
            ring_frames_min: 2048,
            ring_multiplier: 2,
            start_threshold: 0.05,
            ..Default::default()
        }
    }

    /// Configuration favoring dropout resistance.
    ///
    /// - Large ring (8× the device buffer)
    /// - Starts only once half full
    pub fn high_stability() -> Self {
        Self {
            ring_frames_min: 65536,
            ring_multiplier: 8,
            start_threshold: 0.5,
            ..Default::default()
        }
    }

    /// Ring capacity in frames for a device-preferred buffer size.
    pub fn ring_frames(&self, preferred_buffer: u32) -> usize {
        (self.ring_multiplier * preferred_buffer as usize).max(self.ring_frames_min)
    }
}

fn default_ring_frames_min() -> usize {
    16384
}

fn default_ring_multiplier() -> usize {
    4
}

fn default_start_threshold() -> f32 {
    0.25
}

fn default_event_queue_capacity() -> usize {
    1024
}
