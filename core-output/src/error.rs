//! # Output Error Types
//!
//! Error types for device integration and session control.

use crate::session::SessionState;
use core_convert::ConvertError;
use thiserror::Error;

/// Errors raised while negotiating with or driving an output device.
#[derive(Error, Debug)]
pub enum OutputError {
    // ========================================================================
    // Device Errors
    // ========================================================================
    /// The output device could not be reached.
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The driver reported a failure.
    #[error("driver error: {0}")]
    Driver(String),

    /// The device rejected the requested sample rate.
    #[error("sample rate not supported by device: {0} Hz")]
    UnsupportedSampleRate(f64),

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// The operation is not valid in the session's current state.
    #[error("invalid session state: expected {expected:?}, found {actual:?}")]
    InvalidState {
        /// State the operation requires.
        expected: SessionState,
        /// State the session was in.
        actual: SessionState,
    },

    /// The ring buffer has not accumulated enough audio to start.
    #[error("output buffer not sufficiently filled: {available} of {required} frames")]
    InsufficientBuffer {
        /// Frames currently queued.
        available: usize,
        /// Frames required by the start threshold.
        required: usize,
    },

    /// The session has no prepared device/converter to operate on.
    #[error("session is not prepared")]
    NotPrepared,

    // ========================================================================
    // Conversion Errors
    // ========================================================================
    /// The device's wire format was rejected by the sample converter.
    #[error("sample conversion failed: {0}")]
    Convert(#[from] ConvertError),
}

impl OutputError {
    /// Returns `true` if this error is transient and the operation can be
    /// retried once the device or buffer recovers.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            OutputError::DeviceUnavailable(_) | OutputError::InsufficientBuffer { .. }
        )
    }

    /// Returns `true` if this error came from the sample converter.
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, OutputError::Convert(_))
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(OutputError::DeviceUnavailable("gone".into()).is_transient());
        assert!(OutputError::InsufficientBuffer {
            available: 0,
            required: 1024
        }
        .is_transient());
        assert!(!OutputError::UnsupportedSampleRate(44100.0).is_transient());
    }

    #[test]
    fn convert_errors_bridge_across() {
        let err: OutputError = ConvertError::NonPcmEncoding("DSD".into()).into();
        assert!(err.is_conversion_error());
        assert!(err.to_string().contains("DSD"));
    }
}
