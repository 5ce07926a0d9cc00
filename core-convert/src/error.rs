//! # Conversion Error Types
//!
//! Error types for sample-format conversion.

use thiserror::Error;

/// Errors raised while building or driving a [`Converter`](crate::Converter).
///
/// Two semantic classes exist: configuration errors, raised at construction
/// when the descriptor lies outside the supported encoding matrix, and
/// unsupported-layout errors, raised at conversion time for combinations that
/// are deliberately left without a conversion pathway. Buffer errors cover
/// caller-supplied buffer groups that do not match the descriptor; no partial
/// output is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    // ========================================================================
    // Configuration Errors (construction)
    // ========================================================================
    /// The descriptor declares an encoding other than linear PCM.
    #[error("only linear PCM sources are supported, got {0}")]
    NonPcmEncoding(String),

    /// The descriptor declares zero channels.
    #[error("invalid channel count: {0}")]
    InvalidChannelCount(u16),

    /// The descriptor declares a zero sample rate.
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    /// The frame stride does not divide evenly across the interleaved channels.
    #[error("frame stride of {bytes_per_frame} bytes is not divisible across {channels} interleaved channel(s)")]
    InvalidFrameStride {
        /// Declared bytes per frame.
        bytes_per_frame: u32,
        /// Channels sharing the frame stride.
        channels: u32,
    },

    /// The bit depth is outside the supported set for the declared layout.
    #[error("unsupported {layout} bit depth: {bits} bits")]
    UnsupportedBitDepth {
        /// Declared bits per channel.
        bits: u32,
        /// Layout the bit depth was declared for ("floating-point", "packed", "aligned").
        layout: &'static str,
    },

    /// The container byte width is outside the supported set.
    #[error("unsupported container width: {bytes} bytes")]
    UnsupportedContainerWidth {
        /// Derived container width in bytes.
        bytes: u32,
    },

    /// A packed bit depth that cannot occupy the derived container.
    #[error("{bits}-bit packed samples cannot occupy a {container_bytes}-byte container")]
    ContainerBitDepthMismatch {
        /// Declared bits per channel.
        bits: u32,
        /// Derived container width in bytes.
        container_bytes: u32,
    },

    // ========================================================================
    // Unsupported Layout (conversion dispatch)
    // ========================================================================
    /// No conversion pathway exists for the resolved layout.
    ///
    /// Reachable only for combinations that are deliberately unimplemented
    /// (3-byte-container aligned layouts); everything else is rejected at
    /// construction.
    #[error("no conversion pathway for {0}")]
    UnsupportedLayout(String),

    // ========================================================================
    // Buffer Errors (conversion)
    // ========================================================================
    /// The input planes carry a different channel total than the descriptor.
    #[error("channel count mismatch: format declares {expected} channel(s), input planes carry {actual}")]
    ChannelCountMismatch {
        /// Channels declared by the stream format.
        expected: usize,
        /// Channels carried by the input plane group.
        actual: usize,
    },

    /// The output group does not hold one plane per channel.
    #[error("output group holds {actual} plane(s), expected {expected}")]
    OutputPlaneCount {
        /// Planes required (one per channel).
        expected: usize,
        /// Planes supplied.
        actual: usize,
    },

    /// An input plane is too small for the requested frame count.
    #[error("input plane {index} holds {actual} bytes, {needed} required")]
    InputTooSmall {
        /// Index of the offending plane.
        index: usize,
        /// Bytes required for the requested frames.
        needed: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// An output plane is too small for the requested frame count.
    #[error("output plane {index} holds {actual} samples, {needed} required")]
    OutputTooSmall {
        /// Index of the offending plane.
        index: usize,
        /// Samples required for the requested frames.
        needed: usize,
        /// Samples supplied.
        actual: usize,
    },
}

impl ConvertError {
    /// Returns `true` if this error describes a rejected stream descriptor.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ConvertError::NonPcmEncoding(_)
                | ConvertError::InvalidChannelCount(_)
                | ConvertError::InvalidSampleRate(_)
                | ConvertError::InvalidFrameStride { .. }
                | ConvertError::UnsupportedBitDepth { .. }
                | ConvertError::UnsupportedContainerWidth { .. }
                | ConvertError::ContainerBitDepthMismatch { .. }
        )
    }

    /// Returns `true` if this error names a layout without a conversion pathway.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ConvertError::UnsupportedLayout(_))
    }

    /// Returns `true` if this error describes a mismatched buffer group.
    pub fn is_buffer_error(&self) -> bool {
        matches!(
            self,
            ConvertError::ChannelCountMismatch { .. }
                | ConvertError::OutputPlaneCount { .. }
                | ConvertError::InputTooSmall { .. }
                | ConvertError::OutputTooSmall { .. }
        )
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification() {
        let err = ConvertError::UnsupportedBitDepth {
            bits: 12,
            layout: "packed",
        };
        assert!(err.is_configuration());
        assert!(!err.is_unsupported_format());

        let err = ConvertError::UnsupportedLayout("x".into());
        assert!(err.is_unsupported_format());
        assert!(!err.is_configuration());

        let err = ConvertError::InputTooSmall {
            index: 0,
            needed: 64,
            actual: 32,
        };
        assert!(err.is_buffer_error());
    }

    #[test]
    fn error_display_names_offending_values() {
        let err = ConvertError::UnsupportedBitDepth {
            bits: 12,
            layout: "packed",
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("packed"));

        let err = ConvertError::OutputTooSmall {
            index: 1,
            needed: 512,
            actual: 256,
        };
        assert!(err.to_string().contains("512"));
        assert!(err.to_string().contains("256"));
    }
}
