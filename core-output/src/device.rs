//! # Device Capability Types
//!
//! What an output driver reports about itself: the wire sample type it wants
//! to be fed, its channel counts, buffer size limits, and latencies. The wire
//! catalogue maps each driver sample type to the
//! [`StreamFormat`](core_convert::StreamFormat) the converter consumes.

use core_convert::{Endianness, PcmEncoding, SampleAlignment, StreamFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample types an output driver can report for its channels.
///
/// Drivers feed and accept non-interleaved buffers, one per channel, so every
/// mapped format is planar. The `Int32Aligned` family carries fewer
/// significant bits at the bottom of a 4-byte container, common for 18/20/24
/// bit converters behind a 32-bit transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceSampleType {
    /// Packed signed 16-bit.
    Int16 {
        /// Byte order on the wire.
        endianness: Endianness,
    },
    /// Packed signed 24-bit (3 bytes per sample).
    Int24 {
        /// Byte order on the wire.
        endianness: Endianness,
    },
    /// Packed signed 32-bit.
    Int32 {
        /// Byte order on the wire.
        endianness: Endianness,
    },
    /// Single-precision float.
    Float32 {
        /// Byte order on the wire.
        endianness: Endianness,
    },
    /// Double-precision float.
    Float64 {
        /// Byte order on the wire.
        endianness: Endianness,
    },
    /// Signed samples low-aligned in a 4-byte container.
    Int32Aligned {
        /// Significant bits: 16, 18, 20, or 24.
        bits: u8,
        /// Byte order on the wire.
        endianness: Endianness,
    },
    /// Direct Stream Digital, 8 bits per byte. Reported by DSD-capable
    /// drivers; it has no PCM conversion pathway.
    DsdInt8 {
        /// Bit order marker as reported by the driver.
        endianness: Endianness,
    },
}

impl DeviceSampleType {
    /// Returns `true` if this wire type carries linear PCM.
    pub fn is_pcm(&self) -> bool {
        !matches!(self, DeviceSampleType::DsdInt8 { .. })
    }

    /// The stream descriptor a converter needs to consume this wire type.
    ///
    /// Drivers exchange one buffer per channel, so the descriptor is always
    /// planar.
    pub fn stream_format(&self, sample_rate: u32, channels: u16) -> StreamFormat {
        match *self {
            DeviceSampleType::Int16 { endianness } => {
                StreamFormat::packed_int(16, true, endianness, sample_rate, channels, false)
            }
            DeviceSampleType::Int24 { endianness } => {
                StreamFormat::packed_int(24, true, endianness, sample_rate, channels, false)
            }
            DeviceSampleType::Int32 { endianness } => {
                StreamFormat::packed_int(32, true, endianness, sample_rate, channels, false)
            }
            DeviceSampleType::Float32 { endianness } => {
                StreamFormat::float32(endianness, sample_rate, channels, false)
            }
            DeviceSampleType::Float64 { endianness } => {
                StreamFormat::float64(endianness, sample_rate, channels, false)
            }
            DeviceSampleType::Int32Aligned { bits, endianness } => StreamFormat::aligned_int(
                u32::from(bits),
                4,
                SampleAlignment::Low,
                true,
                endianness,
                sample_rate,
                channels,
                false,
            ),
            DeviceSampleType::DsdInt8 { endianness } => {
                let mut format =
                    StreamFormat::packed_int(8, true, endianness, sample_rate, channels, false);
                format.encoding = PcmEncoding::Dsd;
                format
            }
        }
    }
}

impl fmt::Display for DeviceSampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = |e: &Endianness| match e {
            Endianness::Little => "lsb",
            Endianness::Big => "msb",
        };
        match self {
            DeviceSampleType::Int16 { endianness } => write!(f, "int16 {}", suffix(endianness)),
            DeviceSampleType::Int24 { endianness } => write!(f, "int24 {}", suffix(endianness)),
            DeviceSampleType::Int32 { endianness } => write!(f, "int32 {}", suffix(endianness)),
            DeviceSampleType::Float32 { endianness } => {
                write!(f, "float32 {}", suffix(endianness))
            }
            DeviceSampleType::Float64 { endianness } => {
                write!(f, "float64 {}", suffix(endianness))
            }
            DeviceSampleType::Int32Aligned { bits, endianness } => {
                write!(f, "int32/{bits} {}", suffix(endianness))
            }
            DeviceSampleType::DsdInt8 { endianness } => {
                write!(f, "dsd int8 {}", suffix(endianness))
            }
        }
    }
}

/// Buffer size limits reported by a driver, in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSizeRange {
    /// Smallest usable buffer.
    pub min: u32,
    /// Largest usable buffer.
    pub max: u32,
    /// The driver's preferred buffer size.
    pub preferred: u32,
    /// Step between valid sizes; drivers report 0 or -1 for power-of-two
    /// progressions.
    pub granularity: i32,
}

impl BufferSizeRange {
    /// Clamp a requested size into the reported range.
    pub fn clamp(&self, frames: u32) -> u32 {
        frames.clamp(self.min, self.max)
    }
}

/// Capability snapshot captured when a session prepares a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Driver-reported device name.
    pub name: String,
    /// Available input channels.
    pub input_channels: u32,
    /// Available output channels.
    pub output_channels: u32,
    /// Buffer size limits in frames.
    pub buffer_sizes: BufferSizeRange,
    /// Input latency in frames, valid after buffer creation.
    pub input_latency: u32,
    /// Output latency in frames, valid after buffer creation.
    pub output_latency: u32,
    /// Wire sample type of the output channels.
    pub sample_type: DeviceSampleType,
    /// Current device sample rate.
    pub sample_rate: f64,
    /// `true` if the driver supports the output-ready notification, letting
    /// the callback signal that all data is in place.
    pub post_output_ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_convert::Converter;

    fn info_types() -> Vec<DeviceSampleType> {
        let mut types = Vec::new();
        for endianness in [Endianness::Little, Endianness::Big] {
            types.push(DeviceSampleType::Int16 { endianness });
            types.push(DeviceSampleType::Int24 { endianness });
            types.push(DeviceSampleType::Int32 { endianness });
            types.push(DeviceSampleType::Float32 { endianness });
            types.push(DeviceSampleType::Float64 { endianness });
            for bits in [16u8, 18, 20, 24] {
                types.push(DeviceSampleType::Int32Aligned { bits, endianness });
            }
        }
        types
    }

    #[test]
    fn every_pcm_wire_type_builds_a_converter() {
        for sample_type in info_types() {
            let format = sample_type.stream_format(48000, 2);
            assert!(!format.interleaved);
            assert!(
                Converter::new(format).is_ok(),
                "{sample_type} must be convertible"
            );
        }
    }

    #[test]
    fn aligned_wire_types_declare_low_alignment() {
        let sample_type = DeviceSampleType::Int32Aligned {
            bits: 20,
            endianness: Endianness::Little,
        };
        let format = sample_type.stream_format(96000, 2);
        assert_eq!(format.alignment, SampleAlignment::Low);
        assert_eq!(format.bits_per_channel, 20);
        assert_eq!(format.container_bytes(), 4);
    }

    #[test]
    fn dsd_is_flagged_non_pcm_and_rejected() {
        let sample_type = DeviceSampleType::DsdInt8 {
            endianness: Endianness::Little,
        };
        assert!(!sample_type.is_pcm());
        let format = sample_type.stream_format(2_822_400, 2);
        let err = Converter::new(format).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn buffer_range_clamps_requests() {
        let range = BufferSizeRange {
            min: 64,
            max: 4096,
            preferred: 512,
            granularity: -1,
        };
        assert_eq!(range.clamp(32), 64);
        assert_eq!(range.clamp(512), 512);
        assert_eq!(range.clamp(1 << 20), 4096);
    }

    #[test]
    fn device_info_serde_round_trip() {
        let info = DeviceInfo {
            name: "Test Driver".into(),
            input_channels: 0,
            output_channels: 2,
            buffer_sizes: BufferSizeRange {
                min: 64,
                max: 4096,
                preferred: 512,
                granularity: -1,
            },
            input_latency: 0,
            output_latency: 640,
            sample_type: DeviceSampleType::Int32Aligned {
                bits: 24,
                endianness: Endianness::Little,
            },
            sample_rate: 48000.0,
            post_output_ready: true,
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: DeviceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, back);
    }
}
