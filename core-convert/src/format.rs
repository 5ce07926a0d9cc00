//! # Stream Format Descriptors
//!
//! Describes how raw PCM audio is physically encoded: bit depth, container
//! width, endianness, signedness, packing/alignment, and interleaving.
//!
//! A [`StreamFormat`] is set once when a converter is constructed and never
//! changes afterwards. The container byte width is not stored directly; it is
//! derived from the frame byte stride and the number of channels sharing that
//! stride, which is how drivers and file readers actually report it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoding family reported by a driver or container.
///
/// Only [`PcmEncoding::LinearPcm`] is convertible. The other variants exist so
/// a descriptor can carry what the device actually reported and be rejected
/// with a precise configuration error instead of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PcmEncoding {
    /// Linear, uncompressed PCM.
    LinearPcm,
    /// A-law companded PCM (8-bit).
    ALaw,
    /// µ-law companded PCM (8-bit).
    MuLaw,
    /// Direct Stream Digital (1-bit delta-sigma).
    Dsd,
}

impl PcmEncoding {
    /// Returns `true` for linear PCM, the only convertible encoding.
    pub fn is_linear(&self) -> bool {
        matches!(self, PcmEncoding::LinearPcm)
    }
}

impl fmt::Display for PcmEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PcmEncoding::LinearPcm => "linear PCM",
            PcmEncoding::ALaw => "A-law",
            PcmEncoding::MuLaw => "mu-law",
            PcmEncoding::Dsd => "DSD",
        };
        write!(f, "{name}")
    }
}

/// Byte order of multi-byte samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endianness {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endianness {
    /// The byte order of the machine this code runs on.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    /// Returns `true` if this byte order matches the machine's.
    pub fn is_native(&self) -> bool {
        *self == Self::native()
    }
}

/// Position of the significant bits within the storage container.
///
/// Exactly one variant applies to an integer source. Floating-point sources
/// always fill their container and ignore this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleAlignment {
    /// Every bit of the container is significant.
    Packed,
    /// Significant bits occupy the most-significant end, padding below.
    High,
    /// Significant bits occupy the least-significant end, padding above.
    Low,
}

/// Immutable description of a PCM sample stream's physical layout.
///
/// All fields are public; the preset constructors cover the layouts produced
/// by real drivers and file readers. Invariants are enforced when the format
/// is handed to [`Converter::new`](crate::Converter::new), not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFormat {
    /// Encoding family. Only linear PCM converts.
    pub encoding: PcmEncoding,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of audio channels.
    pub channels: u16,
    /// `true` if one buffer carries all channels frame by frame; `false` if
    /// each channel occupies its own buffer.
    pub interleaved: bool,
    /// `true` for floating-point samples.
    pub is_float: bool,
    /// `true` for signed integer samples. Ignored for floats.
    pub is_signed: bool,
    /// Byte order of multi-byte samples.
    pub endianness: Endianness,
    /// Packing/alignment of integer samples. Ignored for floats.
    pub alignment: SampleAlignment,
    /// Number of semantically meaningful bits per sample.
    pub bits_per_channel: u32,
    /// Bytes physically occupied by one frame of one buffer.
    pub bytes_per_frame: u32,
}

impl StreamFormat {
    /// Packed integer layout: every container bit is significant.
    pub fn packed_int(
        bits: u32,
        signed: bool,
        endianness: Endianness,
        sample_rate: u32,
        channels: u16,
        interleaved: bool,
    ) -> Self {
        let stride_channels = if interleaved { u32::from(channels) } else { 1 };
        Self {
            encoding: PcmEncoding::LinearPcm,
            sample_rate,
            channels,
            interleaved,
            is_float: false,
            is_signed: signed,
            endianness,
            alignment: SampleAlignment::Packed,
            bits_per_channel: bits,
            bytes_per_frame: (bits / 8) * stride_channels,
        }
    }

    /// Integer layout padded inside a wider container.
    #[allow(clippy::too_many_arguments)]
    pub fn aligned_int(
        bits: u32,
        container_bytes: u32,
        alignment: SampleAlignment,
        signed: bool,
        endianness: Endianness,
        sample_rate: u32,
        channels: u16,
        interleaved: bool,
    ) -> Self {
        let stride_channels = if interleaved { u32::from(channels) } else { 1 };
        Self {
            encoding: PcmEncoding::LinearPcm,
            sample_rate,
            channels,
            interleaved,
            is_float: false,
            is_signed: signed,
            endianness,
            alignment,
            bits_per_channel: bits,
            bytes_per_frame: container_bytes * stride_channels,
        }
    }

    /// Single-precision floating-point layout.
    pub fn float32(
        endianness: Endianness,
        sample_rate: u32,
        channels: u16,
        interleaved: bool,
    ) -> Self {
        Self::float(32, endianness, sample_rate, channels, interleaved)
    }

    /// Double-precision floating-point layout.
    pub fn float64(
        endianness: Endianness,
        sample_rate: u32,
        channels: u16,
        interleaved: bool,
    ) -> Self {
        Self::float(64, endianness, sample_rate, channels, interleaved)
    }

    fn float(
        bits: u32,
        endianness: Endianness,
        sample_rate: u32,
        channels: u16,
        interleaved: bool,
    ) -> Self {
        let stride_channels = if interleaved { u32::from(channels) } else { 1 };
        Self {
            encoding: PcmEncoding::LinearPcm,
            sample_rate,
            channels,
            interleaved,
            is_float: true,
            is_signed: true,
            endianness,
            alignment: SampleAlignment::Packed,
            bits_per_channel: bits,
            bytes_per_frame: (bits / 8) * stride_channels,
        }
    }

    /// The canonical destination layout: planar, 64-bit float, native order.
    pub fn planar_f64(sample_rate: u32, channels: u16) -> Self {
        Self::float64(Endianness::native(), sample_rate, channels, false)
    }

    /// Channels sharing one buffer's frame stride: all of them when
    /// interleaved, one otherwise.
    pub fn interleaved_channel_count(&self) -> u32 {
        if self.interleaved {
            u32::from(self.channels)
        } else {
            1
        }
    }

    /// Bytes occupied per sample per channel, derived from the frame stride.
    ///
    /// Returns 0 for a degenerate descriptor (zero channels); construction
    /// validation rejects those before this value is ever used.
    pub fn container_bytes(&self) -> u32 {
        let stride_channels = self.interleaved_channel_count();
        if stride_channels == 0 {
            0
        } else {
            self.bytes_per_frame / stride_channels
        }
    }

    /// Returns `true` if the significant bits fill the container exactly.
    pub fn fills_container(&self) -> bool {
        self.bits_per_channel == 8 * self.container_bytes()
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_float {
            "f"
        } else if self.is_signed {
            "s"
        } else {
            "u"
        };
        write!(f, "{kind}{}", self.bits_per_channel)?;
        if self.container_bytes() > 1 {
            match self.endianness {
                Endianness::Little => write!(f, "le")?,
                Endianness::Big => write!(f, "be")?,
            }
        }
        if !self.is_float {
            match self.alignment {
                SampleAlignment::Packed => {}
                SampleAlignment::High => {
                    write!(f, " high-aligned in {} bytes", self.container_bytes())?
                }
                SampleAlignment::Low => {
                    write!(f, " low-aligned in {} bytes", self.container_bytes())?
                }
            }
        }
        write!(
            f,
            " ({}, {} ch @ {} Hz)",
            if self.interleaved {
                "interleaved"
            } else {
                "planar"
            },
            self.channels,
            self.sample_rate
        )
    }
}
