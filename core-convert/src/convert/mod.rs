//! # Sample Converter
//!
//! The [`Converter`] is built once from an immutable [`StreamFormat`] and
//! repeatedly transforms raw input buffers into planar, normalized `f64`
//! output for a given frame count.
//!
//! Construction validates the descriptor against the supported encoding
//! matrix and derives the fixed destination format. Each conversion call
//! validates the caller's buffer groups, resolves the terminal kernel for the
//! layout, and gathers one output channel at a time: the deinterleaving
//! step. The call is synchronous, allocation-free, and linear in
//! `frames × channels`, so it can run directly on a real-time audio thread.

mod aligned;
mod float;
mod packed;
mod route;

use crate::buffers::{self, InputPlane, OutputPlane};
use crate::error::{ConvertError, Result};
use crate::format::{SampleAlignment, StreamFormat};
use tracing::{debug, warn};

/// Converts raw PCM buffers into canonical planar `f64` audio.
///
/// Holds no mutable state beyond the two descriptors fixed at construction;
/// independent instances may convert concurrently, and a single instance is
/// driven sequentially by one thread at a time.
#[derive(Debug)]
pub struct Converter {
    source: StreamFormat,
    destination: StreamFormat,
}

impl Converter {
    /// Build a converter for the given source layout.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the unsupported field combination
    /// when the descriptor lies outside the supported matrix: a non-PCM
    /// encoding, a packed bit depth outside {8, 16, 24, 32}, a container
    /// width outside 1..=4, or an aligned bit depth that does not fit its
    /// container.
    pub fn new(source: StreamFormat) -> Result<Self> {
        validate(&source)?;

        let destination = StreamFormat::planar_f64(source.sample_rate, source.channels);
        debug!(source = %source, destination = %destination, "sample converter ready");

        // 3-byte-container aligned layouts pass construction but have no
        // conversion pathway; flag them now so the failure is not a surprise
        // on the audio thread.
        if route::resolve(&source).is_none() {
            warn!(source = %source, "layout has no conversion pathway; convert() will fail");
        }

        Ok(Self {
            source,
            destination,
        })
    }

    /// The source layout this converter was built for.
    pub fn source_format(&self) -> &StreamFormat {
        &self.source
    }

    /// The derived destination layout: planar `f64`, native order, same
    /// sample rate and channel count as the source.
    pub fn destination_format(&self) -> &StreamFormat {
        &self.destination
    }

    /// Convert `frames` frames from `input` into `output`.
    ///
    /// Produces exactly `frames` normalized samples per channel and returns
    /// `frames`. A zero frame count marks every output plane zero-length,
    /// reads nothing, and returns 0; this is the only no-op path.
    ///
    /// Output plane `i` always corresponds to source channel `i`; an
    /// interleaved source deinterleaves by gathering every stride-th sample
    /// starting at each channel's offset.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-layout error if no terminal kernel exists for
    /// the source descriptor, or a buffer error if the groups do not match
    /// the descriptor and frame count. No partial output is produced.
    pub fn convert(
        &self,
        input: &[InputPlane<'_>],
        output: &mut [OutputPlane<'_>],
        frames: usize,
    ) -> Result<usize> {
        if frames == 0 {
            for plane in output.iter_mut() {
                plane.set_len(0);
            }
            return Ok(0);
        }

        buffers::validate_groups(&self.source, input, output, frames)?;

        let route = route::resolve(&self.source)
            .ok_or_else(|| ConvertError::UnsupportedLayout(self.source.to_string()))?;

        let container = self.source.container_bytes() as usize;
        let mut out_index = 0;
        for plane in input {
            for channel in 0..plane.channels() {
                let view = route::ChannelView {
                    src: plane.data(),
                    channel,
                    channels: plane.channels(),
                    container,
                    frames,
                };
                let dst = &mut output[out_index];
                (route.kernel)(&view, route.shift, dst.data_mut());
                dst.set_len(frames);
                out_index += 1;
            }
        }

        Ok(frames)
    }
}

fn validate(format: &StreamFormat) -> Result<()> {
    if !format.encoding.is_linear() {
        return Err(ConvertError::NonPcmEncoding(format.encoding.to_string()));
    }
    if format.channels == 0 {
        return Err(ConvertError::InvalidChannelCount(format.channels));
    }
    if format.sample_rate == 0 {
        return Err(ConvertError::InvalidSampleRate(format.sample_rate));
    }

    let stride_channels = format.interleaved_channel_count();
    if format.bytes_per_frame == 0 || format.bytes_per_frame % stride_channels != 0 {
        return Err(ConvertError::InvalidFrameStride {
            bytes_per_frame: format.bytes_per_frame,
            channels: stride_channels,
        });
    }

    let bits = format.bits_per_channel;
    let container = format.container_bytes();

    if format.is_float {
        if !matches!(bits, 32 | 64) {
            return Err(ConvertError::UnsupportedBitDepth {
                bits,
                layout: "floating-point",
            });
        }
        if container != bits / 8 {
            return Err(ConvertError::ContainerBitDepthMismatch {
                bits,
                container_bytes: container,
            });
        }
        return Ok(());
    }

    match format.alignment {
        SampleAlignment::Packed => {
            if !matches!(bits, 8 | 16 | 24 | 32) {
                return Err(ConvertError::UnsupportedBitDepth {
                    bits,
                    layout: "packed",
                });
            }
            if container != bits / 8 {
                return Err(ConvertError::ContainerBitDepthMismatch {
                    bits,
                    container_bytes: container,
                });
            }
        }
        SampleAlignment::High | SampleAlignment::Low => {
            if !matches!(container, 1..=4) {
                return Err(ConvertError::UnsupportedContainerWidth { bytes: container });
            }
            if bits == 0 || bits > 8 * container {
                return Err(ConvertError::UnsupportedBitDepth {
                    bits,
                    layout: "aligned",
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Endianness;

    #[test]
    fn rejects_packed_12_bit() {
        let format = StreamFormat::packed_int(12, true, Endianness::Little, 44100, 2, true);
        let err = Converter::new(format).unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(
            err,
            ConvertError::UnsupportedBitDepth {
                bits: 12,
                layout: "packed"
            }
        ));
    }

    #[test]
    fn rejects_non_pcm_encoding() {
        let mut format = StreamFormat::packed_int(16, true, Endianness::Little, 44100, 2, true);
        format.encoding = crate::format::PcmEncoding::MuLaw;
        let err = Converter::new(format).unwrap_err();
        assert!(matches!(err, ConvertError::NonPcmEncoding(_)));
    }

    #[test]
    fn rejects_zero_channels_and_zero_rate() {
        let format = StreamFormat::packed_int(16, true, Endianness::Little, 44100, 0, true);
        assert!(matches!(
            Converter::new(format),
            Err(ConvertError::InvalidChannelCount(0))
        ));

        let format = StreamFormat::packed_int(16, true, Endianness::Little, 0, 2, true);
        assert!(matches!(
            Converter::new(format),
            Err(ConvertError::InvalidSampleRate(0))
        ));
    }

    #[test]
    fn rejects_float_bit_depths_other_than_32_and_64() {
        let mut format = StreamFormat::float32(Endianness::Little, 48000, 2, true);
        format.bits_per_channel = 16;
        format.bytes_per_frame = 4;
        let err = Converter::new(format).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedBitDepth {
                bits: 16,
                layout: "floating-point"
            }
        ));
    }

    #[test]
    fn rejects_oversized_aligned_bit_depth() {
        let format = StreamFormat::aligned_int(
            24,
            2,
            SampleAlignment::High,
            true,
            Endianness::Little,
            44100,
            1,
            false,
        );
        let err = Converter::new(format).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedBitDepth {
                bits: 24,
                layout: "aligned"
            }
        ));
    }

    #[test]
    fn accepts_wide_aligned_container_with_driver_bit_depths() {
        for bits in [16, 18, 20, 24] {
            let format = StreamFormat::aligned_int(
                bits,
                4,
                SampleAlignment::Low,
                true,
                Endianness::Little,
                48000,
                2,
                false,
            );
            assert!(Converter::new(format).is_ok(), "{bits}-in-32 must construct");
        }
    }

    #[test]
    fn destination_format_is_fixed() {
        let format = StreamFormat::packed_int(16, true, Endianness::Big, 96000, 4, true);
        let converter = Converter::new(format).unwrap();
        let dest = converter.destination_format();
        assert!(dest.is_float);
        assert_eq!(dest.bits_per_channel, 64);
        assert!(!dest.interleaved);
        assert_eq!(dest.sample_rate, 96000);
        assert_eq!(dest.channels, 4);
    }

    #[test]
    fn zero_frames_is_a_no_op() {
        let format = StreamFormat::packed_int(16, true, Endianness::Little, 44100, 2, true);
        let converter = Converter::new(format).unwrap();

        // Deliberately empty input: the zero-frame path must not read it.
        let input = [InputPlane::new(&[], 2)];
        let mut left = [1.0f64; 4];
        let mut right = [1.0f64; 4];
        let mut output = [OutputPlane::new(&mut left), OutputPlane::new(&mut right)];

        let produced = converter.convert(&input, &mut output, 0).unwrap();
        assert_eq!(produced, 0);
        assert!(output.iter().all(OutputPlane::is_empty));
    }

    #[test]
    fn three_byte_aligned_container_fails_at_convert() {
        let format = StreamFormat::aligned_int(
            16,
            3,
            SampleAlignment::High,
            true,
            Endianness::Little,
            44100,
            1,
            false,
        );
        let converter = Converter::new(format).unwrap();

        let raw = [0u8; 12];
        let input = [InputPlane::new(&raw, 1)];
        let mut mono = [0.0f64; 4];
        let mut output = [OutputPlane::new(&mut mono)];

        let err = converter.convert(&input, &mut output, 4).unwrap_err();
        assert!(err.is_unsupported_format());
    }
}
