//! # Channel Buffer Groups
//!
//! Borrowed buffer descriptors exchanged with the converter.
//!
//! The caller owns all buffer memory for the duration of one conversion call;
//! the converter neither allocates nor retains anything across calls. An
//! interleaved source presents one input plane carrying every channel; a
//! planar source presents one plane per channel. Output is always one plane
//! per channel.

use crate::error::{ConvertError, Result};
use crate::format::StreamFormat;

/// One input buffer: a raw byte region and the channels it carries.
#[derive(Debug, Clone, Copy)]
pub struct InputPlane<'a> {
    data: &'a [u8],
    channels: usize,
}

impl<'a> InputPlane<'a> {
    /// Wrap a raw byte region carrying `channels` interleaved channels.
    pub fn new(data: &'a [u8], channels: usize) -> Self {
        Self { data, channels }
    }

    /// The raw byte region.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Channels carried by this plane.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Byte length of the region.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// One output buffer: a 64-bit float region for a single channel.
///
/// `len` reports how many samples the last conversion produced; a zero-frame
/// conversion marks every plane zero-length without touching the data.
#[derive(Debug)]
pub struct OutputPlane<'a> {
    data: &'a mut [f64],
    len: usize,
}

impl<'a> OutputPlane<'a> {
    /// Wrap a caller-owned sample region. Starts out zero-length.
    pub fn new(data: &'a mut [f64]) -> Self {
        Self { data, len: 0 }
    }

    /// Samples produced by the last conversion.
    pub fn samples(&self) -> &[f64] {
        &self.data[..self.len]
    }

    /// Number of valid samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no samples have been produced.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity of the underlying region in samples.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        self.data
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        self.len = len;
    }
}

/// Check that the buffer groups match the descriptor and frame count.
///
/// Runs before any sample is read so a mismatched group fails whole, never
/// with partial output.
pub(crate) fn validate_groups(
    format: &StreamFormat,
    input: &[InputPlane<'_>],
    output: &[OutputPlane<'_>],
    frames: usize,
) -> Result<()> {
    let expected = usize::from(format.channels);

    let carried: usize = input.iter().map(InputPlane::channels).sum();
    if carried != expected {
        return Err(ConvertError::ChannelCountMismatch {
            expected,
            actual: carried,
        });
    }

    if output.len() != expected {
        return Err(ConvertError::OutputPlaneCount {
            expected,
            actual: output.len(),
        });
    }

    let container = format.container_bytes() as usize;
    for (index, plane) in input.iter().enumerate() {
        let needed = frames * plane.channels() * container;
        if plane.byte_len() < needed {
            return Err(ConvertError::InputTooSmall {
                index,
                needed,
                actual: plane.byte_len(),
            });
        }
    }

    for (index, plane) in output.iter().enumerate() {
        if plane.capacity() < frames {
            return Err(ConvertError::OutputTooSmall {
                index,
                needed: frames,
                actual: plane.capacity(),
            });
        }
    }

    Ok(())
}
