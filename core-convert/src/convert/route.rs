//! # Pathway Resolution
//!
//! Flattens the format combinatorics into a lookup: a small key derived from
//! the descriptor maps to one terminal kernel function, so every supported
//! combination is enumerable and testable in one place instead of being
//! buried in nested conditionals.

use crate::convert::{aligned, float, packed};
use crate::format::{Endianness, SampleAlignment, StreamFormat};

/// One channel's worth of conversion work.
///
/// `src` holds frames at a stride of `channels * container` bytes; the
/// samples for this channel start `channel * container` bytes in.
pub(crate) struct ChannelView<'a> {
    /// Raw input region shared by `channels` interleaved channels.
    pub src: &'a [u8],
    /// Index of the channel to gather.
    pub channel: usize,
    /// Channels sharing the region.
    pub channels: usize,
    /// Container width in bytes.
    pub container: usize,
    /// Frames to convert.
    pub frames: usize,
}

impl ChannelView<'_> {
    /// Byte stride between successive frames.
    pub fn stride(&self) -> usize {
        self.channels * self.container
    }

    /// Byte offset of this channel's first sample.
    pub fn offset(&self) -> usize {
        self.channel * self.container
    }
}

/// A terminal conversion kernel: gathers one channel from the view and writes
/// normalized `f64` samples. `shift` is the low-aligned pre-shift amount and
/// zero for every other pathway.
pub(crate) type KernelFn = fn(view: &ChannelView<'_>, shift: u32, dst: &mut [f64]);

/// A resolved pathway: the kernel plus its precomputed parameters.
pub(crate) struct Route {
    pub kernel: KernelFn,
    pub shift: u32,
}

impl Route {
    fn direct(kernel: KernelFn) -> Self {
        Self { kernel, shift: 0 }
    }

    fn shifted(kernel: KernelFn, shift: u32) -> Self {
        Self { kernel, shift }
    }
}

/// The dispatch key: everything that selects a terminal kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RouteKey {
    pub is_float: bool,
    pub bits: u32,
    pub container: u32,
    pub alignment: SampleAlignment,
    pub is_signed: bool,
    pub endianness: Endianness,
}

impl RouteKey {
    pub fn of(format: &StreamFormat) -> Self {
        Self {
            is_float: format.is_float,
            bits: format.bits_per_channel,
            container: format.container_bytes(),
            alignment: format.alignment,
            is_signed: format.is_signed,
            endianness: format.endianness,
        }
    }
}

/// Resolve a descriptor to its terminal kernel.
///
/// Returns `None` for the combinations deliberately left without a pathway
/// (3-byte-container aligned layouts) and for anything construction
/// validation should have rejected.
pub(crate) fn resolve(format: &StreamFormat) -> Option<Route> {
    let key = RouteKey::of(format);
    let little = key.endianness == Endianness::Little;

    if key.is_float {
        let kernel = match (key.bits, little) {
            (32, true) => float::f32_le as KernelFn,
            (32, false) => float::f32_be,
            (64, true) => float::f64_le,
            (64, false) => float::f64_be,
            _ => return None,
        };
        return Some(Route::direct(kernel));
    }

    match key.alignment {
        SampleAlignment::Packed => packed_kernel(key.container, key.is_signed, little)
            .map(Route::direct),

        // High-aligned values already sit where a packed read of the whole
        // container expects them; only 24-in-32 needs its own kernels because
        // a full-container read would pick up the padding byte. The 3-byte
        // container has no aligned pathway at all.
        SampleAlignment::High => match key.container {
            3 => None,
            4 if key.bits == 24 => {
                let kernel = match (key.is_signed, little) {
                    (true, true) => aligned::i24_in_le as KernelFn,
                    (true, false) => aligned::i24_in_be,
                    (false, true) => aligned::u24_in_le,
                    (false, false) => aligned::u24_in_be,
                };
                Some(Route::direct(kernel))
            }
            _ => packed_kernel(key.container, key.is_signed, little).map(Route::direct),
        },

        SampleAlignment::Low => {
            let shift = key.container.checked_mul(8)?.checked_sub(key.bits)?;
            let kernel = match (key.container, key.is_signed, little) {
                (1, true, _) => aligned::low8_signed as KernelFn,
                (1, false, _) => aligned::low8_unsigned,
                (2, true, true) => aligned::low16_signed_le,
                (2, true, false) => aligned::low16_signed_be,
                (2, false, true) => aligned::low16_unsigned_le,
                (2, false, false) => aligned::low16_unsigned_be,
                (4, true, true) => aligned::low32_signed_le,
                (4, true, false) => aligned::low32_signed_be,
                (4, false, true) => aligned::low32_unsigned_le,
                (4, false, false) => aligned::low32_unsigned_be,
                _ => return None,
            };
            Some(Route::shifted(kernel, shift))
        }
    }
}

fn packed_kernel(container: u32, signed: bool, little: bool) -> Option<KernelFn> {
    let kernel = match (container, signed, little) {
        (1, true, _) => packed::i8_samples as KernelFn,
        (1, false, _) => packed::u8_samples,
        (2, true, true) => packed::i16_le,
        (2, true, false) => packed::i16_be,
        (2, false, true) => packed::u16_le,
        (2, false, false) => packed::u16_be,
        (3, true, true) => aligned::i24_le,
        (3, true, false) => aligned::i24_be,
        (3, false, true) => aligned::u24_le,
        (3, false, false) => aligned::u24_be,
        (4, true, true) => packed::i32_le,
        (4, true, false) => packed::i32_be,
        (4, false, true) => packed::u32_le,
        (4, false, false) => packed::u32_be,
        _ => return None,
    };
    Some(kernel)
}
