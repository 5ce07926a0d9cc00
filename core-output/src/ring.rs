//! # Planar Frame Ring Buffer
//!
//! Carries converted planar `f64` audio from the producer (decode/convert)
//! side to the device callback. Capacity is fixed at creation; positions are
//! frame-granular so a reader always gets whole frames across every channel.
//!
//! Writes are bounded: a full ring accepts nothing rather than overwriting
//! audio the callback has not consumed yet.

use core_convert::OutputPlane;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A fixed-capacity ring of planar audio frames. Cloning shares the buffer.
#[derive(Clone)]
pub struct FrameRing {
    inner: Arc<RingInner>,
}

struct RingInner {
    /// Channel-major storage: lane `c` occupies
    /// `lanes[c * capacity .. (c + 1) * capacity]`.
    lanes: Mutex<Vec<f64>>,
    channels: usize,
    capacity: usize,
    /// Monotonic frame counters; `write_pos - read_pos` is the fill level.
    write_pos: AtomicUsize,
    read_pos: AtomicUsize,
}

impl FrameRing {
    /// Create a ring holding `capacity_frames` frames of `channels` channels.
    pub fn new(channels: usize, capacity_frames: usize) -> Self {
        Self {
            inner: Arc::new(RingInner {
                lanes: Mutex::new(vec![0.0; channels * capacity_frames]),
                channels,
                capacity: capacity_frames,
                write_pos: AtomicUsize::new(0),
                read_pos: AtomicUsize::new(0),
            }),
        }
    }

    /// Write planar frames, one slice per channel, all equally long.
    ///
    /// Returns the number of frames actually written; a full ring writes
    /// fewer (possibly zero) frames rather than overwriting queued audio.
    pub fn write_planes(&self, planes: &[&[f64]]) -> usize {
        if planes.len() != self.inner.channels {
            return 0;
        }
        let frames = planes.iter().map(|p| p.len()).min().unwrap_or(0);
        if frames == 0 {
            return 0;
        }

        let mut lanes = self.inner.lanes.lock();
        let write_pos = self.inner.write_pos.load(Ordering::Acquire);
        let read_pos = self.inner.read_pos.load(Ordering::Acquire);
        let free = self.inner.capacity - (write_pos - read_pos);
        let to_write = frames.min(free);

        for (channel, plane) in planes.iter().enumerate() {
            let lane = &mut lanes[channel * self.inner.capacity..(channel + 1) * self.inner.capacity];
            for (i, &sample) in plane[..to_write].iter().enumerate() {
                lane[(write_pos + i) % self.inner.capacity] = sample;
            }
        }

        self.inner
            .write_pos
            .store(write_pos + to_write, Ordering::Release);
        to_write
    }

    /// Write the planes produced by a conversion call.
    pub fn write_converted(&self, planes: &[OutputPlane<'_>]) -> usize {
        let views: Vec<&[f64]> = planes.iter().map(OutputPlane::samples).collect();
        self.write_planes(&views)
    }

    /// Read whole frames into one slice per channel, all equally long.
    ///
    /// Fills as many frames as are available, up to the slice length, and
    /// returns the count.
    pub fn read_frames(&self, out: &mut [&mut [f64]]) -> usize {
        if out.len() != self.inner.channels {
            return 0;
        }
        let wanted = out.iter().map(|p| p.len()).min().unwrap_or(0);
        if wanted == 0 {
            return 0;
        }

        let lanes = self.inner.lanes.lock();
        let write_pos = self.inner.write_pos.load(Ordering::Acquire);
        let read_pos = self.inner.read_pos.load(Ordering::Acquire);
        let available = write_pos - read_pos;
        let to_read = wanted.min(available);

        for (channel, plane) in out.iter_mut().enumerate() {
            let lane = &lanes[channel * self.inner.capacity..(channel + 1) * self.inner.capacity];
            for (i, sample) in plane[..to_read].iter_mut().enumerate() {
                *sample = lane[(read_pos + i) % self.inner.capacity];
            }
        }

        self.inner
            .read_pos
            .store(read_pos + to_read, Ordering::Release);
        to_read
    }

    /// Frames queued and not yet read.
    pub fn available_frames(&self) -> usize {
        let write_pos = self.inner.write_pos.load(Ordering::Acquire);
        let read_pos = self.inner.read_pos.load(Ordering::Acquire);
        write_pos - read_pos
    }

    /// Frames that can be written before the ring is full.
    pub fn free_frames(&self) -> usize {
        self.inner.capacity - self.available_frames()
    }

    /// Total capacity in frames.
    pub fn capacity_frames(&self) -> usize {
        self.inner.capacity
    }

    /// Channels per frame.
    pub fn channels(&self) -> usize {
        self.inner.channels
    }

    /// Fill level from 0.0 (empty) to 1.0 (full).
    pub fn fill_level(&self) -> f32 {
        if self.inner.capacity == 0 {
            return 0.0;
        }
        self.available_frames() as f32 / self.inner.capacity as f32
    }

    /// Discard all queued frames and zero the storage.
    pub fn clear(&self) {
        let mut lanes = self.inner.lanes.lock();
        lanes.fill(0.0);
        let write_pos = self.inner.write_pos.load(Ordering::Acquire);
        self.inner.read_pos.store(write_pos, Ordering::Release);
    }

    /// Returns `true` if no frames are queued.
    pub fn is_empty(&self) -> bool {
        self.available_frames() == 0
    }

    /// Returns `true` if no more frames can be written.
    pub fn is_full(&self) -> bool {
        self.free_frames() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_starts_empty() {
        let ring = FrameRing::new(2, 1024);
        assert_eq!(ring.capacity_frames(), 1024);
        assert_eq!(ring.channels(), 2);
        assert!(ring.is_empty());
        assert!(!ring.is_full());
    }

    #[test]
    fn write_then_read_round_trips_frames() {
        let ring = FrameRing::new(2, 16);
        let left = [0.1, 0.2, 0.3, 0.4];
        let right = [-0.1, -0.2, -0.3, -0.4];
        assert_eq!(ring.write_planes(&[&left, &right]), 4);
        assert_eq!(ring.available_frames(), 4);

        let mut out_left = [0.0; 4];
        let mut out_right = [0.0; 4];
        let read = ring.read_frames(&mut [&mut out_left, &mut out_right]);
        assert_eq!(read, 4);
        assert_eq!(out_left, left);
        assert_eq!(out_right, right);
        assert!(ring.is_empty());
    }

    #[test]
    fn wrap_around_preserves_order() {
        let ring = FrameRing::new(1, 8);
        let first: Vec<f64> = (1..=8).map(f64::from).collect();
        assert_eq!(ring.write_planes(&[&first]), 8);

        let mut sink = [0.0; 4];
        ring.read_frames(&mut [&mut sink]);
        assert_eq!(sink, [1.0, 2.0, 3.0, 4.0]);

        let second = [9.0, 10.0, 11.0, 12.0];
        assert_eq!(ring.write_planes(&[&second]), 4);

        let mut out = [0.0; 8];
        let read = ring.read_frames(&mut [&mut out]);
        assert_eq!(read, 8);
        assert_eq!(out, [5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn full_ring_rejects_extra_frames() {
        let ring = FrameRing::new(1, 4);
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(ring.write_planes(&[&samples]), 4);
        assert!(ring.is_full());
        assert_eq!(ring.write_planes(&[&samples]), 0);

        // Queued audio is intact.
        let mut out = [0.0; 4];
        ring.read_frames(&mut [&mut out]);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn partial_read_leaves_remainder() {
        let ring = FrameRing::new(1, 16);
        let samples: Vec<f64> = (0..10).map(f64::from).collect();
        ring.write_planes(&[&samples]);

        let mut out = [0.0; 4];
        assert_eq!(ring.read_frames(&mut [&mut out]), 4);
        assert_eq!(ring.available_frames(), 6);
    }

    #[test]
    fn fill_level_tracks_occupancy() {
        let ring = FrameRing::new(2, 100);
        let lane = [0.5; 50];
        ring.write_planes(&[&lane, &lane]);
        assert!((ring.fill_level() - 0.5).abs() < 0.01);
    }

    #[test]
    fn clear_discards_queued_audio() {
        let ring = FrameRing::new(1, 8);
        ring.write_planes(&[&[1.0, 2.0, 3.0][..]]);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.free_frames(), 8);
    }

    #[test]
    fn mismatched_plane_count_writes_nothing() {
        let ring = FrameRing::new(2, 8);
        assert_eq!(ring.write_planes(&[&[1.0][..]]), 0);
        assert!(ring.is_empty());
    }
}
