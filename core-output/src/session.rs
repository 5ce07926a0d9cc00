//! # Output Session
//!
//! One explicit object owning everything a running output needs: the device
//! handle, its capability snapshot, the negotiated wire format, the sample
//! converter, the frame ring, and the control-event queue. Nothing lives in
//! process-wide state; two sessions on two devices coexist without touching
//! each other.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --prepare()--> Prepared --start()--> Running
//!                        ^                    |
//!                        +------stop()--------+
//! ```
//!
//! `reset()` tears the device down and re-runs the preparation sequence with
//! the same request, the response to a driver reset notification.

use crate::config::OutputConfig;
use crate::device::DeviceInfo;
use crate::error::{OutputError, Result};
use crate::events::{EventQueue, OutputEvent};
use crate::ring::FrameRing;
use crate::traits::OutputDevice;
use core_convert::{Converter, OutputPlane, StreamFormat};
use tracing::{debug, warn};

/// Lifecycle state of an [`OutputSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No device resources held.
    Idle,
    /// Device open, formats negotiated, converter and ring built.
    Prepared,
    /// Device callback running.
    Running,
}

/// What `prepare()` was asked for; kept so `reset()` can re-negotiate.
#[derive(Debug, Clone, Copy)]
struct PrepareRequest {
    sample_rate: f64,
    channels: u16,
}

/// An output device session.
///
/// The session serializes all control operations; it is `Send` but not
/// internally synchronized. The ring and event queue it hands out are the
/// only structures shared with the callback thread.
pub struct OutputSession<D: OutputDevice> {
    device: D,
    config: OutputConfig,
    state: SessionState,
    request: Option<PrepareRequest>,
    info: Option<DeviceInfo>,
    wire_format: Option<StreamFormat>,
    converter: Option<Converter>,
    ring: Option<FrameRing>,
    events: EventQueue,
}

impl<D: OutputDevice> OutputSession<D> {
    /// Wrap a device with the given configuration.
    pub fn new(device: D, config: OutputConfig) -> Self {
        let events = EventQueue::new(config.event_queue_capacity);
        Self {
            device,
            config,
            state: SessionState::Idle,
            request: None,
            info: None,
            wire_format: None,
            converter: None,
            ring: None,
            events,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Capability snapshot captured by the last `prepare()`.
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.info.as_ref()
    }

    /// The negotiated wire format the device will be fed from.
    pub fn wire_format(&self) -> Option<&StreamFormat> {
        self.wire_format.as_ref()
    }

    /// The converter normalizing the wire format, once prepared.
    pub fn converter(&self) -> Option<&Converter> {
        self.converter.as_ref()
    }

    /// The frame ring carrying audio to the callback, once prepared.
    pub fn ring(&self) -> Option<&FrameRing> {
        self.ring.as_ref()
    }

    /// The control-event queue. Clone it into the callback side.
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Open the device, negotiate the sample rate, and build the conversion
    /// path sized to the device's buffers.
    ///
    /// Valid from `Idle` or `Prepared` (re-preparing tears nothing down; the
    /// device is reconfigured in place).
    ///
    /// # Errors
    ///
    /// Device errors pass through; a wire format the converter rejects
    /// surfaces as [`OutputError::Convert`].
    pub async fn prepare(&mut self, sample_rate: f64, channels: u16) -> Result<()> {
        if self.state == SessionState::Running {
            return Err(OutputError::InvalidState {
                expected: SessionState::Idle,
                actual: self.state,
            });
        }

        let info = self.device.open().await?;

        // Prefer the requested rate; fall back to whatever the device is
        // running at when it cannot switch.
        if self.device.supports_sample_rate(sample_rate).await? {
            self.device.set_sample_rate(sample_rate).await?;
        } else {
            warn!(
                requested = sample_rate,
                device = info.sample_rate,
                "requested sample rate not supported, keeping device rate"
            );
        }
        let rate = self.device.sample_rate().await?;

        let out_channels = channels.min(info.output_channels as u16);
        let wire = info.sample_type.stream_format(rate as u32, out_channels);
        let converter = Converter::new(wire.clone())?;

        let preferred = self
            .config
            .preferred_buffer_frames
            .map(|frames| info.buffer_sizes.clamp(frames))
            .unwrap_or(info.buffer_sizes.preferred);
        let ring_frames = self.config.ring_frames(preferred);

        debug!(
            device = %info.name,
            wire = %wire,
            channels = out_channels,
            ring_frames,
            "output session prepared"
        );

        self.request = Some(PrepareRequest {
            sample_rate,
            channels,
        });
        self.ring = Some(FrameRing::new(usize::from(out_channels), ring_frames));
        self.wire_format = Some(wire);
        self.converter = Some(converter);
        self.info = Some(info);
        self.state = SessionState::Prepared;
        Ok(())
    }

    /// Start the device callback.
    ///
    /// # Errors
    ///
    /// Fails with [`OutputError::InsufficientBuffer`] until the ring has
    /// reached the configured start threshold, and with
    /// [`OutputError::InvalidState`] outside `Prepared`.
    pub async fn start(&mut self) -> Result<()> {
        if self.state != SessionState::Prepared {
            return Err(OutputError::InvalidState {
                expected: SessionState::Prepared,
                actual: self.state,
            });
        }

        let ring = self.ring.as_ref().ok_or(OutputError::NotPrepared)?;
        let required =
            (self.config.start_threshold * ring.capacity_frames() as f32).ceil() as usize;
        let available = ring.available_frames();
        if available < required {
            return Err(OutputError::InsufficientBuffer {
                available,
                required,
            });
        }

        self.device.start().await?;
        self.state = SessionState::Running;
        debug!("output session running");
        Ok(())
    }

    /// Stop the device callback, keeping the device prepared.
    pub async fn stop(&mut self) -> Result<()> {
        if self.state != SessionState::Running {
            return Err(OutputError::InvalidState {
                expected: SessionState::Running,
                actual: self.state,
            });
        }
        self.device.stop().await?;
        self.state = SessionState::Prepared;
        debug!("output session stopped");
        Ok(())
    }

    /// Tear the device down and re-run preparation with the original request.
    ///
    /// The driver-requested recovery path: buffers are re-created and the
    /// ring is rebuilt empty.
    pub async fn reset(&mut self) -> Result<()> {
        let request = self.request.ok_or(OutputError::NotPrepared)?;

        if self.state == SessionState::Running {
            self.device.stop().await?;
            self.state = SessionState::Prepared;
        }
        self.device.close().await?;
        self.state = SessionState::Idle;
        self.ring = None;
        self.converter = None;
        self.wire_format = None;
        self.info = None;

        self.prepare(request.sample_rate, request.channels).await
    }

    /// Ask the control thread to stop playback. Safe from any thread; never
    /// stops inline.
    pub fn request_stop(&self) {
        self.events.post(OutputEvent::StopRequested);
    }

    /// Drain pending control events and apply them.
    pub async fn pump_events(&mut self) -> Result<()> {
        for event in self.events.drain() {
            match event {
                OutputEvent::StopRequested => {
                    if self.state == SessionState::Running {
                        self.stop().await?;
                    }
                }
                OutputEvent::ResetNeeded => {
                    self.reset().await?;
                }
                OutputEvent::Overload => {
                    warn!("device reported processing overload");
                }
            }
        }
        Ok(())
    }

    /// Queue converted planar audio for the callback. Returns frames
    /// accepted; 0 before `prepare()`.
    pub fn queue(&self, planes: &[OutputPlane<'_>]) -> usize {
        match &self.ring {
            Some(ring) => ring.write_converted(planes),
            None => 0,
        }
    }

    /// Callback side: fill per-channel device buffers from the ring.
    ///
    /// Returns the frames delivered, which may be fewer than requested on
    /// underrun; the caller zero-fills the remainder. Signals output-ready
    /// when the device supports it. Never blocks beyond the ring's short
    /// critical section and never allocates.
    pub fn provide_audio(&self, channel_buffers: &mut [&mut [f64]]) -> usize {
        let Some(ring) = &self.ring else {
            return 0;
        };
        let frames = ring.read_frames(channel_buffers);
        if let Some(info) = &self.info {
            if info.post_output_ready {
                self.device.signal_output_ready();
            }
        }
        frames
    }
}
