//! # Output Device Integration
//!
//! The seam between the sample-format normalization engine and a hardware
//! output driver.
//!
//! ## Overview
//!
//! A driver reports its wire format and buffer capabilities; this crate turns
//! that report into a [`StreamFormat`](core_convert::StreamFormat) the
//! converter understands, owns the negotiation and lifecycle in an explicit
//! [`OutputSession`] (no process-wide state), and carries converted planar
//! `f64` audio from the producer side to the device callback through a
//! bounded [`FrameRing`].
//!
//! ## Architecture
//!
//! ```text
//! decoder → Converter → FrameRing → OutputSession::provide_audio → device
//!                          ↑                    |
//!                    control thread ← EventQueue (stop / reset / overload)
//! ```
//!
//! - **Producer side**: decoded audio is normalized by `core-convert` and
//!   queued into the ring.
//! - **Consumer side**: the device callback drains whole frames per channel;
//!   it never blocks and never allocates.
//! - **Control side**: callbacks post [`OutputEvent`]s; a control thread
//!   drains them with [`OutputSession::pump_events`].

pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod ring;
pub mod session;
pub mod traits;

pub use config::OutputConfig;
pub use device::{BufferSizeRange, DeviceInfo, DeviceSampleType};
pub use error::{OutputError, Result};
pub use events::{EventQueue, OutputEvent};
pub use ring::FrameRing;
pub use session::{OutputSession, SessionState};
pub use traits::OutputDevice;
