//! # Output Device Trait
//!
//! Abstracts the platform driver the session talks to. Control operations
//! (open, start, rate negotiation) are async and run on the control thread;
//! [`OutputDevice::signal_output_ready`] is the one callback-side method and
//! must stay non-blocking.

use crate::device::DeviceInfo;
use crate::error::Result;
use async_trait::async_trait;

/// A platform output driver.
///
/// Implementations wrap a real driver binding or, in tests, a fake. All
/// control methods are invoked by [`OutputSession`](crate::OutputSession)
/// with its state machine enforcing call order; implementations may still
/// defend against out-of-order use.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutputDevice: Send + Sync {
    /// Load the driver and capture its capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::DeviceUnavailable`](crate::OutputError) if no
    /// device is present or the driver fails to load.
    async fn open(&mut self) -> Result<DeviceInfo>;

    /// Release the driver and any buffers it created.
    async fn close(&mut self) -> Result<()>;

    /// Begin invoking the device's callback.
    async fn start(&mut self) -> Result<()>;

    /// Stop invoking the device's callback. The device stays open.
    async fn stop(&mut self) -> Result<()>;

    /// The device's current sample rate.
    async fn sample_rate(&self) -> Result<f64>;

    /// Whether the device can run at the given rate.
    async fn supports_sample_rate(&self, rate: f64) -> Result<bool>;

    /// Switch the device to the given rate. Callers should check
    /// [`supports_sample_rate`](Self::supports_sample_rate) first.
    async fn set_sample_rate(&mut self, rate: f64) -> Result<()>;

    /// Notify the driver that the callback's buffers are fully written.
    ///
    /// Only meaningful when the device reported
    /// [`post_output_ready`](crate::DeviceInfo::post_output_ready); the
    /// default implementation does nothing.
    fn signal_output_ready(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{BufferSizeRange, DeviceSampleType};
    use core_convert::Endianness;

    fn stub_info() -> DeviceInfo {
        DeviceInfo {
            name: "Mock".into(),
            input_channels: 0,
            output_channels: 2,
            buffer_sizes: BufferSizeRange {
                min: 64,
                max: 4096,
                preferred: 256,
                granularity: -1,
            },
            input_latency: 0,
            output_latency: 512,
            sample_type: DeviceSampleType::Float32 {
                endianness: Endianness::Little,
            },
            sample_rate: 48000.0,
            post_output_ready: false,
        }
    }

    #[tokio::test]
    async fn mocked_device_honors_expectations() {
        let mut device = MockOutputDevice::new();
        device.expect_open().times(1).returning(|| Ok(stub_info()));
        device
            .expect_supports_sample_rate()
            .returning(|rate| Ok((rate - 48000.0).abs() < f64::EPSILON));
        device.expect_set_sample_rate().times(1).returning(|_| Ok(()));
        device.expect_sample_rate().returning(|| Ok(48000.0));

        let info = device.open().await.unwrap();
        assert_eq!(info.output_channels, 2);
        assert!(device.supports_sample_rate(48000.0).await.unwrap());
        device.set_sample_rate(48000.0).await.unwrap();
        assert_eq!(device.sample_rate().await.unwrap(), 48000.0);
    }
}
