//! Device attach/detach tracking.

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::controller::{BrightnessController, Shared};
use crate::device::BacklightDevice;
use crate::error::AttachError;

/// Tracks the single bound backlight device.
///
/// Driven by the bus glue: [`attach`](Self::attach) on discovery and
/// [`detach`](Self::detach) on removal.
#[derive(Clone)]
pub struct DeviceManager {
    shared: Arc<Shared>,
    controller: BrightnessController,
}

impl DeviceManager {
    pub(crate) fn new(shared: Arc<Shared>, controller: BrightnessController) -> Self {
        Self { shared, controller }
    }

    /// Bind a discovered device.
    ///
    /// Enables the device, reads the current brightness register and seeds
    /// the cache with it. The level becomes indeterminate since an arbitrary
    /// register byte was not produced by a level write.
    ///
    /// # Errors
    ///
    /// - [`AttachError::AlreadyAttached`] if a device is already bound
    /// - [`AttachError::EnableFailed`] if the device cannot be enabled
    /// - [`AttachError::RegisterReadFailed`] if the initial read fails; the
    ///   device is disabled again before returning
    pub fn attach<D>(&self, mut candidate: D) -> Result<(), AttachError>
    where
        D: BacklightDevice + 'static,
    {
        let mut slot = self.shared.device();
        if slot.is_some() {
            warn!("ignoring attach: a backlight device is already attached");
            return Err(AttachError::AlreadyAttached);
        }

        candidate.enable().map_err(|e| {
            error!("failed to enable backlight device: {}", e);
            AttachError::EnableFailed(e)
        })?;

        let register = self.shared.config.register;
        let raw = match candidate.read_register(register) {
            Ok(raw) => raw,
            Err(e) => {
                error!("failed to read brightness register 0x{:02x}: {}", register, e);
                candidate.disable();
                return Err(AttachError::RegisterReadFailed(e));
            }
        };

        let device: Box<dyn BacklightDevice> = Box::new(candidate);
        *slot = Some(device);
        self.controller.on_external_update(raw, None);
        info!("backlight device attached, brightness_raw={}", raw);
        Ok(())
    }

    /// Unbind the device.
    ///
    /// Safe to call with nothing attached. The cached brightness stays
    /// readable; writes are rejected until the next attach.
    pub fn detach(&self) {
        let mut slot = self.shared.device();
        match slot.take() {
            Some(mut device) => {
                device.disable();
                info!("backlight device detached");
            }
            None => debug!("detach with no device attached"),
        }
    }

    /// Whether a device is currently bound.
    pub fn is_attached(&self) -> bool {
        self.shared.device().is_some()
    }
}
