//! Driver entry point tying the controller and device manager together.

use crate::attribute::Attribute;
use crate::config::BacklightConfig;
use crate::controller::{BrightnessController, Shared};
use crate::device::BacklightDevice;
use crate::error::{AttachError, WriteError};
use crate::lifecycle::DeviceManager;
use crate::state::BrightnessState;

/// The backlight driver.
///
/// Owns one shared brightness state and hands out the two components that
/// operate on it: the [`DeviceManager`] for bus events and the
/// [`BrightnessController`] for attribute access. Clones share state.
///
/// # Example
///
/// ```
/// use n220_backlight::{Attribute, Backlight, BacklightConfig, MockDevice};
///
/// let backlight = Backlight::new(BacklightConfig::default());
/// assert_eq!(backlight.read(Attribute::Level), -1);
///
/// backlight.attach(MockDevice::new())?;
/// backlight.write(Attribute::Level, "4")?;
/// assert_eq!(backlight.read(Attribute::Raw), 15);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Backlight {
    manager: DeviceManager,
    controller: BrightnessController,
}

impl Backlight {
    /// Create a driver with no device attached.
    pub fn new(config: BacklightConfig) -> Self {
        let shared = Shared::new(config);
        let controller = BrightnessController::new(shared.clone());
        let manager = DeviceManager::new(shared, controller.clone());
        Self {
            manager,
            controller,
        }
    }

    /// Create a driver and immediately attach a device that is already
    /// present.
    ///
    /// # Errors
    ///
    /// Any error from [`DeviceManager::attach`].
    pub fn with_device<D>(config: BacklightConfig, device: D) -> Result<Self, AttachError>
    where
        D: BacklightDevice + 'static,
    {
        let backlight = Self::new(config);
        backlight.attach(device)?;
        Ok(backlight)
    }

    /// The component that handles attach/detach events.
    pub fn manager(&self) -> &DeviceManager {
        &self.manager
    }

    /// The component that handles attribute reads and writes.
    pub fn controller(&self) -> &BrightnessController {
        &self.controller
    }

    /// See [`DeviceManager::attach`].
    pub fn attach<D>(&self, device: D) -> Result<(), AttachError>
    where
        D: BacklightDevice + 'static,
    {
        self.manager.attach(device)
    }

    /// See [`DeviceManager::detach`].
    pub fn detach(&self) {
        self.manager.detach()
    }

    /// Whether a device is currently bound.
    pub fn is_attached(&self) -> bool {
        self.manager.is_attached()
    }

    /// See [`BrightnessController::read`].
    pub fn read(&self, attribute: Attribute) -> i32 {
        self.controller.read(attribute)
    }

    /// See [`BrightnessController::write`].
    pub fn write(&self, attribute: Attribute, input: &str) -> Result<(), WriteError> {
        self.controller.write(attribute, input)
    }

    /// Get a snapshot of the cached brightness.
    pub fn state(&self) -> BrightnessState {
        self.controller.state()
    }
}
