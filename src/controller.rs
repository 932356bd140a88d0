//! Brightness state controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use log::{debug, error, warn};

use crate::attribute::{Attribute, PendingWrite};
use crate::config::BacklightConfig;
use crate::device::BacklightDevice;
use crate::error::WriteError;
use crate::state::{BrightnessState, LEVEL_MAX};

/// The bound device, if any.
pub(crate) type DeviceSlot = Option<Box<dyn BacklightDevice>>;

/// State shared by the controller and the device manager.
///
/// The device slot is the mutual-exclusion domain for everything that
/// touches hardware: presence checks, register accesses and the cache commit
/// that follows them all happen under `device`. The cache has its own lock so
/// readers never wait on a register access; it is only written while
/// `device` is held, so the lock order is always `device` then `cache`.
pub(crate) struct Shared {
    pub(crate) config: BacklightConfig,
    device: Mutex<DeviceSlot>,
    cache: RwLock<BrightnessState>,
}

impl Shared {
    pub(crate) fn new(config: BacklightConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            device: Mutex::new(None),
            cache: RwLock::new(BrightnessState::default()),
        })
    }

    // A panic while a guard is held cannot leave either value half written:
    // the slot is swapped whole and the cache is a `Copy` pair.
    pub(crate) fn device(&self) -> MutexGuard<'_, DeviceSlot> {
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn snapshot(&self) -> BrightnessState {
        *self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self, state: BrightnessState) {
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

/// Serves reads and validated writes of the two brightness attributes.
///
/// Cheap to clone; all clones operate on the same state.
#[derive(Clone)]
pub struct BrightnessController {
    shared: Arc<Shared>,
}

impl BrightnessController {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Get a snapshot of the cached brightness.
    pub fn state(&self) -> BrightnessState {
        self.shared.snapshot()
    }

    /// Read an attribute from the cache.
    ///
    /// An indeterminate level reads as
    /// [`LEVEL_UNKNOWN`](crate::LEVEL_UNKNOWN).
    pub fn read(&self, attribute: Attribute) -> i32 {
        let state = self.state();
        match attribute {
            Attribute::Level => state.level_value(),
            Attribute::Raw => i32::from(state.raw),
        }
    }

    /// Whether a device is currently bound.
    pub fn is_attached(&self) -> bool {
        self.shared.device().is_some()
    }

    /// Write an attribute from its text form.
    ///
    /// The register is written even when the value is unchanged. On any
    /// error the cached state is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`WriteError::Parse`] if `input` is not a base-10 integer
    /// - [`WriteError::Range`] if the value is outside the attribute's range
    /// - [`WriteError::DeviceAbsent`] if no device is attached
    /// - [`WriteError::RegisterWrite`] if the register write fails
    pub fn write(&self, attribute: Attribute, input: &str) -> Result<(), WriteError> {
        let pending = attribute.translate(input).inspect_err(|e| {
            warn!("refusing to set {}: {}", attribute, e);
        })?;
        self.commit(pending)
    }

    /// Write an attribute from an already parsed value.
    ///
    /// See [`write`](Self::write) for the error conditions.
    pub fn write_value(&self, attribute: Attribute, value: i32) -> Result<(), WriteError> {
        let pending = attribute.translate_value(value).inspect_err(|e| {
            warn!("refusing to set {}: {}", attribute, e);
        })?;
        self.commit(pending)
    }

    fn commit(&self, pending: PendingWrite) -> Result<(), WriteError> {
        let mut slot = self.shared.device();
        let Some(device) = slot.as_mut() else {
            warn!(
                "refusing to set {} to {}: no device attached",
                pending.attribute,
                pending.raw()
            );
            return Err(WriteError::DeviceAbsent);
        };

        let register = self.shared.config.register;
        device
            .write_register(register, pending.raw())
            .map_err(|e| {
                error!("brightness register write failed: {}", e);
                WriteError::RegisterWrite(e)
            })?;

        self.shared.store(pending.state);
        debug!(
            "{} written: register 0x{:02x} = {}, level={:?}",
            pending.attribute,
            register,
            pending.raw(),
            pending.state.level
        );
        Ok(())
    }

    /// Seed the cache from a value read off the hardware.
    ///
    /// No register write is issued. `level_hint` is only kept when it is a
    /// valid level that agrees with `raw`; the device manager always passes
    /// `None`.
    pub(crate) fn on_external_update(&self, raw: u8, level_hint: Option<u8>) {
        let hinted = level_hint
            .filter(|&level| level <= LEVEL_MAX)
            .map(BrightnessState::from_level);
        let state = match hinted {
            Some(state) if state.raw == raw => state,
            _ => BrightnessState::from_raw(raw),
        };
        self.shared.store(state);
        debug!("brightness cache seeded: raw={}, level={:?}", raw, state.level);
    }
}
