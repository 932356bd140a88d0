//! Mock device for testing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::device::BacklightDevice;
use crate::error::BusError;

#[derive(Debug)]
struct MockState {
    registers: [u8; 256],
    writes: Vec<(u8, u8)>,
    enabled: bool,
    disable_count: usize,
    rejected_writes: usize,
    enable_error: Option<BusError>,
    read_error: Option<BusError>,
    write_error: Option<BusError>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            registers: [0; 256],
            writes: Vec::new(),
            enabled: false,
            disable_count: 0,
            rejected_writes: 0,
            enable_error: None,
            read_error: None,
            write_error: None,
        }
    }
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock backlight device for testing.
///
/// This allows exercising the driver without real hardware. Keep a
/// [`MockProbe`] around to inspect register traffic or inject failures after
/// the device itself has been handed to the driver.
///
/// # Example
///
/// ```
/// use n220_backlight::{Attribute, Backlight, BacklightConfig, MockDevice};
///
/// let device = MockDevice::new().with_register(0xf4, 15);
/// let probe = device.probe();
///
/// let backlight = Backlight::new(BacklightConfig::default());
/// backlight.attach(device).unwrap();
/// backlight.write(Attribute::Level, "3").unwrap();
///
/// assert_eq!(probe.writes(), vec![(0xf4, 7)]);
/// ```
#[derive(Debug, Default)]
pub struct MockDevice {
    state: Arc<Mutex<MockState>>,
}

impl MockDevice {
    /// Create a mock device with all registers zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a register value.
    pub fn with_register(self, addr: u8, value: u8) -> Self {
        lock(&self.state).registers[usize::from(addr)] = value;
        self
    }

    /// Get a handle for inspecting this device.
    pub fn probe(&self) -> MockProbe {
        MockProbe {
            state: Arc::clone(&self.state),
        }
    }
}

impl BacklightDevice for MockDevice {
    fn enable(&mut self) -> Result<(), BusError> {
        let mut state = lock(&self.state);
        if let Some(e) = state.enable_error.clone() {
            return Err(e);
        }
        state.enabled = true;
        Ok(())
    }

    fn disable(&mut self) {
        let mut state = lock(&self.state);
        state.enabled = false;
        state.disable_count += 1;
    }

    fn read_register(&mut self, addr: u8) -> Result<u8, BusError> {
        let state = lock(&self.state);
        if !state.enabled {
            return Err(BusError::Other("device not enabled".into()));
        }
        if let Some(e) = state.read_error.clone() {
            return Err(e);
        }
        Ok(state.registers[usize::from(addr)])
    }

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), BusError> {
        let mut state = lock(&self.state);
        if !state.enabled {
            state.rejected_writes += 1;
            return Err(BusError::Other("device not enabled".into()));
        }
        if let Some(e) = state.write_error.clone() {
            return Err(e);
        }
        state.registers[usize::from(addr)] = value;
        state.writes.push((addr, value));
        Ok(())
    }
}

/// Inspection and fault-injection handle for a [`MockDevice`].
#[derive(Debug, Clone)]
pub struct MockProbe {
    state: Arc<Mutex<MockState>>,
}

impl MockProbe {
    /// Current value of a register.
    pub fn register(&self, addr: u8) -> u8 {
        lock(&self.state).registers[usize::from(addr)]
    }

    /// Every successful register write, oldest first.
    pub fn writes(&self) -> Vec<(u8, u8)> {
        lock(&self.state).writes.clone()
    }

    /// Whether the device is currently enabled.
    pub fn is_enabled(&self) -> bool {
        lock(&self.state).enabled
    }

    /// How many times the device has been disabled.
    pub fn disable_count(&self) -> usize {
        lock(&self.state).disable_count
    }

    /// How many writes arrived while the device was not enabled.
    pub fn rejected_writes(&self) -> usize {
        lock(&self.state).rejected_writes
    }

    /// Make `enable` fail with `error` (or succeed again with `None`).
    pub fn fail_enable(&self, error: Option<BusError>) {
        lock(&self.state).enable_error = error;
    }

    /// Make register reads fail with `error` (or succeed again with `None`).
    pub fn fail_reads(&self, error: Option<BusError>) {
        lock(&self.state).read_error = error;
    }

    /// Make register writes fail with `error` (or succeed again with `None`).
    pub fn fail_writes(&self, error: Option<BusError>) {
        lock(&self.state).write_error = error;
    }
}
