//! The hardware collaborator behind the brightness register.

use crate::error::BusError;

/// A device that exposes the backlight brightness register.
///
/// Implemented by the bus glue for real hardware and by
/// [`MockDevice`](crate::MockDevice) in tests. All calls are synchronous and
/// expected to return promptly; the driver never retries a failed access.
pub trait BacklightDevice: Send {
    /// Activate the device so its registers can be accessed.
    fn enable(&mut self) -> Result<(), BusError>;

    /// Release whatever [`enable`](Self::enable) acquired.
    ///
    /// Called when the device is detached or when bringing it up fails
    /// after a successful enable.
    fn disable(&mut self);

    /// Read one byte of configuration space.
    fn read_register(&mut self, addr: u8) -> Result<u8, BusError>;

    /// Write one byte of configuration space.
    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), BusError>;
}

impl<D: BacklightDevice + ?Sized> BacklightDevice for Box<D> {
    fn enable(&mut self) -> Result<(), BusError> {
        (**self).enable()
    }

    fn disable(&mut self) {
        (**self).disable()
    }

    fn read_register(&mut self, addr: u8) -> Result<u8, BusError> {
        (**self).read_register(addr)
    }

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), BusError> {
        (**self).write_register(addr, value)
    }
}
