//! Error types for the backlight driver.

use crate::attribute::Attribute;

/// `EIO`: transport failure on the bus.
pub const EIO: i32 = 5;
/// `ENOENT`: no attribute with the requested name.
pub const ENOENT: i32 = 2;
/// `EBUSY`: a device is already bound.
pub const EBUSY: i32 = 16;
/// `ENODEV`: no device is bound.
pub const ENODEV: i32 = 19;
/// `EINVAL`: the written value was rejected.
pub const EINVAL: i32 = 22;

/// A transport fault reported by the register-access collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// The device did not answer in time.
    #[error("Register 0x{addr:02x} access timed out")]
    Timeout {
        /// The register being accessed.
        addr: u8,
    },

    /// The device refused the access.
    #[error("Register 0x{addr:02x} access rejected by device")]
    Nack {
        /// The register being accessed.
        addr: u8,
    },

    /// Any other collaborator-defined failure.
    #[error("Bus error: {0}")]
    Other(String),
}

/// Errors returned when binding a device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// A device is already bound; the second discovery event is ignored.
    #[error("A backlight device is already attached")]
    AlreadyAttached,

    /// The candidate device could not be enabled.
    #[error("Failed to enable device: {0}")]
    EnableFailed(#[source] BusError),

    /// The initial brightness register read failed.
    #[error("Failed to read brightness register: {0}")]
    RegisterReadFailed(#[source] BusError),
}

impl AttachError {
    /// The positive errno reported to the bus layer.
    pub fn errno(&self) -> i32 {
        match self {
            AttachError::AlreadyAttached => EBUSY,
            AttachError::EnableFailed(_) | AttachError::RegisterReadFailed(_) => EIO,
        }
    }
}

/// Errors returned when writing a brightness attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    /// The input was not a base-10 integer.
    #[error("Invalid integer {input:?}")]
    Parse {
        /// The rejected text.
        input: String,
    },

    /// The integer was outside the attribute's domain.
    #[error("Invalid value {value} for {attribute} (expected {min}-{max})")]
    Range {
        /// The attribute being written.
        attribute: Attribute,
        /// The rejected value.
        value: i32,
        /// Minimum allowed value.
        min: i32,
        /// Maximum allowed value.
        max: i32,
    },

    /// No device is bound, so there is nothing to write to.
    #[error("No backlight device attached")]
    DeviceAbsent,

    /// The register write itself failed.
    #[error("Failed to write brightness register: {0}")]
    RegisterWrite(#[source] BusError),
}

impl WriteError {
    /// The positive errno reported to the attribute layer.
    pub fn errno(&self) -> i32 {
        match self {
            WriteError::Parse { .. } | WriteError::Range { .. } => EINVAL,
            WriteError::DeviceAbsent => ENODEV,
            WriteError::RegisterWrite(_) => EIO,
        }
    }
}
