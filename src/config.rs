//! Driver configuration.

/// PCI vendor ID of Intel.
pub const INTEL_VENDOR_ID: u16 = 0x8086;

/// PCI device ID of the GMA 3150 integrated graphics in the N220.
pub const GMA3150_DEVICE_ID: u16 = 0xa011;

/// Config-space offset of the legacy backlight brightness byte.
pub const BRIGHTNESS_REGISTER: u8 = 0xf4;

/// Where the brightness register lives and which device carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklightConfig {
    /// Config-space offset of the brightness register.
    pub register: u8,
    /// PCI vendor ID of the supported device.
    pub vendor_id: u16,
    /// PCI device ID of the supported device.
    pub device_id: u16,
}

impl BacklightConfig {
    /// Create the configuration for the N220's integrated graphics.
    pub fn new() -> Self {
        Self {
            register: BRIGHTNESS_REGISTER,
            vendor_id: INTEL_VENDOR_ID,
            device_id: GMA3150_DEVICE_ID,
        }
    }

    /// Use a different brightness register offset.
    pub fn with_register(mut self, register: u8) -> Self {
        self.register = register;
        self
    }

    /// Use a different PCI identity.
    pub fn with_device(mut self, vendor_id: u16, device_id: u16) -> Self {
        self.vendor_id = vendor_id;
        self.device_id = device_id;
        self
    }

    /// Whether a discovered device is one this driver binds to.
    pub fn matches(&self, vendor_id: u16, device_id: u16) -> bool {
        self.vendor_id == vendor_id && self.device_id == device_id
    }
}

impl Default for BacklightConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_gma3150() {
        let config = BacklightConfig::default();
        assert_eq!(config.register, 0xf4);
        assert!(config.matches(0x8086, 0xa011));
        assert!(!config.matches(0x8086, 0x2918));
    }

    #[test]
    fn test_builders() {
        let config = BacklightConfig::new()
            .with_register(0x4c)
            .with_device(0x10de, 0x0a20);
        assert_eq!(config.register, 0x4c);
        assert!(config.matches(0x10de, 0x0a20));
    }
}
