//! Backlight brightness control for the Samsung N220 netbook.
//!
//! The panel brightness is a single byte in PCI configuration space of the
//! integrated graphics. This crate tracks the device that carries it and
//! exposes the value through two attributes that stay in sync:
//!
//! - `brightness_level`: a coarse level 0-8, mapped to `2^level - 1`
//! - `brightness_raw`: the register byte itself, 0-255
//!
//! Writing the raw byte makes the level indeterminate (read back as `-1`),
//! even when the byte happens to match some level.
//!
//! # Example
//!
//! ```
//! use n220_backlight::{Attribute, Backlight, BacklightConfig, MockDevice};
//!
//! let backlight = Backlight::new(BacklightConfig::default());
//!
//! // Writes are rejected until a device is attached.
//! assert!(backlight.write(Attribute::Level, "3").is_err());
//!
//! backlight.attach(MockDevice::new().with_register(0xf4, 15)).unwrap();
//! assert_eq!(backlight.read(Attribute::Raw), 15);
//! assert_eq!(backlight.read(Attribute::Level), -1);
//!
//! backlight.write(Attribute::Level, "3").unwrap();
//! assert_eq!(backlight.read(Attribute::Raw), 7);
//! ```
//!
//! # Testing
//!
//! Use [`MockDevice`] to test code without hardware. Bus glue for a real
//! device implements [`BacklightDevice`].

#![warn(missing_docs)]

mod attribute;
mod backlight;
mod config;
mod controller;
mod device;
mod error;
mod lifecycle;
mod mock;
mod state;
pub mod sysfs;

// Re-export public API
pub use attribute::{Attribute, PendingWrite, parse_int};
pub use backlight::Backlight;
pub use config::{BRIGHTNESS_REGISTER, BacklightConfig, GMA3150_DEVICE_ID, INTEL_VENDOR_ID};
pub use controller::BrightnessController;
pub use device::BacklightDevice;
pub use error::{AttachError, BusError, EBUSY, EINVAL, EIO, ENODEV, ENOENT, WriteError};
pub use lifecycle::DeviceManager;
pub use mock::{MockDevice, MockProbe};
pub use state::{BrightnessState, LEVEL_MAX, LEVEL_UNKNOWN, RAW_MAX, level_to_raw};

#[cfg(test)]
mod tests {
    use super::*;

    const REG: u8 = BRIGHTNESS_REGISTER;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn attached(initial: u8) -> (Backlight, MockProbe) {
        init_logger();
        let device = MockDevice::new().with_register(REG, initial);
        let probe = device.probe();
        let backlight = Backlight::with_device(BacklightConfig::default(), device).unwrap();
        (backlight, probe)
    }

    #[test]
    fn test_unattached_start() {
        init_logger();
        let backlight = Backlight::new(BacklightConfig::default());
        assert!(!backlight.is_attached());
        assert_eq!(backlight.read(Attribute::Level), -1);
        assert_eq!(backlight.read(Attribute::Raw), 0);
    }

    #[test]
    fn test_attach_seeds_raw_without_level() {
        init_logger();
        let backlight = Backlight::new(BacklightConfig::default());
        assert_eq!(backlight.read(Attribute::Level), -1);

        backlight
            .attach(MockDevice::new().with_register(REG, 15))
            .unwrap();
        assert!(backlight.is_attached());
        assert_eq!(backlight.read(Attribute::Raw), 15);
        assert_eq!(backlight.read(Attribute::Level), -1);
    }

    #[test]
    fn test_level_write_reaches_register() {
        let (backlight, probe) = attached(15);

        backlight.write(Attribute::Level, "3").unwrap();
        assert_eq!(probe.register(REG), 7);
        assert_eq!(backlight.read(Attribute::Raw), 7);
        assert_eq!(backlight.read(Attribute::Level), 3);
    }

    #[test]
    fn test_raw_write_clears_level() {
        let (backlight, probe) = attached(0);

        backlight.write(Attribute::Level, "2").unwrap();
        backlight.write(Attribute::Raw, "200").unwrap();
        assert_eq!(probe.register(REG), 200);
        assert_eq!(backlight.read(Attribute::Level), -1);

        // A raw value that equals 2^n - 1 still does not imply a level.
        backlight.write(Attribute::Raw, "63").unwrap();
        assert_eq!(backlight.read(Attribute::Level), -1);
    }

    #[test]
    fn test_level_round_trip() {
        let (backlight, probe) = attached(0);

        for level in 0..=LEVEL_MAX {
            backlight.write(Attribute::Level, &level.to_string()).unwrap();
            let expected = (1i32 << level) - 1;
            assert_eq!(backlight.read(Attribute::Raw), expected);
            assert_eq!(backlight.read(Attribute::Level), i32::from(level));
            assert_eq!(i32::from(probe.register(REG)), expected);
        }
    }

    #[test]
    fn test_rejected_level_keeps_state() {
        let (backlight, probe) = attached(0);
        backlight.write(Attribute::Level, "5").unwrap();
        let before = backlight.state();

        for input in ["9", "-1", "", "five", "5.0"] {
            assert!(backlight.write(Attribute::Level, input).is_err());
            assert_eq!(backlight.state(), before);
        }
        assert!(matches!(
            backlight.write(Attribute::Raw, "256"),
            Err(WriteError::Range { .. })
        ));
        assert_eq!(backlight.state(), before);
        assert_eq!(probe.writes(), vec![(REG, 31)]);
    }

    #[test]
    fn test_detach_rejects_writes_and_keeps_cache() {
        let (backlight, probe) = attached(0);
        backlight.write(Attribute::Raw, "42").unwrap();

        backlight.detach();
        assert!(!backlight.is_attached());
        assert!(!probe.is_enabled());

        assert_eq!(
            backlight.write(Attribute::Raw, "10"),
            Err(WriteError::DeviceAbsent)
        );
        assert_eq!(backlight.read(Attribute::Raw), 42);
        assert_eq!(probe.writes(), vec![(REG, 42)]);
        assert_eq!(probe.rejected_writes(), 0);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let (backlight, probe) = attached(0);
        backlight.detach();
        backlight.detach();
        assert_eq!(probe.disable_count(), 1);
    }

    #[test]
    fn test_repeated_write_still_hits_register() {
        let (backlight, probe) = attached(0);

        backlight.write(Attribute::Level, "4").unwrap();
        let once = backlight.state();
        backlight.write(Attribute::Level, "4").unwrap();
        assert_eq!(backlight.state(), once);

        backlight.write(Attribute::Raw, "99").unwrap();
        backlight.write(Attribute::Raw, "99").unwrap();
        assert_eq!(
            probe.writes(),
            vec![(REG, 15), (REG, 15), (REG, 99), (REG, 99)]
        );
    }

    #[test]
    fn test_failed_register_write_keeps_state() {
        let (backlight, probe) = attached(0);
        backlight.write(Attribute::Level, "6").unwrap();
        let before = backlight.state();

        probe.fail_writes(Some(BusError::Nack { addr: REG }));
        assert_eq!(
            backlight.write(Attribute::Level, "2"),
            Err(WriteError::RegisterWrite(BusError::Nack { addr: REG }))
        );
        assert_eq!(backlight.state(), before);
        assert_eq!(probe.register(REG), 63);

        // The failure does not wedge the driver.
        probe.fail_writes(None);
        backlight.write(Attribute::Level, "2").unwrap();
        assert_eq!(backlight.read(Attribute::Raw), 3);
    }

    #[test]
    fn test_second_attach_rejected() {
        let (backlight, probe) = attached(12);

        let intruder = MockDevice::new().with_register(REG, 99);
        let intruder_probe = intruder.probe();
        assert_eq!(
            backlight.attach(intruder),
            Err(AttachError::AlreadyAttached)
        );
        assert!(!intruder_probe.is_enabled());
        assert!(probe.is_enabled());
        assert_eq!(backlight.read(Attribute::Raw), 12);
    }

    #[test]
    fn test_enable_failure_leaves_unattached() {
        init_logger();
        let backlight = Backlight::new(BacklightConfig::default());

        let device = MockDevice::new();
        device
            .probe()
            .fail_enable(Some(BusError::Other("powered down".into())));
        assert!(matches!(
            backlight.attach(device),
            Err(AttachError::EnableFailed(_))
        ));
        assert!(!backlight.is_attached());

        // A later discovery can still succeed.
        backlight.attach(MockDevice::new()).unwrap();
        assert!(backlight.is_attached());
    }

    #[test]
    fn test_read_failure_releases_device() {
        init_logger();
        let backlight = Backlight::new(BacklightConfig::default());

        let device = MockDevice::new().with_register(REG, 80);
        let probe = device.probe();
        probe.fail_reads(Some(BusError::Timeout { addr: REG }));

        assert_eq!(
            backlight.attach(device),
            Err(AttachError::RegisterReadFailed(BusError::Timeout {
                addr: REG
            }))
        );
        assert!(!backlight.is_attached());
        assert!(!probe.is_enabled());
        assert_eq!(probe.disable_count(), 1);
        assert_eq!(backlight.state(), BrightnessState::default());
    }

    #[test]
    fn test_reattach_reseeds_cache() {
        let (backlight, _) = attached(0);
        backlight.write(Attribute::Level, "8").unwrap();
        backlight.detach();

        backlight
            .attach(MockDevice::new().with_register(REG, 20))
            .unwrap();
        assert_eq!(backlight.read(Attribute::Raw), 20);
        assert_eq!(backlight.read(Attribute::Level), -1);
    }

    #[test]
    fn test_custom_register() {
        init_logger();
        let config = BacklightConfig::new().with_register(0x4c);
        let device = MockDevice::new().with_register(0x4c, 9);
        let probe = device.probe();
        let boxed: Box<dyn BacklightDevice> = Box::new(device);

        let backlight = Backlight::with_device(config, boxed).unwrap();
        assert_eq!(backlight.read(Attribute::Raw), 9);

        backlight.write(Attribute::Level, "1").unwrap();
        assert_eq!(probe.writes(), vec![(0x4c, 1)]);
        assert_eq!(probe.register(REG), 0);
    }

    #[test]
    fn test_components_share_state() {
        let (backlight, _) = attached(0);
        let controller = backlight.controller().clone();
        let manager = backlight.manager().clone();

        controller.write_value(Attribute::Level, 7).unwrap();
        assert_eq!(backlight.read(Attribute::Raw), 127);

        manager.detach();
        assert!(!controller.is_attached());
        assert_eq!(
            controller.write_value(Attribute::Level, 7),
            Err(WriteError::DeviceAbsent)
        );
    }

    #[test]
    fn test_concurrent_access_stays_consistent() {
        let (backlight, probe) = attached(0);

        let replacements = std::thread::scope(|s| {
            for worker in 0..4u8 {
                let backlight = backlight.clone();
                s.spawn(move || {
                    for i in 0..200u32 {
                        let result = if worker % 2 == 0 {
                            backlight.write(Attribute::Level, &(i % 9).to_string())
                        } else {
                            backlight.write(Attribute::Raw, &(i % 256).to_string())
                        };
                        match result {
                            Ok(()) | Err(WriteError::DeviceAbsent) => {}
                            Err(e) => panic!("unexpected write error: {e}"),
                        }
                    }
                });
            }

            let reader = backlight.clone();
            s.spawn(move || {
                for _ in 0..2000 {
                    assert!(reader.state().is_consistent());
                }
            });

            let manager = backlight.manager().clone();
            let cycler = s.spawn(move || {
                let mut probes = Vec::new();
                for _ in 0..200 {
                    manager.detach();
                    let device = MockDevice::new();
                    probes.push(device.probe());
                    let _ = manager.attach(device);
                }
                probes
            });
            cycler.join().unwrap()
        });

        assert!(backlight.state().is_consistent());
        // No write may reach a device after it was detached and disabled.
        for probe in std::iter::once(&probe).chain(&replacements) {
            assert_eq!(probe.rejected_writes(), 0);
            assert!(probe.writes().iter().all(|&(addr, _)| addr == REG));
        }
    }
}
