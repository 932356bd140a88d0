//! Example: Step through every brightness level on a mock device.
//!
//! Run with: `RUST_LOG=debug cargo run --example cycle_levels`

use n220_backlight::sysfs::AttributeTable;
use n220_backlight::{
    Attribute, BRIGHTNESS_REGISTER, Backlight, BacklightConfig, LEVEL_MAX, MockDevice,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (optional)
    env_logger::init();

    // Pretend the firmware left the panel at raw 15
    let device = MockDevice::new().with_register(BRIGHTNESS_REGISTER, 15);
    let probe = device.probe();

    let backlight = Backlight::with_device(BacklightConfig::default(), device)?;
    let table = AttributeTable::new(backlight.controller().clone());

    for name in table.names() {
        println!("{} = {}", name, table.show(name)?);
    }

    for level in 0..=LEVEL_MAX {
        backlight.write(Attribute::Level, &level.to_string())?;
        println!(
            "level {} -> register 0x{:02x} = {}",
            level,
            BRIGHTNESS_REGISTER,
            probe.register(BRIGHTNESS_REGISTER)
        );
    }

    // Rejected writes come back as negative errno values
    let result = table.store("brightness_level", "9");
    println!("store brightness_level=9 -> {}", result);

    backlight.detach();
    let result = table.store("brightness_raw", "10");
    println!("store brightness_raw=10 after detach -> {}", result);
    println!("brightness_raw = {}", table.show("brightness_raw")?);

    Ok(())
}
