//! Continuous UV index reading example
//!
//! This example demonstrates how to:
//! - Initialize the VEML6075 sensor in free-running mode
//! - Poll the sensor no faster than its integration time
//! - Print raw counts alongside compensated UVA/UVB and the UV index

use embedded_hal::delay::DelayNs;
use veml6075::{Config, DynamicRange, IntegrationTime, Veml6075};

// This example uses linux-embedded-hal for demonstration
// Replace with your platform's I2C implementation
#[cfg(target_os = "linux")]
use linux_embedded_hal::{Delay, I2cdev};

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut sensor = Veml6075::new(i2c, Delay);
    let mut delay = Delay;

    println!("VEML6075 UV Index Example");
    println!("=========================");

    let config = Config::new()
        .integration_time(IntegrationTime::Ms100)
        .dynamic_range(DynamicRange::Normal);
    sensor.init(config)?;
    println!("Device ID: 0x{:04X}", sensor.device_id()?);
    println!("Configuration: 0x{:04X}", sensor.configuration().to_bits());
    println!();

    println!("   UVA    UVB   Dark    Vis     IR |   UVA cal   UVB cal |  UVI");

    loop {
        // Free-running: a new sample is ready once per integration period
        delay.delay_ms(sensor.acquisition_delay_ms());

        if let Err(e) = sensor.acquire() {
            println!("Error reading sensor: {e}");
            continue;
        }

        let raw = sensor.raw();
        let uv = sensor.reading();
        println!(
            "{:6} {:6} {:6} {:6} {:6} | {:9.1} {:9.1} | {:4.2}",
            raw.uva, raw.uvb, raw.dark, raw.vis_comp, raw.ir_comp, uv.uva, uv.uvb, uv.uv_index
        );
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("This example requires Linux with I2C support.");
    println!("Please adapt the I2C initialization for your platform.");
}
