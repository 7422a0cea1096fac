//! Forced (one-shot) mode example
//!
//! The sensor idles between measurements; every `acquire` triggers a single
//! conversion and waits for it, so readings can be spaced out freely.

use embedded_hal::delay::DelayNs;
use veml6075::{Config, IntegrationTime, Veml6075, FORCED_MODE_MARGIN_MS};

#[cfg(target_os = "linux")]
use linux_embedded_hal::{Delay, I2cdev};

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut sensor = Veml6075::new(i2c, Delay);
    let mut delay = Delay;

    let config = Config::new()
        .integration_time(IntegrationTime::Ms800)
        .forced_mode(true);
    sensor.init(config)?;

    println!(
        "Forced mode, each reading blocks for {}ms",
        sensor.acquisition_delay_ms() + FORCED_MODE_MARGIN_MS
    );

    loop {
        sensor.acquire()?;
        let uv = sensor.reading();
        println!(
            "UVA: {:8.1}  UVB: {:8.1}  UV index: {:.2}",
            uv.uva, uv.uvb, uv.uv_index
        );

        delay.delay_ms(5_000);
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("This example requires Linux with I2C support.");
    println!("Please adapt the I2C initialization for your platform.");
}
