//! # VEML6075 UVA/UVB Light Sensor Driver
//!
//! This is a platform-agnostic Rust driver for the Vishay VEML6075 UVA and UVB light sensor,
//! built using the [`embedded-hal`] traits for I2C communication.
//!
//! The VEML6075 provides:
//! - Separate UVA (365nm) and UVB (330nm) photodiode channels
//! - Dark current, visible and IR compensation channels
//! - Programmable integration time (50ms to 800ms)
//! - Normal and high dynamic range
//! - Continuous or forced (one-shot) measurement
//! - I2C interface (address 0x10)
//!
//! ## Features
//!
//! - **Cached acquisition**: one [`Veml6075::acquire`] reads all five channels, calibrated
//!   values are computed from that snapshot without further bus traffic
//! - **Compensation** of dark current and visible/IR leakage per the Vishay application note
//! - **UV index** from compensated UVA and UVB
//! - **Async/await support** with feature gating (optional)
//! - **Custom transports** through [`RegisterInterface`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use veml6075::{Config, IntegrationTime, Veml6075};
//!
//! let i2c = /* your I2C implementation */;
//! let delay = /* your delay implementation */;
//! let mut sensor = Veml6075::new(i2c, delay);
//!
//! // Verify the device and configure it
//! sensor.init(Config::new().integration_time(IntegrationTime::Ms100)).unwrap();
//!
//! loop {
//!     // Read all channels into the driver's snapshot
//!     sensor.acquire().unwrap();
//!
//!     println!("UVA: {}, UVB: {}", sensor.raw_uva(), sensor.raw_uvb());
//!     println!("UV index: {:.2}", sensor.uv_index());
//! }
//! ```
//!
//! ## Forced Mode
//!
//! With [`Config::forced_mode`] set the device idles between measurements. Each
//! [`Veml6075::acquire`] triggers a single conversion and blocks for the integration time
//! plus [`FORCED_MODE_MARGIN_MS`] before reading the result.
//!
//! ## Async Usage
//!
//! Enable the `async` feature to use async/await patterns:
//!
//! ```toml
//! [dependencies]
//! veml6075 = { version = "0.1", features = ["async"] }
//! ```
//!
//! ```rust,ignore
//! use veml6075::{Config, Veml6075};
//!
//! let i2c = /* your async I2C implementation */;
//! let mut sensor = Veml6075::new(i2c, embassy_time::Delay);
//!
//! sensor.init_async(Config::new().forced_mode(true)).await.unwrap();
//! sensor.acquire_async().await.unwrap();
//! let uv = sensor.reading();
//! ```
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal

#![no_std]
#![deny(missing_docs)]

use core::fmt;

pub mod calibration;
pub mod config;
pub mod ll;

pub use calibration::{RawReading, UvReading};
pub use config::{Config, ConfReg, DynamicRange, IntegrationTime};
#[cfg(feature = "async")]
pub use ll::AsyncRegisterInterface;
pub use ll::{I2cInterface, RegisterInterface, DEVICE_ID, I2C_ADDRESS};

use ll::regs;

/// Extra time allowed for a forced-mode conversion on top of the integration time
pub const FORCED_MODE_MARGIN_MS: u32 = 50;

/// All possible errors in this crate
#[derive(Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// Invalid device ID detected
    InvalidDeviceId {
        /// Expected device ID
        expected: u16,
        /// Found device ID
        found: u16,
    },
    /// The sensor has not been successfully initialized
    NotInitialized,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {e:?}"),
            Error::InvalidDeviceId { expected, found } => write!(
                f,
                "invalid device ID: expected {expected:#06x}, found {found:#06x}"
            ),
            Error::NotInitialized => f.write_str("sensor not initialized"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// High-level VEML6075 driver
#[derive(Debug)]
pub struct Veml6075<IFACE, Delay> {
    iface: IFACE,
    delay: Delay,
    // Last value written to UV_CONF, trigger always clear
    conf: ConfReg,
    acquisition_delay_ms: u32,
    raw: RawReading,
    initialized: bool,
}

impl<I2C, Delay> Veml6075<I2cInterface<I2C>, Delay> {
    /// Create a new VEML6075 driver instance on an I2C bus.
    ///
    /// Works with both blocking and async (feature `async`) buses and delays.
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self::with_interface(I2cInterface::new(i2c), delay)
    }

    /// Destroy the driver and return the I2C interface
    pub fn destroy(self) -> I2C {
        self.iface.release()
    }
}

impl<IFACE, Delay> Veml6075<IFACE, Delay> {
    /// Create a new VEML6075 driver instance on a custom register interface
    pub fn with_interface(iface: IFACE, delay: Delay) -> Self {
        Self {
            iface,
            delay,
            conf: ConfReg::POWER_ON,
            acquisition_delay_ms: IntegrationTime::Ms50.as_ms(),
            raw: RawReading::default(),
            initialized: false,
        }
    }

    /// Destroy the driver and return the register interface
    pub fn release(self) -> IFACE {
        self.iface
    }

    /// True after a successful `init`
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Configuration as last written to the device
    pub fn configuration(&self) -> ConfReg {
        self.conf
    }

    /// Integration time of the current configuration, in milliseconds
    pub fn acquisition_delay_ms(&self) -> u32 {
        self.acquisition_delay_ms
    }

    /// Raw counts from the last acquisition
    pub fn raw(&self) -> RawReading {
        self.raw
    }

    /// Raw UVA count from the last acquisition
    pub fn raw_uva(&self) -> u16 {
        self.raw.uva
    }

    /// Raw UVB count from the last acquisition
    pub fn raw_uvb(&self) -> u16 {
        self.raw.uvb
    }

    /// Raw dark current count from the last acquisition
    pub fn raw_dark(&self) -> u16 {
        self.raw.dark
    }

    /// Raw visible compensation count from the last acquisition
    pub fn raw_vis_comp(&self) -> u16 {
        self.raw.vis_comp
    }

    /// Raw IR compensation count from the last acquisition
    pub fn raw_ir_comp(&self) -> u16 {
        self.raw.ir_comp
    }

    /// Compensated UVA from the last acquisition
    pub fn uva(&self) -> f32 {
        self.raw.uva()
    }

    /// Compensated UVB from the last acquisition
    pub fn uvb(&self) -> f32 {
        self.raw.uvb()
    }

    /// UV index from the last acquisition
    pub fn uv_index(&self) -> f32 {
        self.raw.uv_index()
    }

    /// Compensated UVA, UVB and UV index from the last acquisition
    pub fn reading(&self) -> UvReading {
        self.raw.calibrate()
    }

    fn triggered_conf(&self) -> Option<ConfReg> {
        self.conf.forced_mode.then_some(ConfReg {
            trigger: true,
            ..self.conf
        })
    }

    fn identify<E>(&self, found: u16) -> Result<(), Error<E>> {
        if found != DEVICE_ID {
            #[cfg(feature = "defmt-03")]
            defmt::warn!(
                "VEML6075: unexpected device ID 0x{:04x}, expected 0x{:04x}",
                found,
                DEVICE_ID
            );
            return Err(Error::InvalidDeviceId {
                expected: DEVICE_ID,
                found,
            });
        }
        Ok(())
    }
}

impl<IFACE, Delay> Veml6075<IFACE, Delay>
where
    IFACE: RegisterInterface,
    Delay: embedded_hal::delay::DelayNs,
{
    /// Verify the device ID and apply `config`.
    ///
    /// The device is shut down while integration time and dynamic range change and
    /// powered up again afterwards. On any error the driver stays uninitialized.
    pub fn init(&mut self, config: Config) -> Result<(), Error<IFACE::Error>> {
        self.initialized = false;

        let found = self.device_id()?;
        self.identify(found)?;

        let shut_down = ConfReg {
            shutdown: true,
            ..self.conf
        };
        self.write_conf(shut_down)?;
        self.conf = shut_down;

        let mut configured = shut_down;
        configured.apply(&config);
        configured.shutdown = false;
        self.write_conf(configured)?;
        self.conf = configured;

        self.acquisition_delay_ms = config.integration_time.as_ms();
        self.initialized = true;
        Ok(())
    }

    /// Read all measurement registers into the driver's snapshot.
    ///
    /// In forced mode this first triggers a conversion and waits for it to finish.
    /// The snapshot is only replaced when all five reads succeed.
    pub fn acquire(&mut self) -> Result<(), Error<IFACE::Error>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }

        if let Some(triggered) = self.triggered_conf() {
            self.write_conf(triggered)?;
            self.delay
                .delay_ms(self.acquisition_delay_ms + FORCED_MODE_MARGIN_MS);
        }

        let raw = RawReading {
            uva: self.read_word(regs::UVA_DATA)?,
            uvb: self.read_word(regs::UVB_DATA)?,
            dark: self.read_word(regs::DARK_DATA)?,
            vis_comp: self.read_word(regs::VIS_COMP_DATA)?,
            ir_comp: self.read_word(regs::IR_COMP_DATA)?,
        };

        #[cfg(feature = "defmt-03")]
        defmt::trace!("VEML6075: {}", raw);

        self.raw = raw;
        Ok(())
    }

    /// Read the device ID register
    pub fn device_id(&mut self) -> Result<u16, Error<IFACE::Error>> {
        self.read_word(regs::DEVICE_ID)
    }

    /// Power the sensor down
    pub fn shutdown(&mut self) -> Result<(), Error<IFACE::Error>> {
        self.set_shutdown(true)
    }

    /// Power the sensor up with the current configuration
    pub fn power_on(&mut self) -> Result<(), Error<IFACE::Error>> {
        self.set_shutdown(false)
    }

    fn set_shutdown(&mut self, shutdown: bool) -> Result<(), Error<IFACE::Error>> {
        let conf = ConfReg {
            shutdown,
            ..self.conf
        };
        self.write_conf(conf)?;
        self.conf = conf;
        Ok(())
    }

    // Helper methods for register access
    fn read_word(&mut self, address: u8) -> Result<u16, Error<IFACE::Error>> {
        self.iface.read_register(address).map_err(Error::I2c)
    }

    fn write_conf(&mut self, conf: ConfReg) -> Result<(), Error<IFACE::Error>> {
        let bits = conf.to_bits();
        #[cfg(feature = "defmt-03")]
        defmt::debug!("VEML6075: UV_CONF <- 0x{:04x}", bits);
        self.iface
            .write_register(regs::UV_CONF, bits)
            .map_err(Error::I2c)
    }
}

#[cfg(feature = "async")]
impl<IFACE, Delay> Veml6075<IFACE, Delay>
where
    IFACE: AsyncRegisterInterface,
    Delay: embedded_hal_async::delay::DelayNs,
{
    /// Verify the device ID and apply `config` (async version)
    pub async fn init_async(&mut self, config: Config) -> Result<(), Error<IFACE::Error>> {
        self.initialized = false;

        let found = self.device_id_async().await?;
        self.identify(found)?;

        let shut_down = ConfReg {
            shutdown: true,
            ..self.conf
        };
        self.write_conf_async(shut_down).await?;
        self.conf = shut_down;

        let mut configured = shut_down;
        configured.apply(&config);
        configured.shutdown = false;
        self.write_conf_async(configured).await?;
        self.conf = configured;

        self.acquisition_delay_ms = config.integration_time.as_ms();
        self.initialized = true;
        Ok(())
    }

    /// Read all measurement registers into the driver's snapshot (async version)
    pub async fn acquire_async(&mut self) -> Result<(), Error<IFACE::Error>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }

        if let Some(triggered) = self.triggered_conf() {
            self.write_conf_async(triggered).await?;
            self.delay
                .delay_ms(self.acquisition_delay_ms + FORCED_MODE_MARGIN_MS)
                .await;
        }

        let raw = RawReading {
            uva: self.read_word_async(regs::UVA_DATA).await?,
            uvb: self.read_word_async(regs::UVB_DATA).await?,
            dark: self.read_word_async(regs::DARK_DATA).await?,
            vis_comp: self.read_word_async(regs::VIS_COMP_DATA).await?,
            ir_comp: self.read_word_async(regs::IR_COMP_DATA).await?,
        };

        #[cfg(feature = "defmt-03")]
        defmt::trace!("VEML6075: {}", raw);

        self.raw = raw;
        Ok(())
    }

    /// Read the device ID register (async version)
    pub async fn device_id_async(&mut self) -> Result<u16, Error<IFACE::Error>> {
        self.read_word_async(regs::DEVICE_ID).await
    }

    /// Power the sensor down (async version)
    pub async fn shutdown_async(&mut self) -> Result<(), Error<IFACE::Error>> {
        self.set_shutdown_async(true).await
    }

    /// Power the sensor up with the current configuration (async version)
    pub async fn power_on_async(&mut self) -> Result<(), Error<IFACE::Error>> {
        self.set_shutdown_async(false).await
    }

    async fn set_shutdown_async(&mut self, shutdown: bool) -> Result<(), Error<IFACE::Error>> {
        let conf = ConfReg {
            shutdown,
            ..self.conf
        };
        self.write_conf_async(conf).await?;
        self.conf = conf;
        Ok(())
    }

    // Helper methods for async register access
    async fn read_word_async(&mut self, address: u8) -> Result<u16, Error<IFACE::Error>> {
        self.iface.read_register(address).await.map_err(Error::I2c)
    }

    async fn write_conf_async(&mut self, conf: ConfReg) -> Result<(), Error<IFACE::Error>> {
        let bits = conf.to_bits();
        #[cfg(feature = "defmt-03")]
        defmt::debug!("VEML6075: UV_CONF <- 0x{:04x}", bits);
        self.iface
            .write_register(regs::UV_CONF, bits)
            .await
            .map_err(Error::I2c)
    }
}
