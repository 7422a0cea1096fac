//! Low-level register and interface definitions for VEML6075

use embedded_hal::i2c::I2c;

/// I2C address of the VEML6075
pub const I2C_ADDRESS: u8 = 0x10;

/// Expected content of the device ID register
pub const DEVICE_ID: u16 = 0x0026;

/// Register map
pub mod regs {
    /// UV configuration (shutdown, integration time, dynamic range, forced mode, trigger)
    pub const UV_CONF: u8 = 0x00;

    /// UVA channel count
    pub const UVA_DATA: u8 = 0x07;

    /// Dark current count
    pub const DARK_DATA: u8 = 0x08;

    /// UVB channel count
    pub const UVB_DATA: u8 = 0x09;

    /// Visible compensation count (UVCOMP1)
    pub const VIS_COMP_DATA: u8 = 0x0A;

    /// Infrared compensation count (UVCOMP2)
    pub const IR_COMP_DATA: u8 = 0x0B;

    /// Device ID
    pub const DEVICE_ID: u8 = 0x0C;
}

/// Blocking register access to a VEML6075.
///
/// Every register is 16 bits wide and transferred low byte first.
/// Implement this for a bus master that does not speak [`embedded_hal::i2c::I2c`],
/// otherwise use [`I2cInterface`].
pub trait RegisterInterface {
    /// Error reported by the underlying bus
    type Error;

    /// Read the register at `address`
    fn read_register(&mut self, address: u8) -> Result<u16, Self::Error>;

    /// Write `value` to the register at `address`
    fn write_register(&mut self, address: u8, value: u16) -> Result<(), Self::Error>;
}

/// Async register access to a VEML6075, see [`RegisterInterface`].
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait AsyncRegisterInterface {
    /// Error reported by the underlying bus
    type Error;

    /// Read the register at `address`
    async fn read_register(&mut self, address: u8) -> Result<u16, Self::Error>;

    /// Write `value` to the register at `address`
    async fn write_register(&mut self, address: u8, value: u16) -> Result<(), Self::Error>;
}

/// Register interface over an `embedded-hal` I2C bus
#[derive(Debug)]
pub struct I2cInterface<I2c> {
    /// The I2C interface
    pub i2c: I2c,
}

impl<I2C> I2cInterface<I2C> {
    /// Wrap an I2C bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

// Register address followed by the value, low byte first
fn frame(address: u8, value: u16) -> [u8; 3] {
    let [lsb, msb] = value.to_le_bytes();
    [address, lsb, msb]
}

impl<I2cTrait: I2c> RegisterInterface for I2cInterface<I2cTrait> {
    type Error = I2cTrait::Error;

    fn read_register(&mut self, address: u8) -> Result<u16, Self::Error> {
        let mut buffer = [0u8; 2];
        self.i2c.write_read(I2C_ADDRESS, &[address], &mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }

    fn write_register(&mut self, address: u8, value: u16) -> Result<(), Self::Error> {
        self.i2c.write(I2C_ADDRESS, &frame(address, value))
    }
}

#[cfg(feature = "async")]
impl<I2cTrait: embedded_hal_async::i2c::I2c> AsyncRegisterInterface for I2cInterface<I2cTrait> {
    type Error = I2cTrait::Error;

    async fn read_register(&mut self, address: u8) -> Result<u16, Self::Error> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(I2C_ADDRESS, &[address], &mut buffer)
            .await?;
        Ok(u16::from_le_bytes(buffer))
    }

    async fn write_register(&mut self, address: u8, value: u16) -> Result<(), Self::Error> {
        self.i2c.write(I2C_ADDRESS, &frame(address, value)).await
    }
}
