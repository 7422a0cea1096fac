//! Measurement settings and the UV_CONF register

/// UV integration time (UV_IT, bits 4..=6 of UV_CONF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum IntegrationTime {
    /// 50ms integration time
    Ms50 = 0b000,
    /// 100ms integration time (default)
    #[default]
    Ms100 = 0b001,
    /// 200ms integration time
    Ms200 = 0b010,
    /// 400ms integration time
    Ms400 = 0b011,
    /// 800ms integration time
    Ms800 = 0b100,
}

impl IntegrationTime {
    /// Integration time in milliseconds
    pub const fn as_ms(self) -> u32 {
        match self {
            IntegrationTime::Ms50 => 50,
            IntegrationTime::Ms100 => 100,
            IntegrationTime::Ms200 => 200,
            IntegrationTime::Ms400 => 400,
            IntegrationTime::Ms800 => 800,
        }
    }

    const fn from_selector(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(IntegrationTime::Ms50),
            0b001 => Some(IntegrationTime::Ms100),
            0b010 => Some(IntegrationTime::Ms200),
            0b011 => Some(IntegrationTime::Ms400),
            0b100 => Some(IntegrationTime::Ms800),
            _ => None,
        }
    }
}

/// Dynamic range setting (UV_HD, bit 3 of UV_CONF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum DynamicRange {
    /// Normal dynamic range (default)
    #[default]
    Normal = 0,
    /// High dynamic range
    High = 1,
}

/// Settings applied by [`crate::Veml6075::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Config {
    /// Integration time per sample
    pub integration_time: IntegrationTime,
    /// Normal or high dynamic range
    pub dynamic_range: DynamicRange,
    /// One-shot conversions on demand instead of continuous sampling
    pub forced_mode: bool,
}

impl Config {
    /// Start from the default settings (100ms, normal range, free-running)
    pub const fn new() -> Self {
        Self {
            integration_time: IntegrationTime::Ms100,
            dynamic_range: DynamicRange::Normal,
            forced_mode: false,
        }
    }

    /// Set the integration time
    pub const fn integration_time(mut self, integration_time: IntegrationTime) -> Self {
        self.integration_time = integration_time;
        self
    }

    /// Set the dynamic range
    pub const fn dynamic_range(mut self, dynamic_range: DynamicRange) -> Self {
        self.dynamic_range = dynamic_range;
        self
    }

    /// Enable or disable forced (one-shot) mode
    pub const fn forced_mode(mut self, forced_mode: bool) -> Self {
        self.forced_mode = forced_mode;
        self
    }
}

const SD: u16 = 1 << 0;
const UV_AF: u16 = 1 << 1;
const UV_TRIG: u16 = 1 << 2;
const UV_HD: u16 = 1 << 3;
const UV_IT_SHIFT: u16 = 4;
const UV_IT_MASK: u16 = 0b111;

/// Contents of the UV_CONF register.
///
/// Only the low byte carries fields; bit 7 and the high byte are reserved and
/// always written as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct ConfReg {
    /// Sensor powered down
    pub shutdown: bool,
    /// Active force (one-shot) mode
    pub forced_mode: bool,
    /// Start a one-shot conversion; the device clears this itself
    pub trigger: bool,
    /// Dynamic range
    pub dynamic_range: DynamicRange,
    /// Integration time
    pub integration_time: IntegrationTime,
}

impl ConfReg {
    /// Register value after power-on: shut down, 50ms, normal range, free-running
    pub const POWER_ON: Self = Self {
        shutdown: true,
        forced_mode: false,
        trigger: false,
        dynamic_range: DynamicRange::Normal,
        integration_time: IntegrationTime::Ms50,
    };

    /// Encode into the 16-bit register value
    pub const fn to_bits(&self) -> u16 {
        let mut bits = (self.integration_time as u16) << UV_IT_SHIFT;
        if self.shutdown {
            bits |= SD;
        }
        if self.forced_mode {
            bits |= UV_AF;
        }
        if self.trigger {
            bits |= UV_TRIG;
        }
        if let DynamicRange::High = self.dynamic_range {
            bits |= UV_HD;
        }
        bits
    }

    /// Decode a 16-bit register value.
    ///
    /// Returns `None` if the integration time selector holds a reserved value.
    pub const fn from_bits(bits: u16) -> Option<Self> {
        let integration_time =
            match IntegrationTime::from_selector(((bits >> UV_IT_SHIFT) & UV_IT_MASK) as u8) {
                Some(it) => it,
                None => return None,
            };
        let dynamic_range = if bits & UV_HD != 0 {
            DynamicRange::High
        } else {
            DynamicRange::Normal
        };
        Some(Self {
            shutdown: bits & SD != 0,
            forced_mode: bits & UV_AF != 0,
            trigger: bits & UV_TRIG != 0,
            dynamic_range,
            integration_time,
        })
    }

    /// Copy the measurement settings from `config`, leaving shutdown and trigger alone
    pub fn apply(&mut self, config: &Config) {
        self.integration_time = config.integration_time;
        self.dynamic_range = config.dynamic_range;
        self.forced_mode = config.forced_mode;
    }
}

impl Default for ConfReg {
    fn default() -> Self {
        Self::POWER_ON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_value() {
        assert_eq!(ConfReg::POWER_ON.to_bits(), 0x0001);
        assert_eq!(ConfReg::from_bits(0x0001), Some(ConfReg::POWER_ON));
    }

    #[test]
    fn test_integration_time_selector_bits() {
        let cases = [
            (IntegrationTime::Ms50, 0x00),
            (IntegrationTime::Ms100, 0x10),
            (IntegrationTime::Ms200, 0x20),
            (IntegrationTime::Ms400, 0x30),
            (IntegrationTime::Ms800, 0x40),
        ];
        for (it, bits) in cases {
            let reg = ConfReg {
                shutdown: false,
                integration_time: it,
                ..ConfReg::POWER_ON
            };
            assert_eq!(reg.to_bits(), bits);
        }
    }

    #[test]
    fn test_flag_bits() {
        let reg = ConfReg {
            shutdown: true,
            forced_mode: true,
            trigger: true,
            dynamic_range: DynamicRange::High,
            integration_time: IntegrationTime::Ms800,
        };
        assert_eq!(reg.to_bits(), 0b0100_1111);
        assert_eq!(ConfReg::from_bits(0b0100_1111), Some(reg));
    }

    #[test]
    fn test_reserved_selector_rejected() {
        assert_eq!(ConfReg::from_bits(0x50), None);
        assert_eq!(ConfReg::from_bits(0x70), None);
    }

    #[test]
    fn test_reserved_bits_ignored_on_decode() {
        let reg = ConfReg::from_bits(0xFF80 | 0x22).unwrap();
        assert_eq!(reg.to_bits(), 0x22);
    }

    #[test]
    fn test_apply_keeps_power_state() {
        let mut reg = ConfReg::POWER_ON;
        let config = Config::new()
            .integration_time(IntegrationTime::Ms400)
            .dynamic_range(DynamicRange::High)
            .forced_mode(true);
        reg.apply(&config);
        assert!(reg.shutdown);
        assert!(!reg.trigger);
        assert_eq!(reg.to_bits(), 0x3B);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config, Config::new());
        assert_eq!(config.integration_time.as_ms(), 100);
    }
}
