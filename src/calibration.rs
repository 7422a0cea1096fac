//! Dark-current and visible/IR compensation of raw UV counts
//!
//! Coefficients come from the Vishay application note "Designing the VEML6075
//! into an Application" for an open-air sensor without a diffuser.

/// Visible compensation coefficient for UVA
pub const UVA_VIS_COEFF: f32 = 2.22;
/// IR compensation coefficient for UVA
pub const UVA_IR_COEFF: f32 = 1.33;
/// Visible compensation coefficient for UVB
pub const UVB_VIS_COEFF: f32 = 2.95;
/// IR compensation coefficient for UVB
pub const UVB_IR_COEFF: f32 = 1.74;
/// UV index per compensated UVA count
pub const UVA_RESPONSE: f32 = 0.001461;
/// UV index per compensated UVB count
pub const UVB_RESPONSE: f32 = 0.002591;

/// Raw counts from one acquisition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct RawReading {
    /// UVA channel
    pub uva: u16,
    /// UVB channel
    pub uvb: u16,
    /// Dark current
    pub dark: u16,
    /// Visible compensation channel (UVCOMP1)
    pub vis_comp: u16,
    /// IR compensation channel (UVCOMP2)
    pub ir_comp: u16,
}

/// Calibrated values derived from a [`RawReading`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct UvReading {
    /// Compensated UVA counts
    pub uva: f32,
    /// Compensated UVB counts
    pub uvb: f32,
    /// UV index
    pub uv_index: f32,
}

impl RawReading {
    /// Compensated UVA counts, never negative
    pub fn uva(&self) -> f32 {
        self.compensate(self.uva, UVA_VIS_COEFF, UVA_IR_COEFF)
    }

    /// Compensated UVB counts, never negative
    pub fn uvb(&self) -> f32 {
        self.compensate(self.uvb, UVB_VIS_COEFF, UVB_IR_COEFF)
    }

    /// Response-weighted mean of compensated UVA and UVB
    pub fn uv_index(&self) -> f32 {
        uv_index(self.uva(), self.uvb())
    }

    /// All calibrated values at once
    pub fn calibrate(&self) -> UvReading {
        let uva = self.uva();
        let uvb = self.uvb();
        UvReading {
            uva,
            uvb,
            uv_index: uv_index(uva, uvb),
        }
    }

    fn compensate(&self, channel: u16, vis_coeff: f32, ir_coeff: f32) -> f32 {
        let above_dark = |count: u16| f32::from(count.saturating_sub(self.dark));

        let channel = above_dark(channel);
        let vis = above_dark(self.vis_comp) * vis_coeff;
        let ir = above_dark(self.ir_comp) * ir_coeff;

        // Each term is removed and clamped separately
        let without_ir = (channel - ir).max(0.0);
        (without_ir - vis).max(0.0)
    }
}

fn uv_index(uva: f32, uvb: f32) -> f32 {
    (uva * UVA_RESPONSE + uvb * UVB_RESPONSE) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-2;

    fn reading(uva: u16, uvb: u16, dark: u16, vis_comp: u16, ir_comp: u16) -> RawReading {
        RawReading {
            uva,
            uvb,
            dark,
            vis_comp,
            ir_comp,
        }
    }

    #[test]
    fn test_worked_example() {
        let raw = reading(2000, 2500, 100, 500, 300);

        assert!((raw.uva() - 746.0).abs() < EPS, "uva = {}", raw.uva());
        assert!((raw.uvb() - 872.0).abs() < EPS, "uvb = {}", raw.uvb());

        let expected = (746.0 * 0.001461 + 872.0 * 0.002591) / 2.0;
        assert!((raw.uv_index() - expected).abs() < 1e-4);
        assert!((raw.uv_index() - 1.675).abs() < 1e-3);
    }

    #[test]
    fn test_all_zero_snapshot() {
        let raw = RawReading::default();
        assert_eq!(raw.uva(), 0.0);
        assert_eq!(raw.uvb(), 0.0);
        assert_eq!(raw.uv_index(), 0.0);
    }

    #[test]
    fn test_channel_at_or_below_dark_is_zero() {
        for uva in [0, 50, 99, 100] {
            let raw = reading(uva, uva, 100, 0, 0);
            assert_eq!(raw.uva(), 0.0);
            assert_eq!(raw.uvb(), 0.0);
        }
        // compensation channels below dark must not add signal back
        let raw = reading(90, 90, 100, 10, 10);
        assert_eq!(raw.uva(), 0.0);
        assert_eq!(raw.uvb(), 0.0);
    }

    #[test]
    fn test_compensation_channels_below_dark_clamp() {
        let raw = reading(600, 600, 100, 20, 30);
        assert!((raw.uva() - 500.0).abs() < EPS);
        assert!((raw.uvb() - 500.0).abs() < EPS);
    }

    #[test]
    fn test_ir_overshoot_clamps_before_visible_term() {
        // IR term alone exceeds the channel
        let raw = reading(200, 200, 0, 0, 1000);
        assert_eq!(raw.uva(), 0.0);
        assert_eq!(raw.uvb(), 0.0);

        // visible term alone exceeds what is left after IR
        let raw = reading(1000, 1000, 0, 400, 100);
        assert_eq!(raw.uva(), 0.0);
        assert_eq!(raw.uvb(), 0.0);
    }

    #[test]
    fn test_monotonic_in_channel_count() {
        let mut prev_uva = 0.0;
        let mut prev_uvb = 0.0;
        for count in (0..=u16::MAX).step_by(97) {
            let raw = reading(count, count, 100, 500, 300);
            assert!(raw.uva() >= prev_uva);
            assert!(raw.uvb() >= prev_uvb);
            prev_uva = raw.uva();
            prev_uvb = raw.uvb();
        }
    }

    #[test]
    fn test_calibrate_matches_individual_values() {
        let raw = reading(2000, 2500, 100, 500, 300);
        let uv = raw.calibrate();
        assert_eq!(uv.uva, raw.uva());
        assert_eq!(uv.uvb, raw.uvb());
        assert_eq!(uv.uv_index, raw.uv_index());
    }
}
