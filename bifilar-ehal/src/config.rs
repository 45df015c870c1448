//! Bus timing configuration.

/// I2C bus timing configuration.
///
/// Only the clock frequency is configurable; the line driver derives
/// its per-unit delay from it. The presets cover the standard bus speed
/// classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Nominal SCL frequency in hertz.
    pub frequency: u32,
}

impl Config {
    /// Standard mode, 100 kHz.
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode, 400 kHz.
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus, 1 MHz.
    pub const FAST_PLUS: Self = Self { frequency: 1_000_000 };

    /// Duration of one engine timing unit in nanoseconds.
    ///
    /// The engine spends two units per transferred bit, so a unit is
    /// half the nominal clock period.
    pub fn tick_ns(&self) -> u32 {
        // Guard the degenerate zero-frequency configuration.
        500_000_000 / self.frequency.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::STANDARD
    }
}
