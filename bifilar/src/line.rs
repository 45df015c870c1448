//! The physical line contract between the engine and the platform.
//!
//! The engine never touches hardware. Everything it does funnels through
//! the four primitives below: drive or release each bus line, sample the
//! data line, and wait one timing unit.

/// Platform-supplied control over the two bus lines.
///
/// # Polarity
///
/// The `set` flag on the drive primitives follows the open-drain assert
/// convention: **`set == true` sinks the line to ground (logic low)**,
/// and `set == false` releases it so the bus pull-up restores logic
/// high. This is inverted relative to the usual "set means high"
/// reading. Implementations must preserve it exactly or the bus idles
/// low and every condition comes out backwards; the polarity tests in
/// `bifilar-ehal` show the expected mapping onto push/pull pin calls.
///
/// # Timing
///
/// [`delay`](LineDriver::delay) blocks for one timing unit. The engine
/// spends two units per transferred bit, so a unit is half the nominal
/// SCL period: 5 us for a 100 kHz bus, 1.25 us for 400 kHz. The absolute
/// duration is entirely the implementation's choice, but every call must
/// take the same time.
///
/// # Electrical expectations
///
/// Both pins are open-drain with pull-ups and idle high. A released SDA
/// must remain readable, since data and acknowledgement bits from the
/// other party are sampled while this master releases the line.
pub trait LineDriver {
    /// Drive (`set == true`, line low) or release (`set == false`, line
    /// high) the clock line.
    fn clear_set_scl(&mut self, set: bool);

    /// Drive (`set == true`, line low) or release (`set == false`, line
    /// high) the data line.
    fn clear_set_sda(&mut self, set: bool);

    /// Sample the current logic level of the data line.
    fn read_sda(&mut self) -> bool;

    /// Block for one timing unit.
    fn delay(&mut self);
}
