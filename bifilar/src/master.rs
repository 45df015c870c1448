//! The bit and byte engines.
//!
//! [`I2cMaster`] owns a [`LineDriver`] and speaks the wire protocol
//! through it. This module holds the two lower layers: single-bit
//! transfers with start/stop framing, and MSB-first byte transfers with
//! the acknowledgement clock. The multi-phase transactions built on top
//! live in [`crate::transaction`].
//!
//! Timing: every transition the other party must observe is followed by
//! exactly one [`LineDriver::delay`] unit before the next clock edge.
//! A bit costs two units, a start or stop condition three.

use crate::line::LineDriver;

/// Software I2C master over a pair of GPIO lines.
///
/// The master owns its [`LineDriver`] for as long as it exists;
/// [`free`](I2cMaster::free) hands the driver back, for example to
/// reconfigure pins or to run a different bus over the same lines.
pub struct I2cMaster<L> {
    lines: L,
}

impl<L: LineDriver> I2cMaster<L> {
    /// Create a master over the given line driver.
    ///
    /// The lines are not touched here; both are expected to idle high
    /// (released), as usual for an open-drain bus at rest.
    pub fn new(lines: L) -> Self {
        Self { lines }
    }

    /// Consume the master and hand back the line driver.
    pub fn free(self) -> L {
        self.lines
    }

    // The four helpers below are the only place the inverted `set`
    // polarity of the line driver shows: high means released, low means
    // driven to ground.

    fn scl_high(&mut self) {
        self.lines.clear_set_scl(false);
    }

    fn scl_low(&mut self) {
        self.lines.clear_set_scl(true);
    }

    fn sda_high(&mut self) {
        self.lines.clear_set_sda(false);
    }

    fn sda_low(&mut self) {
        self.lines.clear_set_sda(true);
    }

    fn tick(&mut self) {
        self.lines.delay();
    }

    /// Issue a start condition: SDA falls while SCL is high.
    ///
    /// Valid on an idle bus and mid-transaction (repeated start). Leaves
    /// SCL low, ready for the first data bit.
    pub fn start(&mut self) {
        self.scl_high();
        self.sda_high();
        self.tick();
        self.sda_low();
        self.tick();
        self.scl_low();
        self.tick();
    }

    /// Issue a stop condition: SDA rises while SCL is high.
    ///
    /// Releases both lines, returning the bus to idle.
    pub fn stop(&mut self) {
        self.sda_low();
        self.tick();
        self.scl_high();
        self.tick();
        self.sda_high();
        self.tick();
    }

    /// Clock one bit out: set up SDA while SCL is low, then pulse SCL.
    fn write_bit(&mut self, bit: bool) {
        if bit {
            self.sda_high();
        } else {
            self.sda_low();
        }
        self.tick();
        self.scl_high();
        self.tick();
        self.scl_low();
    }

    /// Clock one bit in, sampling SDA at the top of the clock pulse.
    fn read_bit(&mut self) -> bool {
        // Release SDA first or the sample reads our own drive instead
        // of the other party's.
        self.sda_high();
        self.tick();
        self.scl_high();
        self.tick();
        let bit = self.lines.read_sda();
        self.scl_low();
        bit
    }

    /// Write one byte, most significant bit first, and collect the
    /// receiver's acknowledgement from the ninth clock.
    ///
    /// `start` claims the bus with a start condition beforehand; `stop`
    /// releases it afterwards. The two flags are independent so
    /// multi-phase transactions can hold the bus between bytes.
    ///
    /// Returns `true` if the receiver acknowledged, which on the wire
    /// means it pulled SDA low while this master released it.
    pub fn write_byte(&mut self, value: u8, start: bool, stop: bool) -> bool {
        if start {
            self.start();
        }

        let mut rest = value;
        for _ in 0..8 {
            self.write_bit(rest & 0x80 != 0);
            rest <<= 1;
        }

        let acked = !self.read_bit();

        if stop {
            self.stop();
        }

        acked
    }

    /// Read one byte, most significant bit first, then drive the
    /// acknowledgement bit.
    ///
    /// `ack == true` pulls SDA low on the ninth clock, telling the
    /// transmitter to keep sending; `ack == false` leaves SDA high,
    /// marking this as the final byte. `stop` releases the bus
    /// afterwards.
    ///
    /// This never issues a start condition: a read only means something
    /// once an addressing [`write_byte`](I2cMaster::write_byte) has put
    /// a device into transmit mode.
    pub fn read_byte(&mut self, ack: bool, stop: bool) -> u8 {
        let mut value = 0u8;
        for _ in 0..8 {
            value = (value << 1) | self.read_bit() as u8;
        }

        self.write_bit(!ack);

        if stop {
            self.stop();
        }

        value
    }
}
