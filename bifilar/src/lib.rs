//! Software (bit-banged) I2C master.
//!
//! Drives an I2C bus in master mode over two GPIO lines, with no I2C
//! peripheral involved. Everything the engine does to the outside world
//! goes through the four primitives of [`LineDriver`]: drive or release
//! either line, sample SDA, and wait one timing unit. Supply those four
//! and any pair of pins becomes a bus.
//!
//! ```text
//!   embedded_hal::i2c::I2c          ecosystem device drivers
//!            |
//!   I2cMaster transactions          send/receive, slices, write_read
//!            |
//!   I2cMaster bytes                 MSB-first + acknowledgement clock
//!            |
//!   I2cMaster bits                  start/stop framing, bit transfers
//!            |
//!   LineDriver                      platform GPIO + busy-wait
//! ```
//!
//! The `bifilar-ehal` companion crate implements [`LineDriver`] over
//! embedded-hal 1.0 pins and delay providers.
//!
//! # Example
//!
//! ```
//! use bifilar::{I2cMaster, LineDriver};
//!
//! // A trivial line driver for a made-up platform. Real ones poke GPIO
//! // registers and busy-wait; see the `bifilar-ehal` crate.
//! struct Lines {
//!     scl: bool,
//!     sda: bool,
//! }
//!
//! impl LineDriver for Lines {
//!     fn clear_set_scl(&mut self, set: bool) {
//!         self.scl = !set;
//!     }
//!     fn clear_set_sda(&mut self, set: bool) {
//!         self.sda = !set;
//!     }
//!     fn read_sda(&mut self) -> bool {
//!         self.sda
//!     }
//!     fn delay(&mut self) {}
//! }
//!
//! let mut bus = I2cMaster::new(Lines { scl: true, sda: true });
//!
//! // Nothing on this bus answers, so the address byte goes
//! // unacknowledged.
//! assert!(bus.send_byte(0x50, 0x3C).is_err());
//!
//! // Even the aborted transaction releases both lines on its way out.
//! let lines = bus.free();
//! assert!(lines.scl && lines.sda);
//! ```
//!
//! # Limitations
//!
//! Single master only. The engine never samples SCL, so it cannot detect
//! clock stretching, arbitration loss, or another master on the bus. A
//! stretching slave will be clocked faster than it can answer.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ehal;
pub mod line;
pub mod master;
pub mod transaction;

#[cfg(test)]
mod sim;

pub use line::LineDriver;
pub use master::I2cMaster;
pub use transaction::{address_byte, Error};
