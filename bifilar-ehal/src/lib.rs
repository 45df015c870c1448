//! embedded-hal line drivers for the `bifilar` engine.
//!
//! The engine crate stays hardware-agnostic behind its four line
//! primitives. This crate supplies the standard implementation over
//! embedded-hal 1.0 traits: two GPIO pins and a delay provider become a
//! [`bifilar::LineDriver`], and from there a full I2C master.
//!
//! # Example
//!
//! ```
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
//! # struct Pin(bool);
//! # impl ErrorType for Pin { type Error = Infallible; }
//! # impl OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { self.0 = false; Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { self.0 = true; Ok(()) }
//! # }
//! # impl InputPin for Pin {
//! #     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(self.0) }
//! #     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(!self.0) }
//! # }
//! # struct Spin;
//! # impl DelayNs for Spin { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (scl, sda, delay) = (Pin(true), Pin(true), Spin);
//! use bifilar::I2cMaster;
//! use bifilar_ehal::{Config, GpioLines};
//!
//! let lines = GpioLines::new(scl, sda, delay, Config::FAST);
//! let mut bus = I2cMaster::new(lines);
//!
//! // Read the WHO_AM_I register of a sensor at 0x68. Nothing answers
//! // on these example pins; a real part would.
//! assert!(bus.receive_byte_data(0x68, 0x75).is_err());
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod gpio;

pub use config::Config;
pub use gpio::GpioLines;
