//! Line drivers over embedded-hal GPIO and delay providers.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use bifilar::LineDriver;

use crate::config::Config;

/// Lift an infallible pin result out of its wrapper.
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => match e {},
    }
}

/// [`LineDriver`] over a pair of embedded-hal pins and a delay
/// provider.
///
/// Both pins must be configured open-drain, so that `set_high` releases
/// the line to the pull-up instead of driving it. SDA additionally
/// needs to be readable while released, which open-drain outputs on
/// most HALs are.
///
/// The pin error type is pinned to [`Infallible`], which nearly every
/// chip HAL uses for plain GPIO. That keeps the engine's four line
/// primitives total, with no error channel to thread through bit
/// transfers.
pub struct GpioLines<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
    tick_ns: u32,
}

impl<SCL, SDA, D> GpioLines<SCL, SDA, D>
where
    SCL: OutputPin<Error = Infallible>,
    SDA: OutputPin<Error = Infallible> + InputPin<Error = Infallible>,
    D: DelayNs,
{
    /// Wrap two pins and a delay provider into a line driver.
    ///
    /// Releases both lines, so the bus starts out idle high.
    pub fn new(scl: SCL, sda: SDA, delay: D, config: Config) -> Self {
        let mut lines = Self {
            scl,
            sda,
            delay,
            tick_ns: config.tick_ns(),
        };
        infallible(lines.scl.set_high());
        infallible(lines.sda.set_high());
        lines
    }

    /// Release the pins and the delay provider.
    pub fn free(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }
}

impl<SCL, SDA, D> LineDriver for GpioLines<SCL, SDA, D>
where
    SCL: OutputPin<Error = Infallible>,
    SDA: OutputPin<Error = Infallible> + InputPin<Error = Infallible>,
    D: DelayNs,
{
    fn clear_set_scl(&mut self, set: bool) {
        // set sinks the open-drain line low; clear releases it to the
        // pull-up.
        if set {
            infallible(self.scl.set_low());
        } else {
            infallible(self.scl.set_high());
        }
    }

    fn clear_set_sda(&mut self, set: bool) {
        if set {
            infallible(self.sda.set_low());
        } else {
            infallible(self.sda.set_high());
        }
    }

    fn read_sda(&mut self) -> bool {
        infallible(self.sda.is_high())
    }

    fn delay(&mut self) {
        self.delay.delay_ns(self.tick_ns);
    }
}
