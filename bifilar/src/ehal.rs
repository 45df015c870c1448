//! embedded-hal 1.0 integration.
//!
//! [`I2cMaster`] implements [`embedded_hal::i2c::I2c`], so ecosystem
//! device drivers run over the software bus unchanged. `transaction`
//! follows the trait contract: one start up front, a repeated start
//! with re-addressing whenever the operation direction changes,
//! adjacent same-direction operations continuing as a single transfer,
//! and exactly one stop at the end.

use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation, SevenBitAddress};

use crate::line::LineDriver;
use crate::master::I2cMaster;
use crate::transaction::{address_byte, Error};

impl i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match *self {
            Error::NoAcknowledge(source) => ErrorKind::NoAcknowledge(source),
        }
    }
}

impl<L: LineDriver> i2c::ErrorType for I2cMaster<L> {
    type Error = Error;
}

impl<L: LineDriver> i2c::I2c for I2cMaster<L> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if operations.is_empty() {
            return Ok(());
        }

        let mut current: Option<bool> = None;
        for i in 0..operations.len() {
            let is_read = matches!(operations[i], Operation::Read(_));
            if current != Some(is_read) {
                // Start (or repeated start) and re-address on every
                // direction change.
                if !self.write_byte(address_byte(address, is_read), true, false) {
                    return self.abort(NoAcknowledgeSource::Address);
                }
                current = Some(is_read);
            }

            // Empty reads put no bytes on the wire, so only a later
            // non-empty read before any direction change keeps this
            // transfer going.
            let continues = operations[i + 1..]
                .iter()
                .find_map(|op| match op {
                    Operation::Read(buf) if buf.is_empty() => None,
                    Operation::Read(_) => Some(true),
                    Operation::Write(_) => Some(false),
                })
                .unwrap_or(false);
            match &mut operations[i] {
                Operation::Write(bytes) => self.write_all(bytes)?,
                Operation::Read(buf) => {
                    if buf.is_empty() {
                        continue;
                    }
                    // Acknowledge everything except the final byte
                    // before a direction change or the trailing stop.
                    let last = buf.len() - 1;
                    for (j, slot) in buf.iter_mut().enumerate() {
                        *slot = self.read_byte(j != last || continues, false);
                    }
                }
            }
        }

        self.stop();
        Ok(())
    }
}
