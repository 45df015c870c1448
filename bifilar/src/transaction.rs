//! The transaction engine: complete multi-phase bus operations.
//!
//! Every operation here is self-contained. It claims the bus with a
//! start condition, runs its addressing and data phases, and releases
//! the bus with a stop condition on every path out, refusals included,
//! so a failed transaction never leaves the bus claimed mid-transfer.
//! A missing acknowledgement is the only failure mode; retry policy
//! belongs to the caller.

use embedded_hal::i2c::NoAcknowledgeSource;

use crate::line::LineDriver;
use crate::master::I2cMaster;

/// A transaction refused by the addressed device.
///
/// Classic bit-bang engines fold a refused read into a data byte of
/// zero, leaving real `0x00` data indistinguishable from an absent
/// device. The typed error keeps the two apart; `.unwrap_or(0)`
/// restores the old contract where the distinction does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No device pulled SDA low on an acknowledgement clock. Carries
    /// which phase went unanswered.
    NoAcknowledge(NoAcknowledgeSource),
}

/// Form the on-wire address byte: seven address bits shifted up one,
/// with the transfer direction in bit 0 (`read == true` sets it).
pub fn address_byte(address: u8, read: bool) -> u8 {
    (address << 1) | read as u8
}

impl<L: LineDriver> I2cMaster<L> {
    /// Force a stop and surface the missing acknowledgement.
    ///
    /// Every refusal funnels through here, so an aborted transaction
    /// still releases the bus.
    pub(crate) fn abort<T>(&mut self, source: NoAcknowledgeSource) -> Result<T, Error> {
        self.stop();
        Err(Error::NoAcknowledge(source))
    }

    /// Write a run of bytes with no framing, aborting on the first one
    /// that goes unacknowledged.
    pub(crate) fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &byte in bytes {
            if !self.write_byte(byte, false, false) {
                return self.abort(NoAcknowledgeSource::Data);
            }
        }
        Ok(())
    }

    /// Read into a non-empty buffer, acknowledging every byte but the
    /// last, and release the bus after the final one.
    fn read_into(&mut self, buf: &mut [u8]) {
        let last = buf.len() - 1;
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.read_byte(i != last, i == last);
        }
    }

    /// Send a single byte to a device.
    ///
    /// Wire sequence: start, address with the write bit, the data byte,
    /// stop.
    pub fn send_byte(&mut self, address: u8, data: u8) -> Result<(), Error> {
        if !self.write_byte(address_byte(address, false), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        if !self.write_byte(data, false, true) {
            // write_byte already released the bus via its stop flag.
            return Err(Error::NoAcknowledge(NoAcknowledgeSource::Data));
        }
        Ok(())
    }

    /// Receive a single byte from a device.
    ///
    /// Wire sequence: start, address with the read bit, one byte which
    /// this master leaves unacknowledged, stop.
    pub fn receive_byte(&mut self, address: u8) -> Result<u8, Error> {
        if !self.write_byte(address_byte(address, true), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        Ok(self.read_byte(false, true))
    }

    /// Write one byte to a register of a device.
    ///
    /// Wire sequence: start, address with the write bit, the register
    /// index, the data byte, stop.
    pub fn send_byte_data(&mut self, address: u8, register: u8, data: u8) -> Result<(), Error> {
        if !self.write_byte(address_byte(address, false), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        if !self.write_byte(register, false, false) {
            return self.abort(NoAcknowledgeSource::Data);
        }
        if !self.write_byte(data, false, true) {
            return Err(Error::NoAcknowledge(NoAcknowledgeSource::Data));
        }
        Ok(())
    }

    /// Read one byte from a register of a device.
    ///
    /// Wire sequence: start, address with the write bit, the register
    /// index, repeated start, address with the read bit, one byte left
    /// unacknowledged, stop. The bus stays claimed across the repeated
    /// start so no other master can slip in between the phases.
    pub fn receive_byte_data(&mut self, address: u8, register: u8) -> Result<u8, Error> {
        if !self.write_byte(address_byte(address, false), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        if !self.write_byte(register, false, false) {
            return self.abort(NoAcknowledgeSource::Data);
        }
        if !self.write_byte(address_byte(address, true), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        Ok(self.read_byte(false, true))
    }

    /// Write `bytes` to a device in one transaction.
    ///
    /// An empty slice still addresses the device, which is the usual
    /// way to probe whether anything answers at `address`.
    pub fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Error> {
        if !self.write_byte(address_byte(address, false), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        self.write_all(bytes)?;
        self.stop();
        Ok(())
    }

    /// Read `buf.len()` bytes from a device in one transaction.
    ///
    /// Every byte but the last is acknowledged so the device keeps
    /// transmitting. An empty buffer performs no bus activity at all.
    pub fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        if buf.is_empty() {
            return Ok(());
        }
        if !self.write_byte(address_byte(address, true), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        self.read_into(buf);
        Ok(())
    }

    /// Write `bytes`, then read `buf.len()` bytes after a repeated
    /// start.
    ///
    /// The classic register access: write the index, then read its
    /// contents without releasing the bus in between. With an empty
    /// `buf` this degenerates to [`write`](I2cMaster::write).
    pub fn write_read(&mut self, address: u8, bytes: &[u8], buf: &mut [u8]) -> Result<(), Error> {
        if !self.write_byte(address_byte(address, false), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        self.write_all(bytes)?;
        if buf.is_empty() {
            self.stop();
            return Ok(());
        }
        if !self.write_byte(address_byte(address, true), true, false) {
            return self.abort(NoAcknowledgeSource::Address);
        }
        self.read_into(buf);
        Ok(())
    }
}
