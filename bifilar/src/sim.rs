//! A wire-level I2C slave for exercising the engine in tests.
//!
//! [`SimSlave`] implements [`LineDriver`] and plays the other side of
//! the bus. It watches the transitions the engine produces, decodes
//! start and stop conditions, shifts bytes in and out, and answers
//! acknowledgements from a script. Tests read the [`BusEvent`] log back
//! to assert on exactly what happened on the wire.

use heapless::Vec;

use crate::line::LineDriver;

/// Wire-level happenings, in bus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// A start or repeated start condition.
    Start,
    /// A stop condition.
    Stop,
    /// A byte shifted in from the master, with the acknowledgement the
    /// slave answered (`true` means it pulled SDA low).
    Byte(u8, bool),
    /// The acknowledgement the master drove after reading a byte
    /// (`true` means it wants more).
    MasterAck(bool),
}

#[derive(Clone, Copy)]
enum State {
    /// Nothing addressed to us; clocks are ignored.
    Idle,
    /// Shifting a byte in from the master.
    Receive,
    /// Driving the acknowledgement for a received byte.
    AckDrive,
    /// Shifting a scripted byte out to the master.
    Transmit,
    /// Listening for the master's acknowledgement of a transmitted
    /// byte.
    AckListen,
}

/// Edge-driven simulated slave.
///
/// Samples data on rising SCL edges and moves its own drive on falling
/// edges, the way a real device does, so it catches framing mistakes
/// (say, SDA moving while SCL is high) rather than assuming the engine
/// clocks correctly.
pub struct SimSlave {
    scl: bool,
    sda_master: bool,
    sda_slave: bool,
    state: State,
    shift: u8,
    bits: u8,
    awaiting_address: bool,
    read_mode: bool,
    last_ack: bool,
    pending_ack: bool,
    acks: Vec<bool, 16>,
    next_ack: usize,
    tx: Vec<u8, 16>,
    next_tx: usize,
    /// Everything observed on the wire.
    pub events: Vec<BusEvent, 32>,
    /// Rising SCL edges seen.
    pub clocks: u32,
    /// Delay units burned by the engine.
    pub ticks: u32,
}

impl SimSlave {
    /// A well-behaved slave: acknowledges every byte and answers reads
    /// with 0xFF until given data.
    pub fn new() -> Self {
        Self {
            scl: true,
            sda_master: true,
            sda_slave: true,
            state: State::Idle,
            shift: 0,
            bits: 0,
            awaiting_address: false,
            read_mode: false,
            last_ack: false,
            pending_ack: false,
            acks: Vec::new(),
            next_ack: 0,
            tx: Vec::new(),
            next_tx: 0,
            events: Vec::new(),
            clocks: 0,
            ticks: 0,
        }
    }

    /// Script the acknowledgement for each received byte, addresses
    /// included, in order. Bytes beyond the script are acknowledged.
    pub fn ack_pattern(&mut self, acks: &[bool]) {
        self.acks.extend_from_slice(acks).unwrap();
    }

    /// Queue bytes to transmit when the master reads. Reads past the
    /// queue return 0xFF, the released-bus level.
    pub fn respond_with(&mut self, bytes: &[u8]) {
        self.tx.extend_from_slice(bytes).unwrap();
    }

    fn bus_sda(&self) -> bool {
        // Open-drain wired AND: low wins.
        self.sda_master && self.sda_slave
    }

    fn take_ack(&mut self) -> bool {
        let ack = self.acks.get(self.next_ack).copied().unwrap_or(true);
        self.next_ack += 1;
        ack
    }

    fn load_tx(&mut self) {
        self.shift = self.tx.get(self.next_tx).copied().unwrap_or(0xFF);
        self.next_tx += 1;
        self.bits = 0;
        self.drive_tx_bit();
    }

    fn drive_tx_bit(&mut self) {
        self.sda_slave = (self.shift >> (7 - self.bits)) & 1 != 0;
    }

    fn on_scl_rise(&mut self) {
        self.clocks += 1;
        match self.state {
            State::Receive => {
                self.shift = (self.shift << 1) | self.bus_sda() as u8;
                self.bits += 1;
            }
            State::AckListen => {
                let wants_more = !self.bus_sda();
                self.pending_ack = wants_more;
                self.events.push(BusEvent::MasterAck(wants_more)).unwrap();
            }
            State::Idle | State::AckDrive | State::Transmit => {}
        }
    }

    fn on_scl_fall(&mut self) {
        match self.state {
            State::Receive if self.bits == 8 => {
                if self.awaiting_address {
                    self.read_mode = self.shift & 1 != 0;
                    self.awaiting_address = false;
                }
                let ack = self.take_ack();
                self.last_ack = ack;
                self.events.push(BusEvent::Byte(self.shift, ack)).unwrap();
                self.sda_slave = !ack;
                self.state = State::AckDrive;
            }
            State::AckDrive => {
                // The acknowledgement clock is over; hand the line back.
                self.sda_slave = true;
                if self.read_mode && self.last_ack {
                    self.load_tx();
                    self.state = State::Transmit;
                } else {
                    self.shift = 0;
                    self.bits = 0;
                    self.state = State::Receive;
                }
            }
            State::Transmit => {
                self.bits += 1;
                if self.bits < 8 {
                    self.drive_tx_bit();
                } else {
                    self.sda_slave = true;
                    self.state = State::AckListen;
                }
            }
            State::AckListen => {
                if self.pending_ack {
                    self.load_tx();
                    self.state = State::Transmit;
                } else {
                    self.sda_slave = true;
                    self.shift = 0;
                    self.bits = 0;
                    self.state = State::Receive;
                }
            }
            State::Receive | State::Idle => {}
        }
    }
}

impl LineDriver for SimSlave {
    fn clear_set_scl(&mut self, set: bool) {
        let level = !set;
        if level != self.scl {
            self.scl = level;
            if level {
                self.on_scl_rise();
            } else {
                self.on_scl_fall();
            }
        }
    }

    fn clear_set_sda(&mut self, set: bool) {
        let level = !set;
        if level == self.sda_master {
            return;
        }
        let before = self.bus_sda();
        self.sda_master = level;
        let after = self.bus_sda();
        // SDA moving while SCL is high is a start or stop condition.
        // The slave's own drive masks the master here, as it would on a
        // real bus.
        if self.scl && before != after {
            if after {
                self.events.push(BusEvent::Stop).unwrap();
                self.state = State::Idle;
                self.sda_slave = true;
            } else {
                self.events.push(BusEvent::Start).unwrap();
                self.state = State::Receive;
                self.shift = 0;
                self.bits = 0;
                self.awaiting_address = true;
                self.read_mode = false;
                self.sda_slave = true;
            }
        }
    }

    fn read_sda(&mut self) -> bool {
        self.bus_sda()
    }

    fn delay(&mut self) {
        self.ticks += 1;
    }
}
