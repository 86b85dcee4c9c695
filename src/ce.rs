//! The radio's CE (chip enable) line.

use embedded_hal::digital::OutputPin;

/// An output line whose driven level can be read back.
///
/// The nRF24L01's CE pin engages active RX/TX, but deriving the chip's
/// operating mode also requires *inspecting* the line. Wrapping the pin
/// keeps the last driven level available without handing out a raw pin
/// handle; for a push-pull output the driven level is the electrical level.
pub(crate) struct CeLine<DO> {
    pin: DO,
    high: bool,
}

impl<DO: OutputPin> CeLine<DO> {
    /// Wrap `pin`. The level is assumed low until first driven.
    pub fn new(pin: DO) -> Self {
        CeLine { pin, high: false }
    }

    pub fn set_high(&mut self) -> Result<(), DO::Error> {
        self.pin.set_high()?;
        self.high = true;
        Ok(())
    }

    pub fn set_low(&mut self) -> Result<(), DO::Error> {
        self.pin.set_low()?;
        self.high = false;
        Ok(())
    }

    /// The level the line is currently driven to.
    pub fn is_high(&self) -> bool {
        self.high
    }
}
