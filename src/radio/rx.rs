//! The receive path: polling for arrived packets, dequeueing them and the
//! C-string convenience reader.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, mnemonics, registers, Nrf24, RadioError};
use crate::{clock::Monotonic, types::StatusFlags};

impl<SPI, DO, DELAY, CLK> Nrf24<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Monotonic,
{
    /// Poll for a received packet.
    ///
    /// Returns the payload length of the packet at the head of the receive
    /// queue, or 0 when nothing has arrived. When a packet is present and
    /// `pipe` is given, it is filled with the hardware pipe number (0..=5)
    /// the packet arrived on.
    ///
    /// Reads the STATUS register directly rather than trusting the copy
    /// piggybacked on earlier transfers, which may predate the packet.
    pub fn available(
        &mut self,
        pipe: Option<&mut u8>,
    ) -> Result<u8, RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::STATUS)?;
        let flags = StatusFlags::from_bits(self._buf[1]);
        if !flags.rx_dr() {
            return Ok(0);
        }
        if let Some(pipe) = pipe {
            *pipe = flags.rx_pipe();
        }
        self.dynamic_payload_length()
    }

    /// Ask the chip how long the payload at the queue head is.
    fn dynamic_payload_length(&mut self) -> Result<u8, RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, commands::R_RX_PL_WID)?;
        let width = self._buf[1];
        if width > 32 {
            // a healthy chip never reports this; the bus is lying to us
            return Err(RadioError::BinaryCorruption);
        }
        Ok(width)
    }

    /// Dequeue the packet at the head of the receive queue into `buf`.
    ///
    /// Returns the number of bytes written. A payload longer than `buf` is
    /// clamped to fit; the bytes the clamp left behind stay in the FIFO and
    /// will surface at the front of the next read, so pass a 32-byte buffer
    /// when whole payloads matter. Reception is paused (CE low) for the
    /// duration of the transfer and resumed after.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<u8, RadioError<SPI::Error, DO::Error>> {
        self._ce.set_low().map_err(RadioError::Gpo)?;

        let width = self.dynamic_payload_length()?;
        let count = buf.len().min(32).min(width as usize);

        self.spi_read(count as u8, commands::R_RX_PAYLOAD)?;
        buf[..count].copy_from_slice(&self._buf[1..=count]);

        // acknowledge receipt so the flag can signal the next packet
        self.spi_write_byte(registers::STATUS, mnemonics::MASK_RX_DR)?;

        self._ce.set_high().map_err(RadioError::Gpo)?;
        Ok(count as u8)
    }

    /// Dequeue a packet as a NUL-terminated string.
    ///
    /// Reads up to `buf.len() - 1` payload bytes and terminates them with a
    /// NUL, so `buf` always holds a valid C string afterwards. Returns the
    /// number of payload bytes (the NUL not counted). An empty `buf` has no
    /// room for even the terminator; nothing is read and 0 is returned.
    pub fn read_text(&mut self, buf: &mut [u8]) -> Result<u8, RadioError<SPI::Error, DO::Error>> {
        if buf.is_empty() {
            return Ok(0);
        }
        let last = buf.len() - 1;
        let count = self.read(&mut buf[..last])?;
        buf[count as usize] = 0;
        Ok(count)
    }
}
