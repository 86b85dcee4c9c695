//! Acknowledgment payloads: staging a reply the chip will piggyback onto
//! the acknowledgment of the next packet received on pipe 0 or 1.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, mnemonics, registers, Nrf24, RadioError};
use crate::clock::Monotonic;

impl<SPI, DO, DELAY, CLK> Nrf24<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Monotonic,
{
    /// Stage `payload` as the reply to the next acknowledged packet.
    ///
    /// Replies are staged on pipe 0, the pipe carrying this radio's own
    /// address. The chip only honors staged replies while in RX mode, so a
    /// radio that is not listening is switched into RX for the upload and
    /// back out afterwards. Up to 3 replies queue up; once the queue is
    /// full the stage is refused with `Ok(false)` and the payload is
    /// dropped. Payloads beyond 32 bytes lose their tail.
    pub fn queue_response(
        &mut self,
        payload: &[u8],
    ) -> Result<bool, RadioError<SPI::Error, DO::Error>> {
        let len = payload.len().min(32);

        let was_listening = self.listening;
        if !was_listening {
            self.start_listening()?;
        }

        self.spi_read(1, registers::FIFO_STATUS)?;
        if self._buf[1] & mnemonics::TX_FULL_FIFO != 0 {
            return Ok(false);
        }

        self.spi_write_buf(commands::W_ACK_PAYLOAD, &payload[..len])?;

        if !was_listening {
            self.stop_listening()?;
        }
        Ok(true)
    }
}
