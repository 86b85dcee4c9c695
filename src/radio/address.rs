//! The addressing scheme: a shared 32-bit netmask plus a 1-byte node
//! address form each 5-byte hardware address, and up to 6 receive pipes
//! listen on such addresses simultaneously.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, Nrf24, RadioError};
use crate::clock::Monotonic;

/// Compose the 5-byte on-air address for `node`: the node byte first,
/// then the netmask little-endian.
///
/// Two nodes sharing a netmask and differing in node byte can never
/// collide; nodes on different netmasks never interoperate.
pub(crate) fn full_address(netmask: u32, node: u8) -> [u8; 5] {
    [
        node,
        netmask as u8,
        (netmask >> 8) as u8,
        (netmask >> 16) as u8,
        (netmask >> 24) as u8,
    ]
}

/// Inverse of [`full_address`].
#[cfg(test)]
pub(crate) fn split_address(address: [u8; 5]) -> (u8, u32) {
    let netmask = (address[1] as u32)
        | (address[2] as u32) << 8
        | (address[3] as u32) << 16
        | (address[4] as u32) << 24;
    (address[0], netmask)
}

impl<SPI, DO, DELAY, CLK> Nrf24<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Monotonic,
{
    /// Claim `node` as this radio's own address.
    ///
    /// Programs pipe 0 with the full address and enables it. Pipe 0 doubles
    /// as the acknowledgment-capture pipe during sends, so it may be
    /// transiently re-pointed at a peer; [`start_listening()`]
    /// (Nrf24::start_listening) puts the own address back.
    pub fn set_node_address(&mut self, node: u8) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.own_address = node;

        let address = full_address(self.netmask, node);
        self.spi_write_reg_buf(registers::RX_ADDR_P0, &address)?;
        self.pipe0_address = Some(node);

        self.spi_read(1, registers::EN_RXADDR)?;
        let out = self._buf[1] | 0x01;
        self.spi_write_byte(registers::EN_RXADDR, out)
    }

    /// Assign the next free receive pipe to `node` and start listening.
    ///
    /// Returns the 0-based listener slot. The first listener gets a full
    /// 5-byte pipe address; later ones store only their node byte and share
    /// the first listener's upper bytes (a property of the chip, which is
    /// why they must all be on one netmask anyway). Fails with
    /// [`RadioError::TooManyPipes`] once 5 listeners exist; nothing is
    /// rolled back on failure.
    pub fn listen_to_address(&mut self, node: u8) -> Result<u8, RadioError<SPI::Error, DO::Error>> {
        if self.extra_pipes >= 5 {
            return Err(RadioError::TooManyPipes);
        }

        // pipe 0 is the own address; listeners occupy pipes 1..=5
        let pipe = self.extra_pipes + 1;
        if pipe == 1 {
            let address = full_address(self.netmask, node);
            self.spi_write_reg_buf(registers::RX_ADDR_P0 + pipe, &address)?;
        } else {
            self.spi_write_byte(registers::RX_ADDR_P0 + pipe, node)?;
        }

        self.spi_read(1, registers::EN_RXADDR)?;
        let out = self._buf[1] | (1 << pipe);
        self.spi_write_byte(registers::EN_RXADDR, out)?;

        // assigning a listener is a statement of intent to receive
        self.start_listening()?;

        let slot = self.extra_pipes;
        self.extra_pipes += 1;
        Ok(slot)
    }
}
