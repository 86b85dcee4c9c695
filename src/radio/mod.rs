//! The driver proper: register access, configuration, mode sequencing,
//! transmit/receive protocol and acknowledgment-payload staging.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

pub(crate) mod bits;
pub mod constants;
mod ack;
mod address;
mod init;
mod mode;
mod rx;
mod tx;

pub use constants::{commands, mnemonics, registers};

use crate::{ce::CeLine, clock::Monotonic, types::StatusFlags};

/// Errors surfaced by the driver.
///
/// Only transport failures and states the caller cannot recover from end up
/// here. Expected protocol outcomes, like an unacknowledged transmission or
/// a full acknowledgment queue, are reported through return values instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioError<SPI, DO> {
    /// A SPI bus transaction failed.
    Spi(SPI),
    /// Driving the CE line failed.
    Gpo(DO),
    /// The chip clocked out a value no healthy chip produces, such as a
    /// payload width beyond 32 bytes. Usually wiring trouble.
    BinaryCorruption,
    /// All 5 extra receive pipes are already assigned.
    TooManyPipes,
}

/// Driver for one nRF24L01+ module.
///
/// `SPI` is the bus-plus-select pair: every register or payload transfer is
/// one [`SpiDevice`] transaction, so the select line frames each exchange
/// and two drivers can never interleave on a shared bus. `DO` drives the CE
/// line, `DELAY` provides the mandated settling delays, and `CLK` bounds
/// the transmit watchdog.
///
/// One instance owns all of its cached chip state; nothing is shared, so
/// multiple radios on one MCU cannot cross-contaminate. A single instance
/// is not internally locked: callers sharing one across contexts must wrap
/// each public call in their own mutual exclusion.
pub struct Nrf24<SPI, DO, DELAY, CLK> {
    _spi: SPI,
    _ce: CeLine<DO>,
    _delay_impl: DELAY,
    _clock: CLK,
    _buf: [u8; 33],
    _status: StatusFlags,
    pub(crate) netmask: u32,
    pub(crate) own_address: u8,
    pub(crate) extra_pipes: u8,
    pub(crate) listening: bool,
    pub(crate) ack_enabled: bool,
    pub(crate) tx_address: Option<u8>,
    pub(crate) pipe0_address: Option<u8>,
}

impl<SPI, DO, DELAY, CLK> Nrf24<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Monotonic,
{
    /// Instantiate a driver for the radio wired to `spi` and `ce_pin`.
    ///
    /// The chip's CSN pin belongs to the [`SpiDevice`] given as `spi`. Keep
    /// the bus clock comfortably below the chip's 10 MHz maximum; marginal
    /// wiring shows up as corrupted transfers long before outright faults.
    ///
    /// Call [`init()`](Nrf24::init) before anything else.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY, clock: CLK) -> Self {
        Nrf24 {
            _spi: spi,
            _ce: CeLine::new(ce_pin),
            _delay_impl: delay_impl,
            _clock: clock,
            _buf: [0u8; 33],
            _status: StatusFlags::from_bits(0),
            netmask: 0,
            own_address: 0,
            extra_pipes: 0,
            listening: false,
            ack_enabled: true,
            tx_address: None,
            pipe0_address: None,
        }
    }

    fn spi_transfer(&mut self, len: u8) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len as usize])
            .map_err(RadioError::Spi)?;
        // the chip clocks STATUS out first on every transfer
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// Also used for 1-byte commands (`len == 0`), which double as a STATUS
    /// probe without naming any register.
    fn spi_read(&mut self, len: u8, command: u8) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        // zero the padding so stale response bytes never reach the bus
        self._buf[1..=len as usize].fill(0);
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(
        &mut self,
        reg: u8,
        byte: u8,
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self._buf[0] = reg | commands::W_REGISTER;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        let len = buf.len();
        self._buf[1..=len].copy_from_slice(buf);
        self.spi_transfer(len as u8 + 1)
    }

    fn spi_write_reg_buf(
        &mut self,
        reg: u8,
        buf: &[u8],
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_write_buf(reg | commands::W_REGISTER, buf)
    }

    /// Refresh [`status_flags()`](Nrf24::status_flags) with a no-op transfer.
    pub fn update(&mut self) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(0, commands::NOP)
    }

    /// The STATUS byte captured by the most recent bus transfer.
    pub fn status_flags(&self) -> StatusFlags {
        self._status
    }

    /// Write-1-to-clear all three interrupt flags.
    fn clear_irq_flags(&mut self) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::STATUS, StatusFlags::IRQ_MASK)
    }

    /// Discard everything in the RX FIFO.
    pub fn flush_rx(&mut self) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(0, commands::FLUSH_RX)
    }

    /// Discard everything in the TX FIFO.
    pub fn flush_tx(&mut self) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(0, commands::FLUSH_TX)
    }
}
