//! The transmit protocol: address caching, the pipe-0 acknowledgment
//! diversion, mode save/restore around each transmission, and the polling
//! loop with its software watchdog.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{address::full_address, bits::Config, commands, registers, Nrf24, RadioError};
use crate::{clock::Monotonic, AckResponse};

/// Upper bound on one blocking transmission. The chip's own retry scheme
/// tops out near 60 ms (15 retries x ~4 ms); anything beyond this means the
/// chip stopped talking to us.
const TX_TIMEOUT_MS: u32 = 500;

/// Chip state captured before a transmission so it can be put back after.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TxSnapshot {
    pub active: bool,
    pub listening: bool,
}

/// Where to leave the chip once the transmission is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RestoreTarget {
    /// It was asleep before; put it back to sleep.
    PowerDown,
    /// It was receiving; re-enter RX (which also reclaims pipe 0).
    Listening,
    /// It was awake but idle; Standby-I, where the CE-low exit left it.
    Standby,
}

impl TxSnapshot {
    pub fn restore_target(self) -> RestoreTarget {
        if !self.active {
            RestoreTarget::PowerDown
        } else if self.listening {
            RestoreTarget::Listening
        } else {
            RestoreTarget::Standby
        }
    }
}

impl<SPI, DO, DELAY, CLK> Nrf24<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Monotonic,
{
    /// Transmit `payload` to `target`, blocking until the chip reports a
    /// terminal outcome or the watchdog expires.
    ///
    /// Empty payloads are rejected with `Ok(false)`; payloads beyond 32
    /// bytes (the chip's frame limit) lose their tail without an error.
    /// With `request_ack`, pipe 0 is pointed at `target` so the
    /// acknowledgment can be heard; the diversion stands until the next
    /// [`start_listening()`](Nrf24::start_listening).
    ///
    /// `Ok(false)` covers both retry exhaustion and watchdog expiry;
    /// [`attempt_count()`](Nrf24::attempt_count) can tell them apart.
    pub fn transmit(
        &mut self,
        target: u8,
        payload: &[u8],
        request_ack: bool,
    ) -> Result<bool, RadioError<SPI::Error, DO::Error>> {
        if payload.is_empty() {
            return Ok(false);
        }
        let len = payload.len().min(32);

        if self.tx_address != Some(target) {
            let address = full_address(self.netmask, target);
            self.spi_write_reg_buf(registers::TX_ADDR, &address)?;
            self.tx_address = Some(target);
        }

        // without an expected acknowledgment pipe 0 is irrelevant
        if request_ack && self.pipe0_address != Some(target) {
            let address = full_address(self.netmask, target);
            self.spi_write_reg_buf(registers::RX_ADDR_P0, &address)?;
            self.pipe0_address = Some(target);
        }

        self.clear_irq_flags()?;

        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]);
        let snapshot = TxSnapshot {
            active: config.power(),
            listening: self.listening,
        };

        // TX is reached through Standby-I: CE low, powered, RX-mode clear
        self._ce.set_low().map_err(RadioError::Gpo)?;
        let config = config.with_power(true).with_prim_rx(false);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        if !snapshot.active {
            // cold start: allow extra margin over the plain 1.5 ms
            // activation delay for the oscillator
            self._delay_impl.delay_ms(2);
        }

        self._buf[0] = if request_ack {
            commands::W_TX_PAYLOAD
        } else {
            commands::W_TX_PAYLOAD_NO_ACK
        };
        self._buf[1..=len].copy_from_slice(&payload[..len]);
        self.spi_transfer(len as u8 + 1)?;

        // CE high starts the transmission; the PLL locks in ~130 us
        self._ce.set_high().map_err(RadioError::Gpo)?;

        // Poll STATUS until a terminal flag. The chip's retry machinery is
        // working underneath; the watchdog only covers a chip that never
        // raises either flag (wiring gone, power brown-out).
        let started = self._clock.now_ms();
        let complete = loop {
            self.update()?;
            if self._status.tx_ds() {
                break true;
            }
            if self._status.tx_df() {
                break false;
            }
            if self._clock.now_ms().wrapping_sub(started) >= TX_TIMEOUT_MS {
                break false;
            }
        };

        // back to Standby-I
        self._ce.set_low().map_err(RadioError::Gpo)?;

        match snapshot.restore_target() {
            RestoreTarget::PowerDown => self.set_active(false)?,
            RestoreTarget::Listening => self.start_listening()?,
            RestoreTarget::Standby => {}
        }

        Ok(complete)
    }

    /// Transmit to `target`, soliciting an acknowledgment per the
    /// driver-wide setting. See [`transmit()`](Nrf24::transmit).
    pub fn send(
        &mut self,
        target: u8,
        payload: &[u8],
    ) -> Result<bool, RadioError<SPI::Error, DO::Error>> {
        let request_ack = self.ack_enabled;
        self.transmit(target, payload, request_ack)
    }

    /// How many transmission attempts the last send took, from the chip's
    /// OBSERVE_TX diagnostic register.
    pub fn attempt_count(&mut self) -> Result<u8, RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::OBSERVE_TX)?;
        Ok(self._buf[1] & 0x0F)
    }

    /// Send to `target` and collect a reply payload piggybacked on the
    /// acknowledgment, if the peer staged one.
    ///
    /// The receive queue is cleared first so stale packets cannot pass for
    /// this exchange's reply. When acknowledgments are disabled driver-wide
    /// there is nothing to collect and a successful send reports
    /// [`AckResponse::Empty`].
    pub fn send_and_await_response(
        &mut self,
        target: u8,
        payload: &[u8],
        response: &mut [u8],
    ) -> Result<AckResponse, RadioError<SPI::Error, DO::Error>> {
        self.flush_rx()?;

        if !self.send(target, payload)? {
            return Ok(AckResponse::Failed);
        }

        if self.ack_enabled {
            // a no-op transfer refreshes STATUS without touching anything
            self.update()?;
            if self._status.rx_dr() {
                let count = self.read(response)?;
                return Ok(AckResponse::Received(count));
            }
        }
        Ok(AckResponse::Empty)
    }

    /// Transmit to this radio's own address with no acknowledgment
    /// solicited: every peer listening on that address receives it, nobody
    /// replies.
    pub fn broadcast(&mut self, payload: &[u8]) -> Result<bool, RadioError<SPI::Error, DO::Error>> {
        let own = self.own_address;
        self.transmit(own, payload, false)
    }
}
