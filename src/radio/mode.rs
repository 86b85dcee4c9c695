//! Power and mode sequencing: the chip's operating-mode state machine,
//! driven through the power bit, the RX-mode bit and the CE line.

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{address::full_address, bits::Config, mnemonics, registers, Nrf24, RadioError};
use crate::{clock::Monotonic, Mode};

impl<SPI, DO, DELAY, CLK> Nrf24<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Monotonic,
{
    /// Set or clear the power bit, then block for the 1.5 ms crystal
    /// settling time.
    ///
    /// The datasheet leaves that wait to the MCU, and 1.5 ms covers the
    /// worst case (internal oscillator); an external crystal would settle
    /// in 150 µs. The delay is a hard timing contract: registers written
    /// during settling do not reliably stick.
    pub fn set_active(&mut self, active: bool) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]).with_power(active);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;

        self._delay_impl.delay_us(1500);
        Ok(())
    }

    /// Read the power bit back.
    pub fn is_active(&mut self) -> Result<bool, RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::CONFIG)?;
        Ok(Config::from_bits(self._buf[1]).power())
    }

    /// Enter RX mode on all enabled pipes.
    ///
    /// Clears pending interrupt flags, undoes any pipe-0 diversion left by
    /// an acknowledged send, raises CE and flushes both FIFOs. The chip
    /// needs ~130 µs to actually start receiving; this call does not wait
    /// for that, so an immediate [`available()`](Nrf24::available) may
    /// legitimately report nothing.
    pub fn start_listening(&mut self) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1])
            .with_power(true)
            .with_prim_rx(true);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;

        self.clear_irq_flags()?;

        // a send may have pointed pipe 0 at its target to catch the
        // acknowledgment; reclaim it
        if self.pipe0_address.is_some() && self.pipe0_address != Some(self.own_address) {
            let address = full_address(self.netmask, self.own_address);
            self.spi_write_reg_buf(registers::RX_ADDR_P0, &address)?;
            self.pipe0_address = Some(self.own_address);
        }

        self._ce.set_high().map_err(RadioError::Gpo)?;

        // a clean slate
        self.flush_rx()?;
        self.flush_tx()?;

        self.listening = true;
        Ok(())
    }

    /// Leave RX mode and drop straight to power-down, skipping the
    /// intermediate standby. Flushes both FIFOs.
    pub fn stop_listening(&mut self) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1])
            .with_power(false)
            .with_prim_rx(false);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;

        self._ce.set_low().map_err(RadioError::Gpo)?;

        self.flush_rx()?;
        self.flush_tx()?;

        self.listening = false;
        Ok(())
    }

    /// Derive the chip's operating mode from ground truth.
    ///
    /// Intended for diagnostics. The result is computed fresh from the
    /// CONFIG register, the CE level and (when needed) the TX FIFO state;
    /// transition windows last ~130 µs and all mode changes here block, so
    /// in-between states are not observable.
    pub fn current_mode(&mut self) -> Result<Mode, RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]);

        if !config.power() {
            return Ok(Mode::PowerDown);
        }
        if !self._ce.is_high() {
            return Ok(Mode::Standby1);
        }
        if config.prim_rx() {
            return Ok(Mode::Rx);
        }

        self.spi_read(1, registers::FIFO_STATUS)?;
        if self._buf[1] & mnemonics::TX_EMPTY != 0 {
            // nothing queued: transmission starts whenever the FIFO fills
            return Ok(Mode::Standby2);
        }
        Ok(Mode::Tx)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, Mode};
    use crate::{
        radio::commands,
        spi_test_expects,
        test::{mk_radio, SpyDelay},
        clock::FakeClock,
        Nrf24,
    };
    use embedded_hal_mock::eh1::{
        digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };
    use std::vec;

    #[test]
    fn reactivation_reports_active_and_waits_out_the_settling_time() {
        let spi_expectations = spi_test_expects![
            // set_active(false)
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Cu8],
                vec![0xEu8, 0u8],
            ),
            // set_active(true)
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Cu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Eu8],
                vec![0xEu8, 0u8],
            ),
            // is_active()
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
        ];
        let mut spi = SpiMock::new(&spi_expectations);
        let mut ce_pin = PinMock::new(&[]);
        let mut radio = Nrf24::new(
            ce_pin.clone(),
            spi.clone(),
            SpyDelay::default(),
            FakeClock::default(),
        );
        radio.set_active(false).unwrap();
        radio.set_active(true).unwrap();
        assert!(radio.is_active().unwrap());
        // two activations, each owing the chip >= 1.5 ms
        assert!(radio._delay_impl.total_ns >= 2 * 1_500_000);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn listening_round_trip_flags() {
        let ce_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let spi_expectations = spi_test_expects![
            // start_listening()
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Cu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Fu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
            // stop_listening(): straight to power down
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Fu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Cu8],
                vec![0xEu8, 0u8],
            ),
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.start_listening().unwrap();
        assert!(radio.listening);
        radio.stop_listening().unwrap();
        assert!(!radio.listening);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn mode_derivation_table() {
        let ce_expectations = [PinTransaction::set(PinState::High)];
        let spi_expectations = spi_test_expects![
            // power bit clear
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Cu8]),
            // powered, CE low
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            // powered, CE high, RX-mode bit set
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Fu8]),
            // powered, CE high, TX queue empty
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0x11u8]),
            // powered, CE high, TX queue holding data
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0x01u8]),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.current_mode().unwrap(), Mode::PowerDown);
        assert_eq!(radio.current_mode().unwrap(), Mode::Standby1);
        radio._ce.set_high().unwrap();
        assert_eq!(radio.current_mode().unwrap(), Mode::Rx);
        assert_eq!(radio.current_mode().unwrap(), Mode::Standby2);
        assert_eq!(radio.current_mode().unwrap(), Mode::Tx);
        spi.done();
        ce_pin.done();
    }
}
