use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bits::Config, commands, mnemonics, registers, Nrf24, RadioError};
use crate::{clock::Monotonic, CrcMode, DataRate, PaLevel};

impl<SPI, DO, DELAY, CLK> Nrf24<SPI, DO, DELAY, CLK>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
    CLK: Monotonic,
{
    /// Bring the chip from an unknown state to a configured, powered-down
    /// idle. Must precede every other operation.
    ///
    /// `netmask` is the 32-bit network prefix shared by every node this
    /// radio should interoperate with; it fills the upper 4 bytes of every
    /// hardware address. Nodes on different netmasks never hear each other.
    ///
    /// Blocks 100 ms for the chip's power-on reset.
    pub fn init(&mut self, netmask: u32) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        // a known state: power down
        self._ce.set_low().map_err(RadioError::Gpo)?;
        self.netmask = netmask;

        self._delay_impl.delay_ms(100);

        self.set_retries(15, 15)?;
        self.set_pa_level(PaLevel::Max)?;
        self.set_data_rate(DataRate::Mbps2)?;
        self.set_crc_mode(CrcMode::Bit16)?;
        self.set_channel(76)?;

        // the FEATURE register ignores writes until this magic byte unlocks it
        self._buf[0] = commands::ACTIVATE;
        self._buf[1] = 0x73;
        self.spi_transfer(2)?;

        // dynamic payloads everywhere, plus ACK payloads and on-demand
        // ACK suppression for broadcasts
        self.spi_read(1, registers::FEATURE)?;
        let features =
            self._buf[1] | mnemonics::EN_DPL | mnemonics::EN_ACK_PAY | mnemonics::EN_DYN_ACK;
        self.spi_write_byte(registers::FEATURE, features)?;

        // auto-ack on all pipes is a prerequisite for dynamic payloads
        self.spi_write_byte(registers::EN_AA, 0x3F)?;
        self.spi_write_byte(registers::DYNPD, 0x3F)?;

        // 5-byte addresses: 1 node byte + 4 netmask bytes
        self.spi_write_byte(registers::SETUP_AW, 0x03)?;

        self.clear_irq_flags()?;

        // save power until first use
        self.set_active(false)?;

        self.extra_pipes = 0;
        self.tx_address = None;
        self.pipe0_address = None;
        self.listening = false;

        // acknowledgments trade ~30% throughput for far fewer lost packets
        self.ack_enabled = true;

        self.flush_rx()?;
        self.flush_tx()?;
        Ok(())
    }

    /// Set the RF channel, 0..=127. The frequency is 2400 + channel MHz;
    /// at 2 Mbps a channel is 2 MHz wide, so space them more than 2 apart.
    pub fn set_channel(&mut self, channel: u8) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::RF_CH, channel & 0x7F)
    }

    pub fn channel(&mut self) -> Result<u8, RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RF_CH)?;
        Ok(self._buf[1] & 0x7F)
    }

    /// Both ends of a link must use the same rate.
    pub fn set_data_rate(&mut self, rate: DataRate) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RF_SETUP)?;
        let setup = self._buf[1] & !DataRate::MASK | rate.into_bits();
        self.spi_write_byte(registers::RF_SETUP, setup)
    }

    pub fn set_pa_level(&mut self, level: PaLevel) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RF_SETUP)?;
        let setup = self._buf[1] & !PaLevel::MASK | level.into_bits();
        self.spi_write_byte(registers::RF_SETUP, setup)
    }

    pub fn pa_level(&mut self) -> Result<PaLevel, RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RF_SETUP)?;
        Ok(PaLevel::from_bits(self._buf[1]))
    }

    /// Both ends of a link must use the same CRC width.
    pub fn set_crc_mode(&mut self, mode: CrcMode) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]).with_crc(mode);
        self.spi_write_byte(registers::CONFIG, config.into_bits())
    }

    /// Program the hardware retry scheme: wait `delay * 250 + 258` µs
    /// between attempts, give up after `count` retransmissions. Both
    /// arguments saturate at 15.
    pub fn set_retries(
        &mut self,
        delay: u8,
        count: u8,
    ) -> Result<(), RadioError<SPI::Error, DO::Error>> {
        self.spi_write_byte(
            registers::SETUP_RETR,
            (delay.min(15) << 4) | count.min(15),
        )
    }

    /// Whether [`send()`](Nrf24::send) solicits acknowledgments.
    pub fn set_ack_enabled(&mut self, enabled: bool) {
        self.ack_enabled = enabled;
    }

    pub fn ack_enabled(&self) -> bool {
        self.ack_enabled
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers};
    use crate::{spi_test_expects, test::mk_radio, CrcMode, DataRate, PaLevel};
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;

    #[test]
    fn init_sequence() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // retries: 15 * 250 + 258 us between up to 15 attempts
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0xFFu8],
                vec![0xEu8, 0u8],
            ),
            // PA level max
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0u8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x06u8],
                vec![0xEu8, 0u8],
            ),
            // 2 Mbps
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x06u8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x0Eu8],
                vec![0xEu8, 0u8],
            ),
            // 16-bit CRC
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x08u8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Cu8],
                vec![0xEu8, 0u8],
            ),
            // channel 76
            (
                vec![registers::RF_CH | commands::W_REGISTER, 76u8],
                vec![0xEu8, 0u8],
            ),
            // unlock FEATURE
            (vec![commands::ACTIVATE, 0x73u8], vec![0xEu8, 0u8]),
            // enable dynamic payloads, ACK payloads, no-ack-on-demand
            (vec![registers::FEATURE, 0u8], vec![0xEu8, 0u8]),
            (
                vec![registers::FEATURE | commands::W_REGISTER, 0x07u8],
                vec![0xEu8, 0u8],
            ),
            // auto-ack on all 6 pipes
            (
                vec![registers::EN_AA | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            // dynamic payload on all 6 pipes
            (
                vec![registers::DYNPD | commands::W_REGISTER, 0x3Fu8],
                vec![0xEu8, 0u8],
            ),
            // 5-byte addresses
            (
                vec![registers::SETUP_AW | commands::W_REGISTER, 0x03u8],
                vec![0xEu8, 0u8],
            ),
            // clear stale interrupt flags
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x70u8],
                vec![0xEu8, 0u8],
            ),
            // power down until first use
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x0Cu8],
                vec![0xEu8, 0u8],
            ),
            // flush both queues
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.init(0xAABBCCDD).unwrap();
        assert_eq!(radio.netmask, 0xAABBCCDD);
        assert!(radio.ack_enabled());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn channel_is_masked_to_7_bits() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::RF_CH | commands::W_REGISTER, 0x52u8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::RF_CH, 0u8], vec![0xEu8, 0xD2u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_channel(0xD2).unwrap();
        assert_eq!(radio.channel().unwrap(), 0x52);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn retries_saturate_at_15() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0xFFu8],
                vec![0xEu8, 0u8],
            ),
            (
                vec![registers::SETUP_RETR | commands::W_REGISTER, 0x53u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_retries(200, 100).unwrap();
        radio.set_retries(5, 3).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn data_rate_preserves_other_rf_setup_bits() {
        let spi_expectations = spi_test_expects![
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x2Eu8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x26u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_data_rate(DataRate::Kbps250).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn pa_level_round_trip() {
        let spi_expectations = spi_test_expects![
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x0Fu8]),
            (
                vec![registers::RF_SETUP | commands::W_REGISTER, 0x0Bu8],
                vec![0xEu8, 0u8],
            ),
            (vec![registers::RF_SETUP, 0u8], vec![0xEu8, 0x0Bu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_pa_level(PaLevel::Mid).unwrap();
        assert_eq!(radio.pa_level().unwrap(), PaLevel::Mid);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn crc_can_be_disabled() {
        let spi_expectations = spi_test_expects![
            (vec![registers::CONFIG, 0u8], vec![0xEu8, 0x0Eu8]),
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x02u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.set_crc_mode(CrcMode::Disabled).unwrap();
        spi.done();
        ce_pin.done();
    }
}
