//! Public types shared across the driver API.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// Power Amplifier output level, in dBm (decibel-milliwatts).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Mid,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

impl PaLevel {
    pub(crate) const MASK: u8 = 0x06;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Mid => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Mid,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "Min"),
            PaLevel::Mid => defmt::write!(fmt, "Mid"),
            PaLevel::High => defmt::write!(fmt, "High"),
            PaLevel::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "Min"),
            PaLevel::Mid => write!(f, "Mid"),
            PaLevel::High => write!(f, "High"),
            PaLevel::Max => write!(f, "Max"),
        }
    }
}

/// Over-the-air data rate. Both ends of a link must agree on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// 1 Mbps
    Mbps1,
    /// 2 Mbps. Channels should be spaced at least 2 MHz apart at this rate.
    Mbps2,
    /// 250 Kbps
    Kbps250,
}

impl DataRate {
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x08,
            DataRate::Kbps250 => 0x20,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x08 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The CRC checksum width appended to every packet. Both ends must agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcMode {
    /// No checksum.
    Disabled,
    /// 8 bit checksum.
    Bit8,
    /// 16 bit checksum.
    Bit16,
}

impl CrcMode {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcMode::Disabled => 0,
            CrcMode::Bit8 => 0x08,
            CrcMode::Bit16 => 0x0C,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CrcMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcMode::Disabled => defmt::write!(fmt, "disabled"),
            CrcMode::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcMode::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcMode::Disabled => write!(f, "disabled"),
            CrcMode::Bit8 => write!(f, "8 bit"),
            CrcMode::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// The chip's operating mode, derived on demand from the power bit, the CE
/// line level, the RX-mode bit and the TX FIFO state. Never cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Crystal off; lowest consumption, slowest wake-up.
    PowerDown,
    /// Powered with CE low; ready for a quick transition to RX or TX.
    Standby1,
    /// Powered with CE high and an empty TX FIFO; transmission starts as
    /// soon as the FIFO is filled.
    Standby2,
    /// Actively listening.
    Rx,
    /// Actively transmitting. Transient: transmissions are synchronous, so
    /// this is only ever observed mid-flight (useful for diagnostics).
    Tx,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Mode::PowerDown => defmt::write!(fmt, "Power Down"),
            Mode::Standby1 => defmt::write!(fmt, "Standby-I"),
            Mode::Standby2 => defmt::write!(fmt, "Standby-II"),
            Mode::Rx => defmt::write!(fmt, "RX"),
            Mode::Tx => defmt::write!(fmt, "TX"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mode::PowerDown => write!(f, "Power Down"),
            Mode::Standby1 => write!(f, "Standby-I"),
            Mode::Standby2 => write!(f, "Standby-II"),
            Mode::Rx => write!(f, "RX"),
            Mode::Tx => write!(f, "TX"),
        }
    }
}

/// Outcome of a send that solicits a piggybacked acknowledgment payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AckResponse {
    /// The packet was never acknowledged.
    Failed,
    /// The packet was acknowledged, but the acknowledgment carried no data.
    Empty,
    /// The acknowledgment carried this many bytes, now in the caller's buffer.
    Received(u8),
}

#[cfg(feature = "defmt")]
impl defmt::Format for AckResponse {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            AckResponse::Failed => defmt::write!(fmt, "send failed"),
            AckResponse::Empty => defmt::write!(fmt, "sent, no payload"),
            AckResponse::Received(n) => defmt::write!(fmt, "sent, {} byte reply", n),
        }
    }
}

/// A view of the chip's STATUS register, captured on every bus transfer.
#[bitfield(u8, new = false, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// RX data ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// TX data sent (and acknowledged, when an acknowledgment was expected).
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// TX data failed: the retry budget was exhausted without an acknowledgment.
    #[bits(1, access = RO)]
    pub tx_df: bool,

    /// Pipe index of the payload at the head of the RX FIFO.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// TX FIFO full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

impl StatusFlags {
    /// Isolates the three interrupt flags in STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df()
        )
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::{DataRate, PaLevel, StatusFlags};

    #[test]
    fn rf_setup_bits_round_trip() {
        for level in [PaLevel::Min, PaLevel::Mid, PaLevel::High, PaLevel::Max] {
            assert_eq!(PaLevel::from_bits(level.into_bits()), level);
        }
        for rate in [DataRate::Mbps1, DataRate::Mbps2, DataRate::Kbps250] {
            assert_eq!(DataRate::from_bits(rate.into_bits()), rate);
        }
    }

    #[test]
    fn status_flags_unpack() {
        // RX_DR set, payload pending on pipe 5, TX FIFO full
        let flags = StatusFlags::from_bits(0x4B);
        assert!(flags.rx_dr());
        assert!(!flags.tx_ds());
        assert!(!flags.tx_df());
        assert_eq!(flags.rx_pipe(), 5);
        assert!(flags.tx_full());
    }
}
