use bitfield_struct::bitfield;

use crate::CrcMode;

/// A view of the chip's CONFIG register.
///
/// The driver never shadows this register: every mutation starts from a
/// fresh readback, so the view cannot drift from the hardware.
#[bitfield(u8, new = false, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    /// Masks the RX-data-ready event off the IRQ pin when set.
    #[bits(1, access = None)]
    mask_rx_dr: bool,

    /// Masks the TX-data-sent event off the IRQ pin when set.
    #[bits(1, access = None)]
    mask_tx_ds: bool,

    /// Masks the retries-exhausted event off the IRQ pin when set.
    #[bits(1, access = None)]
    mask_max_rt: bool,

    #[bits(2, access = None)]
    crc: u8,

    /// The power bit. Clear means the crystal is off.
    pub power: bool,

    /// Receive-mode bit: set for RX, clear for TX.
    pub prim_rx: bool,
}

impl Config {
    pub(crate) const CRC_MASK: u8 = 0x0C;

    pub fn with_crc(self, mode: CrcMode) -> Self {
        Self::from_bits(self.into_bits() & !Self::CRC_MASK | mode.into_bits())
    }
}
