//! A driver for the nRF24L01+ 2.4 GHz transceiver, organized around small
//! packet exchanges between nodes that share a 32-bit netmask and differ in
//! a single address byte.
//!
//! The driver is `no_std` and speaks to the chip through the
//! [`embedded-hal`](https://crates.io/crates/embedded-hal) 1.x traits: an
//! [`SpiDevice`](embedded_hal::spi::SpiDevice) owning the chip-select line,
//! an [`OutputPin`](embedded_hal::digital::OutputPin) for CE, a
//! [`DelayNs`](embedded_hal::delay::DelayNs) for the chip's settling times
//! and a [`Monotonic`] millisecond clock bounding the transmit watchdog.
//!
//! ## Basic API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`Nrf24::init()`](radio/struct.Nrf24.html#method.init)
//! - [`Nrf24::set_node_address()`](radio/struct.Nrf24.html#method.set_node_address)
//! - [`Nrf24::listen_to_address()`](radio/struct.Nrf24.html#method.listen_to_address)
//! - [`Nrf24::send()`](radio/struct.Nrf24.html#method.send)
//! - [`Nrf24::broadcast()`](radio/struct.Nrf24.html#method.broadcast)
//! - [`Nrf24::available()`](radio/struct.Nrf24.html#method.available)
//! - [`Nrf24::read()`](radio/struct.Nrf24.html#method.read)
//! - [`Nrf24::read_text()`](radio/struct.Nrf24.html#method.read_text)
//!
//! ## Advanced API
//!
//! - [`Nrf24::transmit()`](radio/struct.Nrf24.html#method.transmit)
//! - [`Nrf24::send_and_await_response()`](radio/struct.Nrf24.html#method.send_and_await_response)
//! - [`Nrf24::queue_response()`](radio/struct.Nrf24.html#method.queue_response)
//! - [`Nrf24::attempt_count()`](radio/struct.Nrf24.html#method.attempt_count)
//! - [`Nrf24::update()`](radio/struct.Nrf24.html#method.update)
//! - [`Nrf24::status_flags()`](radio/struct.Nrf24.html#method.status_flags)
//! - [`Nrf24::flush_rx()`](radio/struct.Nrf24.html#method.flush_rx)
//! - [`Nrf24::flush_tx()`](radio/struct.Nrf24.html#method.flush_tx)
//!
//! ## Configuration API
//!
//! - [`Nrf24::set_channel()`](radio/struct.Nrf24.html#method.set_channel)
//! - [`Nrf24::channel()`](radio/struct.Nrf24.html#method.channel)
//! - [`Nrf24::set_data_rate()`](radio/struct.Nrf24.html#method.set_data_rate)
//! - [`Nrf24::set_pa_level()`](radio/struct.Nrf24.html#method.set_pa_level)
//! - [`Nrf24::pa_level()`](radio/struct.Nrf24.html#method.pa_level)
//! - [`Nrf24::set_crc_mode()`](radio/struct.Nrf24.html#method.set_crc_mode)
//! - [`Nrf24::set_retries()`](radio/struct.Nrf24.html#method.set_retries)
//! - [`Nrf24::set_ack_enabled()`](radio/struct.Nrf24.html#method.set_ack_enabled)
//! - [`Nrf24::set_active()`](radio/struct.Nrf24.html#method.set_active)
//! - [`Nrf24::start_listening()`](radio/struct.Nrf24.html#method.start_listening)
//! - [`Nrf24::stop_listening()`](radio/struct.Nrf24.html#method.stop_listening)
//! - [`Nrf24::current_mode()`](radio/struct.Nrf24.html#method.current_mode)
//!
#![no_std]

mod ce;
pub mod clock;
mod types;
pub use clock::Monotonic;
pub use types::{AckResponse, CrcMode, DataRate, Mode, PaLevel, StatusFlags};
pub mod radio;
pub use radio::{Nrf24, RadioError};
