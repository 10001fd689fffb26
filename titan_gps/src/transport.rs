//! Register-addressed access to the receiver's NMEA FIFO.
//!
//! The XA1110 streams its sentences through a single register. Each bus read
//! drains bytes from the receiver's internal buffer; once that buffer is empty
//! every read starts with a line feed.

use log::{debug, trace};

use crate::{
    config::validate_budget,
    constants::{DATA_STREAM_REGISTER, IDLE_BYTE, MAX_I2C_BUFFER},
    error::Error,
};

/// A bus able to read a block of bytes from a device register. Implement this
/// for your I2C driver, or enable the `embedded-hal` feature and wrap any
/// `embedded_hal::i2c::I2c` in an [`I2cBus`].
pub trait RegisterBus {
    type Error;

    /// Fill `buf` with bytes read from `register` of the device at `address`.
    /// Blocks until the transaction completes.
    fn read_block(&mut self, address: u8, register: u8, buf: &mut [u8])
        -> Result<(), Self::Error>;

    /// Returns whether a device acknowledges `address`.
    fn is_device_connected(&mut self, address: u8) -> bool;
}

impl<T> RegisterBus for &mut T
where
    T: RegisterBus,
{
    type Error = T::Error;

    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        (*self).read_block(address, register, buf)
    }

    fn is_device_connected(&mut self, address: u8) -> bool {
        (*self).is_device_connected(address)
    }
}

/// Pulls up to `total_budget` bytes from the data register, `max_chunk` bytes
/// per transaction.
///
/// Reading stops early as soon as a chunk starts with the idle byte (`0x0A`);
/// that chunk is still part of the result. Bytes map 1:1 onto characters.
pub fn read_raw<B>(
    bus: &mut B,
    address: u8,
    total_budget: usize,
    max_chunk: usize,
) -> Result<String, Error<B::Error>>
where
    B: RegisterBus + ?Sized,
{
    validate_budget(total_budget, max_chunk)?;

    let mut raw = String::with_capacity(total_budget);
    let mut scratch = [0u8; MAX_I2C_BUFFER];
    let mut remaining = total_budget;
    let mut transactions = 0usize;

    while remaining != 0 {
        let len = remaining.min(max_chunk);
        let chunk = &mut scratch[..len];
        bus.read_block(address, DATA_STREAM_REGISTER, chunk)
            .map_err(Error::Transport)?;
        transactions += 1;
        remaining -= len;
        trace!(
            "read {} bytes from {:#04x} ({} left in budget)",
            len,
            address,
            remaining
        );

        raw.extend(chunk.iter().map(|&b| char::from(b)));

        if chunk[0] == IDLE_BYTE {
            debug!(
                "receiver buffer drained after {} transactions, {} bytes unread",
                transactions, remaining
            );
            break;
        }
    }

    Ok(raw)
}

#[cfg(feature = "embedded-hal")]
mod hal {
    use embedded_hal::i2c::I2c;

    use super::RegisterBus;

    /// Adapter exposing an `embedded-hal` I2C bus as a [`RegisterBus`].
    #[derive(Debug)]
    pub struct I2cBus<I> {
        i2c: I,
    }

    impl<I: I2c> I2cBus<I> {
        pub fn new(i2c: I) -> Self {
            Self { i2c }
        }

        /// Release the owned I2C bus
        pub fn release(self) -> I {
            self.i2c
        }
    }

    impl<I: I2c> RegisterBus for I2cBus<I> {
        type Error = I::Error;

        fn read_block(
            &mut self,
            address: u8,
            register: u8,
            buf: &mut [u8],
        ) -> Result<(), Self::Error> {
            self.i2c.write_read(address, &[register], buf)
        }

        fn is_device_connected(&mut self, address: u8) -> bool {
            self.i2c.write(address, &[]).is_ok()
        }
    }
}

#[cfg(feature = "embedded-hal")]
pub use hal::I2cBus;
