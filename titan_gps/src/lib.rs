//! # titan_gps
//!
//! Driver for the SparkFun Titan X1 (GTOP XA1110) GNSS receiver over I2C.
//!
//! The receiver streams NMEA-0183 sentences through a single data register.
//! This crate drains that register in bounded chunks, stitches fragmented
//! lines back together, validates and decodes the sentences, and keeps a
//! small record of the most recent fix.
//!
//! Talking to a Device
//! ===================
//!
//! A [`TitanGps`] session owns anything implementing [`RegisterBus`]. With the
//! `embedded-hal` feature enabled, any `embedded_hal::i2c::I2c` can be wrapped
//! in an `I2cBus`:
//! ```ignore
//! use titan_gps::{I2cBus, TitanGps};
//!
//! let mut gps = TitanGps::new(I2cBus::new(i2c));
//! if gps.begin() {
//!     gps.get_nmea_data()?;
//!     println!("{:?}", gps.fix());
//! }
//! ```
//!
//! Implementing the bus by hand is just as easy. This one plays back a
//! single sentence and then reports an empty buffer:
//! ```
//! use titan_gps::{RegisterBus, TitanGps};
//!
//! struct Replay(std::vec::IntoIter<u8>);
//!
//! impl RegisterBus for Replay {
//!     type Error = core::convert::Infallible;
//!
//!     fn read_block(&mut self, _: u8, _: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
//!         for b in buf.iter_mut() {
//!             *b = self.0.next().unwrap_or(b'\n');
//!         }
//!         Ok(())
//!     }
//!
//!     fn is_device_connected(&mut self, _: u8) -> bool {
//!         true
//!     }
//! }
//!
//! let sentence = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
//! let mut gps = TitanGps::new(Replay(sentence.to_vec().into_iter()));
//! assert!(gps.get_nmea_data().unwrap());
//! assert_eq!(gps.fix().sat_number, Some(8));
//! assert_eq!(gps.fix().altitude, Some(545.4));
//! ```
//!
//! Parsing Sentences
//! =================
//!
//! The [`NmeaParser`] can also be used on its own, for example on data from a
//! serial port. It is fed text through `consume()`, which returns an iterator
//! over the outcome of every sentence finished by that text:
//! ```
//! use titan_gps::NmeaParser;
//!
//! let mut parser = NmeaParser::new();
//! let my_raw_data = "$GPGLL,4916.45,N,12311.12,W,225444,A,*1D\r\n"; // From your serial port
//! for outcome in parser.consume(my_raw_data) {
//!     match outcome {
//!         Ok(kind) => {
//!             // The navigation state was updated from a sentence of this kind
//!         }
//!         Err(_) => {
//!             // Received a malformed sentence, the state is untouched
//!         }
//!     }
//! }
//! assert!(parser.nav().latitude.is_some());
//! ```

#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    config::DeviceConfig,
    device::TitanGps,
    error::{ConfigError, DateTimeError, Error, ParserError},
    fix::{Extraction, FixData, FixFields},
    nav::{Coordinate, FixType, Hemisphere, NavState, SatelliteInfo},
    parser::{NmeaParser, ParserIter, ParserState, ParserStats, SentenceKind},
    reassembly::reassemble,
    transport::{read_raw, RegisterBus},
};

#[cfg(feature = "embedded-hal")]
pub use crate::transport::I2cBus;

mod config;
pub mod constants;
mod device;
mod error;
mod fix;
mod nav;
mod parser;
mod reassembly;
mod transport;
