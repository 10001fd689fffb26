use log::{debug, info};

use crate::{
    config::DeviceConfig,
    error::{ConfigError, Error},
    fix::{Extraction, FixData, FixFields},
    nav::NavState,
    parser::{NmeaParser, ParserStats},
    reassembly::reassemble,
    transport::{read_raw, RegisterBus},
};

type Result<T, E> = core::result::Result<T, Error<E>>;

/// A SparkFun Titan (XA1110) receiver attached to a register bus.
///
/// The session owns the bus, a persistent [`NmeaParser`] and the
/// [`FixData`] record. Polling is blocking and strictly sequential.
pub struct TitanGps<B: RegisterBus> {
    bus: B,
    config: DeviceConfig,
    parser: NmeaParser,
    fix: FixData,
}

impl<B: RegisterBus> TitanGps<B> {
    /// Returns a session for the receiver at the default address (`0x10`).
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            config: DeviceConfig::default(),
            parser: NmeaParser::new(),
            fix: FixData::new(),
        }
    }

    /// # Errors
    ///
    /// Fails if the read budget or chunk size of `config` is unusable.
    pub fn with_config(bus: B, config: DeviceConfig) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(bus)
        })
    }

    pub fn address(&self) -> u8 {
        self.config.address
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Returns whether the receiver acknowledges its address.
    pub fn is_connected(&mut self) -> bool {
        self.bus.is_device_connected(self.config.address)
    }

    /// Same as [`TitanGps::is_connected`], the receiver needs no setup.
    pub fn begin(&mut self) -> bool {
        let connected = self.is_connected();
        info!(
            "GPS at {:#04x} {}",
            self.config.address,
            if connected { "found" } else { "not responding" }
        );
        connected
    }

    /// Pulls one cycle worth of raw bytes from the receiver.
    pub fn get_raw_data(&mut self) -> Result<String, B::Error> {
        read_raw(
            &mut self.bus,
            self.config.address,
            self.config.gps_buffer,
            self.config.i2c_buffer,
        )
    }

    /// Pulls one cycle and splits it into sentence candidates.
    pub fn prepare_data(&mut self) -> Result<Vec<String>, B::Error> {
        let raw = self.get_raw_data()?;
        Ok(reassemble(&raw))
    }

    /// Runs a full cycle: read, reassemble, parse and update the fix record.
    ///
    /// Always returns `Ok(true)` once the cycle completes. Malformed sentences
    /// are dropped silently; only bus errors are reported.
    pub fn get_nmea_data(&mut self) -> Result<bool, B::Error> {
        self.poll()?;
        Ok(true)
    }

    /// Like [`TitanGps::get_nmea_data`], returning which record fields got a
    /// new value during the cycle.
    pub fn poll(&mut self) -> Result<FixFields, B::Error> {
        let sentences = self.prepare_data()?;
        debug!("parsing {} sentence candidates", sentences.len());

        let mut updated = FixFields::empty();
        for sentence in &sentences {
            self.feed_sentence(sentence);
            updated |= self.add_to_gnss_messages().updated;
        }
        Ok(updated)
    }

    /// Feeds one sentence to the parser, character by character.
    pub fn feed_sentence(&mut self, sentence: &str) {
        self.parser.feed(sentence);
    }

    /// Copies what the parser knows into the fix record, skipping fields not
    /// seen yet.
    pub fn add_to_gnss_messages(&mut self) -> Extraction {
        self.fix.extract(self.parser.nav())
    }

    pub fn fix(&self) -> &FixData {
        &self.fix
    }

    /// Everything decoded so far, including values the fix record omits.
    pub fn nav(&self) -> &NavState {
        self.parser.nav()
    }

    pub fn stats(&self) -> ParserStats {
        self.parser.stats()
    }

    /// Release the owned bus
    pub fn release(self) -> B {
        self.bus
    }
}
