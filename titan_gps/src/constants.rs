pub const NMEA_SYNC_CHAR: u8 = 0x24; // '$'
pub const NMEA_FIELD_SEPARATOR: u8 = 0x2c; // ','
pub const NMEA_CHECKSUM_CHAR: u8 = 0x2a; // '*'
pub const NMEA_END_CHAR_1: u8 = 0x0d; // '\r' (<CR>)
pub const NMEA_END_CHAR_2: u8 = 0x0a; // '\n' (<LF>)
pub(crate) const NMEA_CHECKSUM_LEN: usize = 2;
/// Longest sentence the parser buffers before giving up on it. Larger than
/// the 82 characters NMEA-0183 allows, MediaTek proprietary sentences overrun it.
pub const SENTENCE_LIMIT: usize = 90;

/// Default 7-bit I2C address of the XA1110 receiver.
pub const DEFAULT_ADDRESS: u8 = 0x10;
/// The receiver exposes its whole NMEA stream through this register.
pub const DATA_STREAM_REGISTER: u8 = 0x00;
/// Hard per-transaction limit of the bus driver.
pub const MAX_I2C_BUFFER: usize = 32;
/// Bytes pulled from the receiver in one poll cycle.
pub const MAX_GPS_BUFFER: usize = 255;
/// First byte of a chunk read from an empty receiver FIFO.
pub const IDLE_BYTE: u8 = NMEA_END_CHAR_2;
