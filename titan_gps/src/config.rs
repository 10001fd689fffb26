use crate::{
    constants::{DEFAULT_ADDRESS, MAX_GPS_BUFFER, MAX_I2C_BUFFER},
    error::ConfigError,
};

/// Settings of one device session.
///
/// ```
/// use titan_gps::DeviceConfig;
///
/// let config = DeviceConfig {
///     address: 0x11,
///     ..DeviceConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// 7-bit I2C address of the receiver.
    pub address: u8,
    /// Total bytes pulled from the receiver per poll cycle.
    pub gps_buffer: usize,
    /// Bytes requested per bus transaction, at most [`MAX_I2C_BUFFER`].
    pub i2c_buffer: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            gps_buffer: MAX_GPS_BUFFER,
            i2c_buffer: MAX_I2C_BUFFER,
        }
    }
}

impl DeviceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_budget(self.gps_buffer, self.i2c_buffer)
    }
}

pub(crate) fn validate_budget(total_budget: usize, max_chunk: usize) -> Result<(), ConfigError> {
    if total_budget == 0 {
        return Err(ConfigError::ZeroBudget);
    }
    if max_chunk == 0 {
        return Err(ConfigError::ZeroChunk);
    }
    if max_chunk > MAX_I2C_BUFFER {
        return Err(ConfigError::ChunkTooLarge {
            max: MAX_I2C_BUFFER,
            got: max_chunk,
        });
    }
    Ok(())
}
