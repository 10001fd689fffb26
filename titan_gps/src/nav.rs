use std::{collections::BTreeMap, fmt};

use chrono::{NaiveDate, NaiveTime};

/// Hemisphere letter that accompanies a latitude or longitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub const fn as_char(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    pub(crate) fn latitude(s: &str) -> Option<Self> {
        match s {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            _ => None,
        }
    }

    pub(crate) fn longitude(s: &str) -> Option<Self> {
        match s {
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Unsigned decimal degrees plus the hemisphere they lie in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub degrees: f64,
    pub hemisphere: Hemisphere,
}

impl Coordinate {
    /// Signed value, negative in the southern and western hemispheres.
    pub fn signed(&self) -> f64 {
        match self.hemisphere {
            Hemisphere::North | Hemisphere::East => self.degrees,
            Hemisphere::South | Hemisphere::West => -self.degrees,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixType {
    NoFix,
    Fix2D,
    Fix3D,
}

/// Position of one satellite in view, as reported by GSV
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatelliteInfo {
    /// Degrees above the horizon
    pub elevation: Option<u8>,
    /// Degrees from true north
    pub azimuth: Option<u16>,
    /// Signal to noise ratio in dB-Hz, absent when not tracked
    pub snr: Option<u8>,
}

/// Everything the parser has learned from the sentence stream so far.
///
/// Each value stays `None` until the first sentence carrying it is parsed,
/// after that it holds the last decoded value.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NavState {
    pub timestamp: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    /// Meters above mean sea level
    pub altitude: Option<f64>,
    /// Height of the geoid above the WGS84 ellipsoid, in meters
    pub geoid_height: Option<f64>,
    pub satellites_in_use: Option<u8>,
    /// GGA fix quality indicator, 0 means no fix
    pub fix_quality: Option<u8>,
    pub fix_type: Option<FixType>,
    /// RMC status, `true` for `A`
    pub valid: Option<bool>,
    pub speed_knots: Option<f64>,
    /// Course over ground, degrees true
    pub course: Option<f64>,
    pub hdop: Option<f64>,
    pub pdop: Option<f64>,
    pub vdop: Option<f64>,
    /// PRNs listed by the last GSA
    pub satellites_used: Vec<u8>,
    pub satellites_in_view: Option<u8>,
    /// Satellites from the current GSV group, keyed by PRN
    pub satellite_data: BTreeMap<u8, SatelliteInfo>,
}
