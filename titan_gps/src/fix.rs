use bitflags::bitflags;
use chrono::NaiveTime;

use crate::nav::{Hemisphere, NavState};

bitflags! {
    /// Selects fields of a [`FixData`] record
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FixFields: u8 {
        const TIME = 0x01;
        const LATITUDE = 0x02;
        const LAT_DIRECTION = 0x04;
        const LONGITUDE = 0x08;
        const LONG_DIRECTION = 0x10;
        const ALTITUDE = 0x20;
        const SAT_NUMBER = 0x40;
        const GEO_SEPARATION = 0x80;
    }
}

/// Last known value of every tracked fix field.
///
/// A field is `None` until a sentence carrying it has been parsed during this
/// session. Afterwards it keeps its last value, even if later sentences do not
/// carry it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixData {
    pub time: Option<NaiveTime>,
    /// Decimal degrees, unsigned; see `lat_direction`
    pub latitude: Option<f64>,
    pub lat_direction: Option<Hemisphere>,
    /// Decimal degrees, unsigned; see `long_direction`
    pub longitude: Option<f64>,
    pub long_direction: Option<Hemisphere>,
    /// Meters above mean sea level
    pub altitude: Option<f64>,
    pub sat_number: Option<u8>,
    /// Meters between geoid and ellipsoid
    pub geo_separation: Option<f64>,
}

/// Result of copying the parser state into a [`FixData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    /// Fields that received a different value
    pub updated: FixFields,
    /// Fields the parser has no value for yet; their previous value is kept
    pub missing: FixFields,
}

impl FixData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every field available in `nav`. Unavailable fields are skipped
    /// without touching the rest. Only fields whose value actually changed
    /// are reported as updated.
    pub fn extract(&mut self, nav: &NavState) -> Extraction {
        let mut available = FixFields::empty();
        let mut updated = FixFields::empty();

        if let Some(time) = nav.timestamp {
            available |= FixFields::TIME;
            updated |= store(&mut self.time, time, FixFields::TIME);
        }
        if let Some(latitude) = nav.latitude {
            available |= FixFields::LATITUDE | FixFields::LAT_DIRECTION;
            updated |= store(&mut self.latitude, latitude.degrees, FixFields::LATITUDE);
            updated |= store(
                &mut self.lat_direction,
                latitude.hemisphere,
                FixFields::LAT_DIRECTION,
            );
        }
        if let Some(longitude) = nav.longitude {
            available |= FixFields::LONGITUDE | FixFields::LONG_DIRECTION;
            updated |= store(&mut self.longitude, longitude.degrees, FixFields::LONGITUDE);
            updated |= store(
                &mut self.long_direction,
                longitude.hemisphere,
                FixFields::LONG_DIRECTION,
            );
        }
        if let Some(altitude) = nav.altitude {
            available |= FixFields::ALTITUDE;
            updated |= store(&mut self.altitude, altitude, FixFields::ALTITUDE);
        }
        if let Some(satellites) = nav.satellites_in_use {
            available |= FixFields::SAT_NUMBER;
            updated |= store(&mut self.sat_number, satellites, FixFields::SAT_NUMBER);
        }
        if let Some(separation) = nav.geoid_height {
            available |= FixFields::GEO_SEPARATION;
            updated |= store(&mut self.geo_separation, separation, FixFields::GEO_SEPARATION);
        }

        Extraction {
            updated,
            missing: FixFields::all().difference(available),
        }
    }

    /// Fields that hold a value.
    pub fn available(&self) -> FixFields {
        let mut fields = FixFields::empty();
        fields.set(FixFields::TIME, self.time.is_some());
        fields.set(FixFields::LATITUDE, self.latitude.is_some());
        fields.set(FixFields::LAT_DIRECTION, self.lat_direction.is_some());
        fields.set(FixFields::LONGITUDE, self.longitude.is_some());
        fields.set(FixFields::LONG_DIRECTION, self.long_direction.is_some());
        fields.set(FixFields::ALTITUDE, self.altitude.is_some());
        fields.set(FixFields::SAT_NUMBER, self.sat_number.is_some());
        fields.set(FixFields::GEO_SEPARATION, self.geo_separation.is_some());
        fields
    }
}

/// Writes `value` into `slot`, returning `flag` if that changed the slot.
fn store<T: PartialEq>(slot: &mut Option<T>, value: T, flag: FixFields) -> FixFields {
    if slot.as_ref() == Some(&value) {
        return FixFields::empty();
    }
    *slot = Some(value);
    flag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Coordinate;

    #[test]
    fn empty_state_updates_nothing() {
        let mut fix = FixData::new();
        let extraction = fix.extract(&NavState::default());
        assert_eq!(extraction.updated, FixFields::empty());
        assert_eq!(extraction.missing, FixFields::all());
        assert_eq!(fix, FixData::default());
    }

    #[test]
    fn partial_state_keeps_other_fields() {
        let mut fix = FixData {
            altitude: Some(12.0),
            ..FixData::default()
        };
        let nav = NavState {
            latitude: Some(Coordinate {
                degrees: 48.1173,
                hemisphere: Hemisphere::North,
            }),
            satellites_in_use: Some(5),
            ..NavState::default()
        };

        let extraction = fix.extract(&nav);
        assert_eq!(
            extraction.updated,
            FixFields::LATITUDE | FixFields::LAT_DIRECTION | FixFields::SAT_NUMBER
        );
        assert!(extraction.missing.contains(FixFields::ALTITUDE));
        assert_eq!(fix.altitude, Some(12.0));
        assert_eq!(fix.latitude, Some(48.1173));
        assert_eq!(fix.lat_direction, Some(Hemisphere::North));
        assert_eq!(fix.sat_number, Some(5));
        assert_eq!(
            fix.available(),
            extraction.updated | FixFields::ALTITUDE
        );
    }

    #[test]
    fn unchanged_values_are_not_reported() {
        let nav = NavState {
            timestamp: NaiveTime::from_hms_opt(12, 35, 19),
            latitude: Some(Coordinate {
                degrees: 48.1173,
                hemisphere: Hemisphere::North,
            }),
            altitude: Some(545.4),
            ..NavState::default()
        };
        let mut fix = FixData::new();
        let first = fix.extract(&nav);
        assert_eq!(
            first.updated,
            FixFields::TIME | FixFields::LATITUDE | FixFields::LAT_DIRECTION | FixFields::ALTITUDE
        );

        let again = fix.extract(&nav);
        assert_eq!(again.updated, FixFields::empty());
        assert_eq!(again.missing, first.missing);

        let moved = NavState {
            timestamp: NaiveTime::from_hms_opt(12, 35, 20),
            ..nav
        };
        assert_eq!(fix.extract(&moved).updated, FixFields::TIME);
    }
}
