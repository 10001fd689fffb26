//! Per sentence type decoders.
//!
//! A decoder first decodes every field it needs into locals and only then
//! writes them into the [`NavState`], so a sentence either updates the state
//! as a whole or not at all.

use crate::{
    error::ParserError,
    nav::{FixType, NavState, SatelliteInfo},
    parser::fields::{self, BadField},
};

/// Sentence types the parser knows how to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    /// Fix information: time, position, altitude, satellites in use
    Gga,
    /// Recommended minimum: time, date, position, speed, course
    Rmc,
    /// Geographic position
    Gll,
    /// Course and speed over ground
    Vtg,
    /// DOP and active satellites
    Gsa,
    /// Satellites in view
    Gsv,
    /// Checksum-valid sentence without a decoder
    Unsupported,
}

impl SentenceKind {
    /// Identifies a sentence from its address field, ignoring the talker.
    ///
    /// ```
    /// use titan_gps::SentenceKind;
    ///
    /// assert_eq!(SentenceKind::from_address("GPGGA"), SentenceKind::Gga);
    /// assert_eq!(SentenceKind::from_address("GNRMC"), SentenceKind::Rmc);
    /// assert_eq!(SentenceKind::from_address("PMTK011"), SentenceKind::Unsupported);
    /// ```
    pub fn from_address(address: &str) -> Self {
        if address.len() != 5 || !address.bytes().all(|b| b.is_ascii_uppercase()) {
            return SentenceKind::Unsupported;
        }
        match &address[2..] {
            "GGA" => SentenceKind::Gga,
            "RMC" => SentenceKind::Rmc,
            "GLL" => SentenceKind::Gll,
            "VTG" => SentenceKind::Vtg,
            "GSA" => SentenceKind::Gsa,
            "GSV" => SentenceKind::Gsv,
            _ => SentenceKind::Unsupported,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SentenceKind::Gga => "GGA",
            SentenceKind::Rmc => "RMC",
            SentenceKind::Gll => "GLL",
            SentenceKind::Vtg => "VTG",
            SentenceKind::Gsa => "GSA",
            SentenceKind::Gsv => "GSV",
            SentenceKind::Unsupported => "unsupported",
        }
    }
}

/// Read access to the data fields of a sentence, index 1 being the first
/// field after the address. Missing trailing fields read as empty.
struct Fields<'a> {
    segments: &'a [String],
    sentence: &'static str,
}

impl<'a> Fields<'a> {
    fn get(&self, index: usize) -> &'a str {
        self.segments.get(index).map_or("", String::as_str)
    }

    fn decode<T>(
        &self,
        field: &'static str,
        result: Result<Option<T>, BadField>,
    ) -> Result<Option<T>, ParserError> {
        result.map_err(|_| self.invalid(field))
    }

    fn require<T>(
        &self,
        field: &'static str,
        result: Result<Option<T>, BadField>,
    ) -> Result<T, ParserError> {
        self.decode(field, result)?.ok_or_else(|| self.invalid(field))
    }

    fn invalid(&self, field: &'static str) -> ParserError {
        ParserError::InvalidField {
            sentence: self.sentence,
            field,
        }
    }
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Decodes `segments` (address first) into `nav`.
pub(crate) fn decode(
    kind: SentenceKind,
    segments: &[String],
    nav: &mut NavState,
) -> Result<(), ParserError> {
    let fields = Fields {
        segments,
        sentence: kind.name(),
    };
    match kind {
        SentenceKind::Gga => gga(&fields, nav),
        SentenceKind::Rmc => rmc(&fields, nav),
        SentenceKind::Gll => gll(&fields, nav),
        SentenceKind::Vtg => vtg(&fields, nav),
        SentenceKind::Gsa => gsa(&fields, nav),
        SentenceKind::Gsv => gsv(&fields, nav),
        SentenceKind::Unsupported => Ok(()),
    }
}

fn gga(f: &Fields<'_>, nav: &mut NavState) -> Result<(), ParserError> {
    let timestamp = f.decode("time", fields::time(f.get(1)))?;
    let fix_quality: u8 = f.require("fix quality", fields::uint(f.get(6)))?;
    let satellites = f.decode("satellites", fields::uint(f.get(7)))?;
    let hdop = f.decode("hdop", fields::float(f.get(8)))?;

    // Position fields are only meaningful with a fix
    let position = if fix_quality != 0 {
        Some((
            f.require("latitude", fields::latitude(f.get(2), f.get(3)))?,
            f.require("longitude", fields::longitude(f.get(4), f.get(5)))?,
            f.decode("altitude", fields::float_with_unit(f.get(9)))?,
            f.decode("geoid separation", fields::float_with_unit(f.get(11)))?,
        ))
    } else {
        None
    };

    set(&mut nav.timestamp, timestamp);
    nav.fix_quality = Some(fix_quality);
    set(&mut nav.satellites_in_use, satellites);
    set(&mut nav.hdop, hdop);
    if let Some((latitude, longitude, altitude, geoid_height)) = position {
        nav.latitude = Some(latitude);
        nav.longitude = Some(longitude);
        set(&mut nav.altitude, altitude);
        set(&mut nav.geoid_height, geoid_height);
    }
    Ok(())
}

fn status(f: &Fields<'_>, index: usize) -> Result<bool, ParserError> {
    match f.get(index) {
        "A" => Ok(true),
        "V" => Ok(false),
        _ => Err(f.invalid("status")),
    }
}

fn rmc(f: &Fields<'_>, nav: &mut NavState) -> Result<(), ParserError> {
    let timestamp = f.decode("time", fields::time(f.get(1)))?;
    let valid = status(f, 2)?;
    let date = f.decode("date", fields::date(f.get(9)))?;

    let motion = if valid {
        Some((
            f.require("latitude", fields::latitude(f.get(3), f.get(4)))?,
            f.require("longitude", fields::longitude(f.get(5), f.get(6)))?,
            f.decode("speed", fields::float(f.get(7)))?,
            f.decode("course", fields::float(f.get(8)))?,
        ))
    } else {
        None
    };

    set(&mut nav.timestamp, timestamp);
    set(&mut nav.date, date);
    nav.valid = Some(valid);
    if let Some((latitude, longitude, speed, course)) = motion {
        nav.latitude = Some(latitude);
        nav.longitude = Some(longitude);
        set(&mut nav.speed_knots, speed);
        set(&mut nav.course, course);
    }
    Ok(())
}

fn gll(f: &Fields<'_>, nav: &mut NavState) -> Result<(), ParserError> {
    let timestamp = f.decode("time", fields::time(f.get(5)))?;
    let valid = status(f, 6)?;

    let position = if valid {
        Some((
            f.require("latitude", fields::latitude(f.get(1), f.get(2)))?,
            f.require("longitude", fields::longitude(f.get(3), f.get(4)))?,
        ))
    } else {
        None
    };

    set(&mut nav.timestamp, timestamp);
    nav.valid = Some(valid);
    if let Some((latitude, longitude)) = position {
        nav.latitude = Some(latitude);
        nav.longitude = Some(longitude);
    }
    Ok(())
}

fn vtg(f: &Fields<'_>, nav: &mut NavState) -> Result<(), ParserError> {
    let course = f.decode("course", fields::float(f.get(1)))?;
    let speed = f.decode("speed", fields::float(f.get(5)))?;

    set(&mut nav.course, course);
    set(&mut nav.speed_knots, speed);
    Ok(())
}

fn gsa(f: &Fields<'_>, nav: &mut NavState) -> Result<(), ParserError> {
    let fix_type = match f.require::<u8>("fix type", fields::uint(f.get(2)))? {
        1 => FixType::NoFix,
        2 => FixType::Fix2D,
        3 => FixType::Fix3D,
        _ => return Err(f.invalid("fix type")),
    };
    let mut used = Vec::with_capacity(12);
    for index in 3..=14 {
        if let Some(prn) = f.decode("satellite", fields::uint::<u8>(f.get(index)))? {
            used.push(prn);
        }
    }
    let pdop = f.decode("pdop", fields::float(f.get(15)))?;
    let hdop = f.decode("hdop", fields::float(f.get(16)))?;
    let vdop = f.decode("vdop", fields::float(f.get(17)))?;

    nav.fix_type = Some(fix_type);
    nav.satellites_used = used;
    set(&mut nav.pdop, pdop);
    set(&mut nav.hdop, hdop);
    set(&mut nav.vdop, vdop);
    Ok(())
}

fn gsv(f: &Fields<'_>, nav: &mut NavState) -> Result<(), ParserError> {
    let total: u8 = f.require("message count", fields::uint(f.get(1)))?;
    let number: u8 = f.require("message number", fields::uint(f.get(2)))?;
    if number == 0 || number > total {
        return Err(f.invalid("message number"));
    }
    let in_view: u8 = f.require("satellites in view", fields::uint(f.get(3)))?;

    let mut satellites = Vec::with_capacity(4);
    let mut index = 4;
    while index < f.segments.len() {
        if let Some(prn) = f.decode("prn", fields::uint::<u8>(f.get(index)))? {
            let info = SatelliteInfo {
                elevation: f.decode("elevation", fields::uint(f.get(index + 1)))?,
                azimuth: f.decode("azimuth", fields::uint(f.get(index + 2)))?,
                snr: f.decode("snr", fields::uint(f.get(index + 3)))?,
            };
            satellites.push((prn, info));
        }
        index += 4;
    }

    if number == 1 {
        nav.satellite_data.clear();
    }
    nav.satellites_in_view = Some(in_view);
    nav.satellite_data.extend(satellites);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::nav::Hemisphere;

    fn segments(body: &str) -> Vec<String> {
        body.split(',').map(str::to_owned).collect()
    }

    fn run(body: &str, nav: &mut NavState) -> Result<(), ParserError> {
        let segments = segments(body);
        decode(SentenceKind::from_address(&segments[0]), &segments, nav)
    }

    #[test]
    fn gga_with_fix() {
        let mut nav = NavState::default();
        run(
            "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            &mut nav,
        )
        .unwrap();
        assert_eq!(nav.timestamp, NaiveTime::from_hms_opt(12, 35, 19));
        assert_eq!(nav.satellites_in_use, Some(8));
        assert_eq!(nav.altitude, Some(545.4));
        assert_eq!(nav.geoid_height, Some(46.9));
        assert_eq!(nav.fix_quality, Some(1));
        assert_eq!(nav.hdop, Some(0.9));
        let lon = nav.longitude.unwrap();
        assert!((lon.degrees - 11.516_667).abs() < 1e-5);
        assert_eq!(lon.hemisphere, Hemisphere::East);
    }

    #[test]
    fn gga_without_fix_keeps_position() {
        let mut nav = NavState::default();
        run(
            "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            &mut nav,
        )
        .unwrap();
        let before = nav.clone();
        run("GPGGA,,,,,,0,00,99.99,,,,,,", &mut nav).unwrap();
        assert_eq!(nav.latitude, before.latitude);
        assert_eq!(nav.altitude, before.altitude);
        assert_eq!(nav.timestamp, before.timestamp);
        assert_eq!(nav.satellites_in_use, Some(0));
        assert_eq!(nav.fix_quality, Some(0));
    }

    #[test]
    fn gga_is_atomic() {
        let mut nav = NavState::default();
        let err = run(
            "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,5x5.4,M,46.9,M,,",
            &mut nav,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParserError::InvalidField {
                sentence: "GGA",
                field: "altitude"
            }
        );
        assert_eq!(nav, NavState::default());
    }

    #[test]
    fn gga_rejects_letters_as_altitude() {
        let mut nav = NavState::default();
        let err = run(
            "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,abc,M,46.9,M,,",
            &mut nav,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParserError::InvalidField {
                sentence: "GGA",
                field: "altitude"
            }
        );
        assert_eq!(nav, NavState::default());
    }

    #[test]
    fn rmc_valid() {
        let mut nav = NavState::default();
        run(
            "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W",
            &mut nav,
        )
        .unwrap();
        assert_eq!(nav.valid, Some(true));
        assert_eq!(nav.speed_knots, Some(22.4));
        assert_eq!(nav.course, Some(84.4));
        assert_eq!(nav.date, NaiveDate::from_ymd_opt(2094, 3, 23));
        assert!(nav.latitude.is_some());
        assert_eq!(nav.altitude, None);
    }

    #[test]
    fn rmc_void_has_no_position() {
        let mut nav = NavState::default();
        run("GPRMC,235947,V,,,,,,,311224,,", &mut nav).unwrap();
        assert_eq!(nav.valid, Some(false));
        assert_eq!(nav.latitude, None);
        assert_eq!(nav.timestamp, NaiveTime::from_hms_opt(23, 59, 47));
    }

    #[test]
    fn gll_position() {
        let mut nav = NavState::default();
        run("GPGLL,4916.45,N,12311.12,W,225444,A,", &mut nav).unwrap();
        assert_eq!(nav.latitude.unwrap().hemisphere, Hemisphere::North);
        assert_eq!(nav.longitude.unwrap().hemisphere, Hemisphere::West);
        assert_eq!(nav.timestamp, NaiveTime::from_hms_opt(22, 54, 44));
    }

    #[test]
    fn vtg_course_and_speed() {
        let mut nav = NavState::default();
        run("GPVTG,054.7,T,034.4,M,005.5,N,010.2,K", &mut nav).unwrap();
        assert_eq!(nav.course, Some(54.7));
        assert_eq!(nav.speed_knots, Some(5.5));
    }

    #[test]
    fn gsa_satellites_and_dop() {
        let mut nav = NavState::default();
        run("GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1", &mut nav).unwrap();
        assert_eq!(nav.fix_type, Some(FixType::Fix3D));
        assert_eq!(nav.satellites_used, [4, 5, 9, 12, 24]);
        assert_eq!(nav.pdop, Some(2.5));
        assert_eq!(nav.hdop, Some(1.3));
        assert_eq!(nav.vdop, Some(2.1));
        assert_eq!(
            run("GPGSA,A,7,,,,,,,,,,,,,,,", &mut nav).unwrap_err(),
            ParserError::InvalidField {
                sentence: "GSA",
                field: "fix type"
            }
        );
        assert_eq!(nav.fix_type, Some(FixType::Fix3D));
    }

    #[test]
    fn gsv_group() {
        let mut nav = NavState::default();
        nav.satellite_data.insert(99, SatelliteInfo::default());
        run(
            "GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45",
            &mut nav,
        )
        .unwrap();
        assert_eq!(nav.satellites_in_view, Some(8));
        assert_eq!(nav.satellite_data.len(), 4);
        assert_eq!(
            nav.satellite_data[&1],
            SatelliteInfo {
                elevation: Some(40),
                azimuth: Some(83),
                snr: Some(46)
            }
        );

        run("GPGSV,2,2,08,20,10,100,", &mut nav).unwrap();
        assert_eq!(nav.satellite_data.len(), 5);
        assert_eq!(nav.satellite_data[&20].snr, None);
    }

    #[test]
    fn unsupported_leaves_state_alone() {
        let mut nav = NavState::default();
        run("GPTXT,01,01,02,ANTSTATUS=OPEN", &mut nav).unwrap();
        assert_eq!(nav, NavState::default());
    }
}
