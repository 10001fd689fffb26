use crate::ParserError;

/// NMEA checksum calculator: XOR of every byte between `$` and `*`
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct NmeaChecksumCalc {
    xor: u8,
}

impl NmeaChecksumCalc {
    pub(crate) const fn new() -> Self {
        Self { xor: 0 }
    }

    /// XOR a whole sentence body in
    #[allow(dead_code, reason = "Used in tests")]
    pub(crate) const fn update(&mut self, body: &[u8]) {
        let mut idx = 0;
        while idx < body.len() {
            self.update_byte(body[idx]);
            idx += 1;
        }
    }

    pub(crate) const fn update_byte(&mut self, byte: u8) {
        self.xor ^= byte;
    }

    #[allow(dead_code, reason = "Used in tests")]
    pub(crate) const fn result(self) -> u8 {
        self.xor
    }

    /// Compares against the value transmitted after `*`
    pub(crate) const fn validate_result(self, received: u8) -> Result<(), ParserError> {
        if self.xor == received {
            Ok(())
        } else {
            Err(ParserError::InvalidChecksum {
                expect: received,
                got: self.xor,
            })
        }
    }
}

/// Value of one checksum hex digit. Both cases are accepted.
pub(crate) fn hex_digit(c: char) -> Result<u8, ParserError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(ParserError::InvalidChecksumDigit(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA_BODY: &[u8] = b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
    const GGA_CHECKSUM: u8 = 0x47;

    #[test]
    fn test_streaming_checksum_valid() {
        let mut calc = NmeaChecksumCalc::new();
        calc.update(GGA_BODY);
        assert_eq!(calc.validate_result(GGA_CHECKSUM), Ok(()));
    }

    #[test]
    fn test_streaming_checksum_invalid() {
        let mut calc = NmeaChecksumCalc::new();
        calc.update(GGA_BODY);
        assert_eq!(
            calc.validate_result(0x74),
            Err(ParserError::InvalidChecksum {
                expect: 0x74,
                got: GGA_CHECKSUM
            })
        );
    }

    #[test]
    fn test_streaming_checksum_incremental() {
        let mut calc = NmeaChecksumCalc::new();
        for byte in GGA_BODY {
            calc.update_byte(*byte);
        }
        assert_eq!(calc.result(), GGA_CHECKSUM);
    }

    #[test]
    fn test_empty_body_checksum() {
        assert_eq!(NmeaChecksumCalc::new().result(), 0);
    }

    #[test]
    fn test_hex_digits() {
        assert_eq!(hex_digit('4'), Ok(4));
        assert_eq!(hex_digit('F'), Ok(15));
        assert_eq!(hex_digit('f'), Ok(15));
        assert_eq!(hex_digit('G'), Err(ParserError::InvalidChecksumDigit('G')));
    }

    // Compute checksum at compile time
    #[allow(dead_code, reason = "constant time evaluated")]
    const fn is_checksum_valid(bytes: &[u8], expected: u8) -> bool {
        let mut calc = NmeaChecksumCalc::new();
        calc.update(bytes);
        calc.result() == expected
    }

    #[test]
    fn test_const_checksum_computation() {
        const _: () = {
            assert!(is_checksum_valid(b"PMTK011,MTKGPS", 0x08));
        };
    }
}
