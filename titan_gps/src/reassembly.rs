//! Splits a raw poll cycle into sentence candidates.
//!
//! A bus transaction may end in the middle of a sentence. The receiver picks
//! up where it stopped on the next transaction, so after splitting on line
//! feeds the tail of a sentence shows up as a line without the leading `$`.
//! Such a fragment is glued onto the line before it.
//!
//! Only one level of repair happens: the fragment is joined with the
//! *original* preceding line, never with an already repaired one. A sentence
//! spread over three or more transactions therefore stays broken and is later
//! rejected by the parser's checksum.

use crate::constants::{NMEA_END_CHAR_2, NMEA_SYNC_CHAR};

/// Returns the sentence candidates contained in `raw`, in stream order.
///
/// ```
/// let sentences = titan_gps::reassemble("$GPGGA,1*00\nGA,2*00\n\n$GPRMC*00\n");
/// assert_eq!(sentences, ["$GPGGA,1*00", "$GPGGA,1*00GA,2*00", "$GPRMC*00"]);
/// ```
pub fn reassemble(raw: &str) -> Vec<String> {
    let clean: Vec<&str> = raw
        .split(char::from(NMEA_END_CHAR_2))
        .filter(|line| !line.is_empty())
        .collect();

    clean
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i != 0 && !line.starts_with(char::from(NMEA_SYNC_CHAR)) {
                let mut joined = String::with_capacity(clean[i - 1].len() + line.len());
                joined.push_str(clean[i - 1]);
                joined.push_str(line);
                joined
            } else {
                (*line).to_owned()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_input_is_unchanged() {
        let raw = "$GPGGA,a*00\n$GPRMC,b*00\n$GPGSA,c*00\n";
        assert_eq!(
            reassemble(raw),
            ["$GPGGA,a*00", "$GPRMC,b*00", "$GPGSA,c*00"]
        );
    }

    #[test]
    fn empty_lines_are_dropped() {
        assert!(reassemble("").is_empty());
        assert!(reassemble("\n\n\n").is_empty());
        assert_eq!(reassemble("\n$GPGGA*00\n\n"), ["$GPGGA*00"]);
    }

    #[test]
    fn leading_fragment_is_kept() {
        assert_eq!(
            reassemble("8,M,,*47\n$GPRMC*00"),
            ["8,M,,*47", "$GPRMC*00"]
        );
    }

    #[test]
    fn fragment_joins_predecessor() {
        let raw = "$GPGGA,x,*4F\nGA,y,*1A\n$GPRMC,z*1B\n";
        assert_eq!(
            reassemble(raw),
            ["$GPGGA,x,*4F", "$GPGGA,x,*4FGA,y,*1A", "$GPRMC,z*1B"]
        );
    }

    #[test]
    fn consecutive_fragments_merge_once() {
        // each fragment is joined with the unrepaired line before it
        let raw = "$GPG\nGA,1\n,2*00\n";
        assert_eq!(reassemble(raw), ["$GPG", "$GPGGA,1", "GA,1,2*00"]);
    }

    #[test]
    fn carriage_returns_are_preserved() {
        assert_eq!(
            reassemble("$GPGGA*00\r\n$GPRMC*00\r\n"),
            ["$GPGGA*00\r", "$GPRMC*00\r"]
        );
    }
}
