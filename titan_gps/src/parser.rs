use log::debug;

use crate::{
    constants::{
        NMEA_CHECKSUM_CHAR, NMEA_CHECKSUM_LEN, NMEA_END_CHAR_1, NMEA_END_CHAR_2,
        NMEA_FIELD_SEPARATOR, NMEA_SYNC_CHAR, SENTENCE_LIMIT,
    },
    error::ParserError,
    nav::NavState,
};

mod checksum;
mod fields;
mod sentences;

use checksum::{hex_digit, NmeaChecksumCalc};
pub use sentences::SentenceKind;

/// Where the parser is within the current sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Waiting for `$`
    Idle,
    /// Reading the address field (talker and sentence type)
    Talker,
    /// Reading a data field
    Field,
    /// Reading the two hex digits after `*`
    Checksum,
}

/// Running counters of what the parser has seen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Sentences whose checksum matched
    pub clean_sentences: u32,
    /// Sentences that updated the navigation state
    pub parsed_sentences: u32,
    /// Sentences whose checksum did not match
    pub crc_fails: u32,
    /// Sentences dropped for structural problems or undecodable fields
    pub discarded: u32,
}

/// Character driven NMEA-0183 parser.
///
/// The parser is fed one character at a time and keeps its state between
/// calls, so a sentence may be split over any number of `consume` calls.
/// Successfully decoded sentences update the [`NavState`], which is never
/// reset.
///
/// ```
/// use titan_gps::{NmeaParser, SentenceKind};
///
/// let mut parser = NmeaParser::new();
/// let mut it = parser.consume("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n");
/// assert_eq!(it.next(), Some(Ok(SentenceKind::Gga)));
/// assert_eq!(it.next(), None);
/// assert_eq!(parser.nav().satellites_in_use, Some(8));
/// ```
#[derive(Debug, Clone)]
pub struct NmeaParser {
    state: ParserState,
    segments: Vec<String>,
    checksum: NmeaChecksumCalc,
    received: u8,
    checksum_digits: usize,
    char_count: usize,
    nav: NavState,
    stats: ParserStats,
}

impl Default for NmeaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NmeaParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Idle,
            segments: Vec::with_capacity(20),
            checksum: NmeaChecksumCalc::new(),
            received: 0,
            checksum_digits: 0,
            char_count: 0,
            nav: NavState::default(),
            stats: ParserStats::default(),
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Returns an iterator over the outcome of every sentence completed
    /// (or abandoned) within `data`.
    pub fn consume<'a>(&'a mut self, data: &'a str) -> ParserIter<'a> {
        ParserIter {
            parser: self,
            chars: data.chars(),
        }
    }

    /// Runs a whole candidate through the parser, returning how many
    /// sentences in it updated the navigation state.
    pub fn feed(&mut self, sentence: &str) -> usize {
        self.consume(sentence)
            .filter(|outcome| matches!(outcome, Ok(kind) if *kind != SentenceKind::Unsupported))
            .count()
    }

    pub fn feed_all<I, S>(&mut self, sentences: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        sentences
            .into_iter()
            .map(|sentence| self.feed(sentence.as_ref()))
            .sum()
    }

    /// Advances the state machine by one character.
    ///
    /// Returns `None` while a sentence is still in progress (or no sentence
    /// has started), and the outcome once a sentence completes or is
    /// abandoned. Abandoned sentences leave the navigation state untouched.
    pub fn update(&mut self, c: char) -> Option<Result<SentenceKind, ParserError>> {
        let outcome = self.step(c);
        if let Some(Err(e)) = &outcome {
            debug!("dropping sentence: {}", e);
        }
        outcome
    }

    fn step(&mut self, c: char) -> Option<Result<SentenceKind, ParserError>> {
        if self.state == ParserState::Idle {
            if c == char::from(NMEA_SYNC_CHAR) {
                self.start();
            }
            return None;
        }

        if c == char::from(NMEA_SYNC_CHAR) {
            self.stats.discarded += 1;
            self.start();
            return Some(Err(ParserError::UnexpectedSync));
        }
        if c == char::from(NMEA_END_CHAR_1) || c == char::from(NMEA_END_CHAR_2) {
            return self.abort(ParserError::MissingChecksum);
        }
        if !(c.is_ascii_graphic() || c == ' ') {
            return self.abort(ParserError::InvalidCharacter(c));
        }
        if self.char_count >= SENTENCE_LIMIT {
            return self.abort(ParserError::SentenceTooLong {
                limit: SENTENCE_LIMIT,
            });
        }
        self.char_count += 1;

        // Only ASCII is left at this point
        let byte = c as u8;
        match self.state {
            ParserState::Idle => None,
            ParserState::Talker | ParserState::Field => {
                match byte {
                    NMEA_FIELD_SEPARATOR => {
                        self.checksum.update_byte(byte);
                        self.segments.push(String::new());
                        self.state = ParserState::Field;
                    },
                    NMEA_CHECKSUM_CHAR => self.state = ParserState::Checksum,
                    _ => {
                        self.checksum.update_byte(byte);
                        if let Some(segment) = self.segments.last_mut() {
                            segment.push(c);
                        }
                    },
                }
                None
            },
            ParserState::Checksum => match hex_digit(c) {
                Ok(digit) => {
                    self.received = (self.received << 4) | digit;
                    self.checksum_digits += 1;
                    if self.checksum_digits == NMEA_CHECKSUM_LEN {
                        Some(self.complete())
                    } else {
                        None
                    }
                },
                Err(e) => self.abort(e),
            },
        }
    }

    fn start(&mut self) {
        self.state = ParserState::Talker;
        self.segments.clear();
        self.segments.push(String::new());
        self.checksum = NmeaChecksumCalc::new();
        self.received = 0;
        self.checksum_digits = 0;
        self.char_count = 0;
    }

    fn abort(&mut self, e: ParserError) -> Option<Result<SentenceKind, ParserError>> {
        self.state = ParserState::Idle;
        self.stats.discarded += 1;
        Some(Err(e))
    }

    fn complete(&mut self) -> Result<SentenceKind, ParserError> {
        self.state = ParserState::Idle;

        if let Err(e) = self.checksum.validate_result(self.received) {
            self.stats.crc_fails += 1;
            return Err(e);
        }
        self.stats.clean_sentences += 1;

        let kind = SentenceKind::from_address(&self.segments[0]);
        match sentences::decode(kind, &self.segments, &mut self.nav) {
            Ok(()) => {
                if kind != SentenceKind::Unsupported {
                    self.stats.parsed_sentences += 1;
                }
                Ok(kind)
            },
            Err(e) => {
                self.stats.discarded += 1;
                Err(e)
            },
        }
    }
}

/// Iterator over the sentences completed by the data passed to
/// [`NmeaParser::consume`]
pub struct ParserIter<'a> {
    parser: &'a mut NmeaParser,
    chars: core::str::Chars<'a>,
}

impl Iterator for ParserIter<'_> {
    type Item = Result<SentenceKind, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        for c in self.chars.by_ref() {
            if let Some(outcome) = self.parser.update(c) {
                return Some(outcome);
            }
        }
        None
    }
}
