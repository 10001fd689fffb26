use std::fmt;

/// Error returned by a device poll cycle
#[derive(Debug)]
pub enum Error<E> {
    /// The bus transaction failed. Nothing is retried.
    Transport(E),
    Config(ConfigError),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "I2C transaction failed: {:?}", e),
            Error::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl<E> std::error::Error for Error<E> where E: fmt::Debug {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroBudget,
    ZeroChunk,
    ChunkTooLarge { max: usize, got: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroBudget => f.write_str("read budget must be positive"),
            ConfigError::ZeroChunk => f.write_str("chunk size must be positive"),
            ConfigError::ChunkTooLarge { max, got } => write!(
                f,
                "chunk size {} exceeds the bus limit of {} bytes",
                got, max
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reason a sentence was dropped by the parser
#[derive(Debug, Clone, PartialEq)]
pub enum ParserError {
    InvalidChecksum {
        expect: u8,
        got: u8,
    },
    /// A character after `*` was not a hex digit.
    InvalidChecksumDigit(char),
    /// The line ended before the checksum was complete.
    MissingChecksum,
    /// A `$` arrived in the middle of a sentence.
    UnexpectedSync,
    InvalidCharacter(char),
    SentenceTooLong {
        limit: usize,
    },
    InvalidField {
        sentence: &'static str,
        field: &'static str,
    },
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::InvalidChecksum { expect, got } => write!(
                f,
                "Not valid sentence checksum, expect {:02X}, got {:02X}",
                expect, got
            ),
            ParserError::InvalidChecksumDigit(c) => {
                write!(f, "Invalid checksum digit {:?}", c)
            },
            ParserError::MissingChecksum => f.write_str("Sentence ended without a checksum"),
            ParserError::UnexpectedSync => f.write_str("Sentence restarted before completion"),
            ParserError::InvalidCharacter(c) => write!(f, "Invalid character {:?}", c),
            ParserError::SentenceTooLong { limit } => {
                write!(f, "Sentence longer than {} characters", limit)
            },
            ParserError::InvalidField { sentence, field } => {
                write!(f, "Invalid field {} of sentence {}", field, sentence)
            },
        }
    }
}

impl std::error::Error for ParserError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
        }
    }
}

impl std::error::Error for DateTimeError {}
