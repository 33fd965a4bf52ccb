use thiserror::Error;

/// Why the grammar rejected a message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("unexpected eof")]
    UnexpectedEndOfInput,
    #[error("expected character {0:?}")]
    ExpectedChar(char),
    #[error("too few digits in numeric field")]
    TooFewDigits,
    #[error("too many digits in numeric field")]
    TooManyDigits,
    #[error("version must not start with 0")]
    InvalidVersion,
    #[error("malformed timestamp")]
    InvalidTimestamp,
    #[error("empty {0}")]
    EmptyField(&'static str),
    #[error("{field} is longer than {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("disallowed character in {0}")]
    DisallowedCharacter(&'static str),
    #[error("unterminated structured data element")]
    UnterminatedStructuredData,
    #[error("unexpected input after structured data")]
    TrailingData,
    #[error("input of {size} bytes exceeds the limit of {max}")]
    InputTooLarge { size: usize, max: usize },
}

/// Why a message could not be rendered to the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodingErrorKind {
    #[error("unknown severity has no numeric code")]
    UnknownSeverity,
    #[error("unknown facility has no numeric code")]
    UnknownFacility,
    #[error("epoch timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The raw text does not match the RFC 5424 grammar. `message` is the
    /// offending input, verbatim.
    #[error("Unable to parse message ({kind} at byte {position}): {message:?}")]
    Syntax {
        kind: SyntaxErrorKind,
        position: usize,
        message: String,
    },

    #[error("Unable to encode message: {0}")]
    Encoding(#[from] EncodingErrorKind),
}

impl Error {
    pub(crate) fn syntax(kind: SyntaxErrorKind, position: usize, raw: &str) -> Self {
        Error::Syntax {
            kind,
            position,
            message: raw.to_owned(),
        }
    }

    /// Fixed, human readable description of the failure class.
    pub fn description(&self) -> &'static str {
        match self {
            Error::Syntax { .. } => "Unable to parse message",
            Error::Encoding(_) => "Unable to encode message",
        }
    }

    /// The raw text that failed to parse, if this is a syntax error.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Error::Syntax { message, .. } => Some(message),
            Error::Encoding(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display() {
        let err = Error::syntax(SyntaxErrorKind::ExpectedChar('<'), 0, "garbage");
        let msg = err.to_string();
        assert!(msg.starts_with("Unable to parse message"));
        assert!(msg.contains("'<'"));
        assert!(msg.contains("\"garbage\""));
        assert_eq!(err.description(), "Unable to parse message");
        assert_eq!(err.raw(), Some("garbage"));
    }

    #[test]
    fn encoding_error_display() {
        let err = Error::from(EncodingErrorKind::UnknownFacility);
        assert_eq!(
            err.to_string(),
            "Unable to encode message: unknown facility has no numeric code"
        );
        assert_eq!(err.raw(), None);
    }
}
