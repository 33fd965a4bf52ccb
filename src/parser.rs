//! Configurable entry point for decoding.
//!
//! ```
//! use syslog_rfc5424::{Facility, Parser, Severity};
//!
//! let parser = Parser::new().with_max_input_size(64 * 1024);
//! let msg = parser.parse("<34>1 2024-01-15T12:00:00Z host sshd 1234 - - Failed password").unwrap();
//! assert_eq!(msg.facility(), Facility::AUTH);
//! assert_eq!(msg.severity(), Severity::CRIT);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, SyntaxErrorKind};
use crate::message::Message;
use crate::rfc5424;

/// Parser settings. Deserializable so callers can embed it in their own
/// configuration files; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Reject inputs longer than this many bytes before running the grammar.
    /// `None` means no limit.
    pub max_input_size: Option<usize>,
}

/// Decodes raw RFC 5424 text into [`Message`]s.
///
/// Holds no state besides its configuration, so one instance can be shared
/// across threads.
#[derive(Clone, Debug, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Parser { config }
    }

    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.config.max_input_size = Some(size);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one complete message. Newlines are part of the body, not
    /// delimiters.
    pub fn parse(&self, raw: &str) -> Result<Message, Error> {
        if let Some(max) = self.config.max_input_size {
            if raw.len() > max {
                debug!(size = raw.len(), max, "syslog message exceeds size limit");
                return Err(Error::syntax(
                    SyntaxErrorKind::InputTooLarge {
                        size: raw.len(),
                        max,
                    },
                    0,
                    raw,
                ));
            }
        }

        let parsed = rfc5424::parse(raw).inspect_err(|err| {
            if let Error::Syntax { kind, position, .. } = err {
                debug!(%kind, position, "unable to parse syslog message");
            }
        })?;

        Ok(Message::from_parsed(parsed))
    }
}

/// Parse `raw` with the default configuration.
pub fn parse_message(raw: &str) -> Result<Message, Error> {
    Parser::new().parse(raw)
}
