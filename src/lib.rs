//! Decoder and encoder for [RFC 5424](https://tools.ietf.org/html/rfc5424) Syslog messages. Not
//! to be confused with the older [RFC 3164](https://tools.ietf.org/html/rfc3164) BSD Syslog
//! protocol, which many systems still emit and which is not supported here.
//!
//! Decoding runs in two stages: the grammar in [`rfc5424`] turns raw text into a
//! [`ParsedMessage`](rfc5424::ParsedMessage), then [`Message::from_parsed`] splits the PRI,
//! flattens the structured data and coerces the PROCID. [`Message::to_wire`] goes the other way.
//!
//! Usually, you'll just call the (re-exported) `parse_message` function with a string.
//!
//! # Example
//!
//! A simple syslog server
//!
//! ```no_run
//! use std::net::UdpSocket;
//! use std::str;
//!
//! let s = UdpSocket::bind("127.0.0.1:10514").unwrap();
//! let mut buf = [0u8; 2048];
//! loop {
//!     let (data_read, _) = s.recv_from(&mut buf).unwrap();
//!     let Ok(raw) = str::from_utf8(&buf[..data_read]) else { continue };
//!     match syslog_rfc5424::parse_message(raw) {
//!         Ok(msg) => println!("{} {} {:?} {:?}", msg.facility(), msg.severity(), msg.hostname(), msg.msg()),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```
//!
//! Building a message:
//!
//! ```
//! use syslog_rfc5424::{Facility, Message, Severity};
//!
//! let msg = Message::builder(Severity::INFO, Facility::CRON)
//!     .hostname("host1")
//!     .sd_param("meta", "sequenceId", "29")
//!     .msg("some_message")
//!     .build();
//! assert_eq!(
//!     msg.to_wire().unwrap(),
//!     r#"<78>1 - host1 - - - [meta sequenceId="29"] some_message"#
//! );
//! ```
//!
//! # Unimplemented Features
//!
//!  * Theoretically, you can send arbitrary (non-unicode) bytes for the message part of a syslog
//!    message. Rust doesn't have a convenient way to only treat *some* of a buffer as utf-8,
//!    so the input must already be a `&str`. Most "real" syslog servers barf on it anyway.
//!  * Transport framing (octet counting, TLS) is the caller's business: one call is one message.
//!

mod error;
mod facility;
mod message;
mod parser;
mod procid;
pub mod rfc5424;
mod severity;
mod structured_data;
mod timestamp;

pub use error::{EncodingErrorKind, Error, SyntaxErrorKind};
pub use facility::Facility;
pub use message::{Message, MessageBuilder};
pub use parser::{parse_message, Parser, ParserConfig};
pub use procid::ProcId;
pub use severity::Severity;
pub use structured_data::{SdElement, StructuredData};
pub use timestamp::Timestamp;
