//! In-memory representation of a single Syslog message.

use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::{EncodingErrorKind, Error};
use crate::facility::Facility;
use crate::procid::ProcId;
use crate::rfc5424::{ParsedMessage, NILVALUE};
use crate::severity::Severity;
use crate::structured_data::StructuredData;
use crate::timestamp::Timestamp;

/// A RFC5424-protocol syslog message.
///
/// Built either by parsing ([`Message::from_str`], [`crate::parse_message`])
/// or with [`Message::builder`]; there are no setters afterwards. Optional
/// header fields are `None` where the wire carries the NILVALUE `-`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    severity: Severity,
    facility: Facility,
    version: u16,
    timestamp: Option<Timestamp>,
    hostname: Option<String>,
    appname: Option<String>,
    procid: Option<ProcId>,
    msgid: Option<String>,
    structured_data: StructuredData,
    msg: Option<String>,
}

impl Message {
    /// Start a message with the minimal defaults of the RFC: version 1 and
    /// every other field absent.
    pub fn builder(severity: Severity, facility: Facility) -> MessageBuilder {
        MessageBuilder {
            message: Message {
                severity,
                facility,
                version: 1,
                timestamp: None,
                hostname: None,
                appname: None,
                procid: None,
                msgid: None,
                structured_data: StructuredData::new(),
                msg: None,
            },
        }
    }

    /// Semantic half of decoding: split PRI, flatten structured data and
    /// coerce PROCID. Never fails; out of range PRI parts become `UNKNOWN`.
    pub fn from_parsed(parsed: ParsedMessage<'_>) -> Self {
        let ParsedMessage {
            header,
            structured_data,
            msg,
        } = parsed;

        let severity = Severity::from_code(header.pri & 0x7);
        let facility = Facility::from_code(header.pri >> 3);
        if facility == Facility::UNKNOWN {
            trace!(pri = header.pri, "facility out of range, decoding as unknown");
        }

        let mut sd = StructuredData::new();
        for element in structured_data {
            let entry = sd.insert_element(element.id);
            for (name, value) in element.params {
                entry.insert(name, value);
            }
        }

        Message {
            severity,
            facility,
            version: header.version,
            timestamp: header.timestamp.map(Timestamp::from),
            hostname: header.hostname.map(str::to_owned),
            appname: header.appname.map(str::to_owned),
            procid: header.procid.map(ProcId::from),
            msgid: header.msgid.map(str::to_owned),
            structured_data: sd,
            msg: msg.map(str::to_owned),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn facility(&self) -> Facility {
        self.facility
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref()
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    pub fn appname(&self) -> Option<&str> {
        self.appname.as_deref()
    }

    pub fn procid(&self) -> Option<&ProcId> {
        self.procid.as_ref()
    }

    pub fn msgid(&self) -> Option<&str> {
        self.msgid.as_deref()
    }

    pub fn structured_data(&self) -> &StructuredData {
        &self.structured_data
    }

    pub fn msg(&self) -> Option<&str> {
        self.msg.as_deref()
    }

    /// `facility * 8 + severity`, or `None` if either one is unknown.
    pub fn pri(&self) -> Option<u8> {
        let facility = self.facility.code()?;
        let severity = self.severity.code()?;
        Some(facility * 8 + severity)
    }

    /// Timestamp as a calendar instant, when there is one and it is a real
    /// date. The message itself keeps the textual form.
    pub fn timestamp_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp.as_ref().and_then(Timestamp::to_datetime)
    }

    /// `<x-service>.syslog` when the `origin` element names a service,
    /// plain `syslog` otherwise.
    pub fn topic_name(&self) -> String {
        match self.structured_data.param("origin", "x-service") {
            Some(service) => format!("{service}.syslog"),
            None => "syslog".to_owned(),
        }
    }

    /// Render the message in its RFC 5424 wire form.
    ///
    /// Only the PRI parts are validated. Every other field is written as
    /// stored, even if it would not parse back.
    pub fn to_wire(&self) -> Result<String, Error> {
        let Some(facility) = self.facility.code() else {
            debug!("refusing to encode message with unknown facility");
            return Err(EncodingErrorKind::UnknownFacility.into());
        };
        let Some(severity) = self.severity.code() else {
            debug!("refusing to encode message with unknown severity");
            return Err(EncodingErrorKind::UnknownSeverity.into());
        };

        let timestamp = match &self.timestamp {
            Some(timestamp) => timestamp.render()?,
            None => Cow::Borrowed(NILVALUE),
        };
        let procid = self
            .procid
            .as_ref()
            .map_or(Cow::Borrowed(NILVALUE), |procid| Cow::Owned(procid.to_string()));

        let mut out = format!(
            "<{}>{} {} {} {} {} {} {}",
            u16::from(facility) * 8 + u16::from(severity),
            self.version,
            timestamp,
            self.hostname.as_deref().unwrap_or(NILVALUE),
            self.appname.as_deref().unwrap_or(NILVALUE),
            procid,
            self.msgid.as_deref().unwrap_or(NILVALUE),
            self.structured_data,
        );

        if let Some(msg) = &self.msg {
            out.push(' ');
            out.push_str(msg);
        }

        Ok(out)
    }
}

impl FromStr for Message {
    type Err = Error;

    /// Parse a string into a `Message` with the default parser settings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_message(s)
    }
}

impl<'a> From<ParsedMessage<'a>> for Message {
    fn from(parsed: ParsedMessage<'a>) -> Self {
        Message::from_parsed(parsed)
    }
}

/// Serializes to the flat record handed to log sinks: symbolic severity and
/// facility, `-` for absent header fields, `null` for an absent body.
impl Serialize for Message {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut state = ser.serialize_struct("Message", 10)?;
        state.serialize_field("severity", &self.severity)?;
        state.serialize_field("facility", &self.facility)?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("timestamp", &OrNil(self.timestamp.as_ref()))?;
        state.serialize_field("hostname", &OrNil(self.hostname.as_ref()))?;
        state.serialize_field("appname", &OrNil(self.appname.as_ref()))?;
        state.serialize_field("procid", &OrNil(self.procid.as_ref()))?;
        state.serialize_field("msgid", &OrNil(self.msgid.as_ref()))?;
        state.serialize_field("sd", &self.structured_data)?;
        state.serialize_field("msg", &self.msg)?;
        state.end()
    }
}

struct OrNil<T>(Option<T>);

impl<T: Serialize> Serialize for OrNil<T> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(ser),
            None => ser.serialize_str(NILVALUE),
        }
    }
}

/// Named, optional fields for a [`Message`]. Anything not set stays absent.
#[derive(Clone, Debug)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn version(mut self, version: u16) -> Self {
        self.message.version = version;
        self
    }

    /// Accepts preformatted text or seconds since the epoch (`i64`).
    pub fn timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.message.timestamp = Some(timestamp.into());
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.message.hostname = Some(hostname.into());
        self
    }

    pub fn appname(mut self, appname: impl Into<String>) -> Self {
        self.message.appname = Some(appname.into());
        self
    }

    pub fn procid(mut self, procid: impl Into<ProcId>) -> Self {
        self.message.procid = Some(procid.into());
        self
    }

    pub fn msgid(mut self, msgid: impl Into<String>) -> Self {
        self.message.msgid = Some(msgid.into());
        self
    }

    pub fn structured_data(mut self, sd: StructuredData) -> Self {
        self.message.structured_data = sd;
        self
    }

    /// Add an element with no parameters, e.g. `[sdid]`.
    pub fn sd_element(mut self, id: impl Into<String>) -> Self {
        self.message.structured_data.insert_element(id);
        self
    }

    pub fn sd_param(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.message.structured_data.insert(id, name, value);
        self
    }

    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.message.msg = Some(msg.into());
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}
