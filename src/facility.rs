use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Syslog facilities, as numbered by RFC 5424 section 6.2.1. Anything outside
/// `0..=23` decodes as `UNKNOWN`, which cannot be encoded again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[allow(non_camel_case_types)]
pub enum Facility {
    KERN,
    USER,
    MAIL,
    DAEMON,
    AUTH,
    SYSLOG,
    LPR,
    NEWS,
    UUCP,
    CRON,
    AUTHPRIV,
    FTP,
    NTP,
    SECURITY,
    CONSOLE,
    SOLARIS_CRON,
    LOCAL0,
    LOCAL1,
    LOCAL2,
    LOCAL3,
    LOCAL4,
    LOCAL5,
    LOCAL6,
    LOCAL7,
    UNKNOWN,
}

const FACILITIES: [Facility; 24] = [
    Facility::KERN,
    Facility::USER,
    Facility::MAIL,
    Facility::DAEMON,
    Facility::AUTH,
    Facility::SYSLOG,
    Facility::LPR,
    Facility::NEWS,
    Facility::UUCP,
    Facility::CRON,
    Facility::AUTHPRIV,
    Facility::FTP,
    Facility::NTP,
    Facility::SECURITY,
    Facility::CONSOLE,
    Facility::SOLARIS_CRON,
    Facility::LOCAL0,
    Facility::LOCAL1,
    Facility::LOCAL2,
    Facility::LOCAL3,
    Facility::LOCAL4,
    Facility::LOCAL5,
    Facility::LOCAL6,
    Facility::LOCAL7,
];

impl Facility {
    /// Convert an int (as used in the wire serialization) into a `Facility`
    pub fn from_code(code: u16) -> Self {
        FACILITIES
            .get(usize::from(code))
            .copied()
            .unwrap_or(Facility::UNKNOWN)
    }

    /// The numeric code, or `None` for `UNKNOWN`.
    pub fn code(self) -> Option<u8> {
        FACILITIES
            .iter()
            .position(|fac| *fac == self)
            .map(|pos| pos as u8)
    }

    /// Convert a syslog facility into a unique string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Facility::KERN => "kern",
            Facility::USER => "user",
            Facility::MAIL => "mail",
            Facility::DAEMON => "daemon",
            Facility::AUTH => "auth",
            Facility::SYSLOG => "syslog",
            Facility::LPR => "lpr",
            Facility::NEWS => "news",
            Facility::UUCP => "uucp",
            Facility::CRON => "cron",
            Facility::AUTHPRIV => "authpriv",
            Facility::FTP => "ftp",
            Facility::NTP => "ntp",
            Facility::SECURITY => "security",
            Facility::CONSOLE => "console",
            Facility::SOLARIS_CRON => "solaris-cron",
            Facility::LOCAL0 => "local0",
            Facility::LOCAL1 => "local1",
            Facility::LOCAL2 => "local2",
            Facility::LOCAL3 => "local3",
            Facility::LOCAL4 => "local4",
            Facility::LOCAL5 => "local5",
            Facility::LOCAL6 => "local6",
            Facility::LOCAL7 => "local7",
            Facility::UNKNOWN => "unknown",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Facility::UNKNOWN),
            "solaris_cron" => Ok(Facility::SOLARIS_CRON),
            _ => FACILITIES
                .iter()
                .copied()
                .find(|fac| fac.as_str() == s)
                .ok_or(()),
        }
    }
}

impl Serialize for Facility {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.as_str())
    }
}
