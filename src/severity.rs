use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Syslog Severities from RFC 5424, plus `UNKNOWN` for anything that has no
/// numeric code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum Severity {
    EMERG,
    ALERT,
    CRIT,
    ERR,
    WARNING,
    NOTICE,
    INFO,
    DEBUG,
    UNKNOWN,
}

impl Severity {
    /// Convert an int (as used in the wire serialization) into a `Severity`.
    ///
    /// Never fails: codes outside `0..=7` come back as `UNKNOWN`. The wire
    /// protocol only carries `pri & 7`, so in practice that never happens
    /// on the decode path.
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => Severity::EMERG,
            1 => Severity::ALERT,
            2 => Severity::CRIT,
            3 => Severity::ERR,
            4 => Severity::WARNING,
            5 => Severity::NOTICE,
            6 => Severity::INFO,
            7 => Severity::DEBUG,
            _ => Severity::UNKNOWN,
        }
    }

    /// The numeric code, or `None` for `UNKNOWN`.
    pub fn code(self) -> Option<u8> {
        let code = match self {
            Severity::EMERG => 0,
            Severity::ALERT => 1,
            Severity::CRIT => 2,
            Severity::ERR => 3,
            Severity::WARNING => 4,
            Severity::NOTICE => 5,
            Severity::INFO => 6,
            Severity::DEBUG => 7,
            Severity::UNKNOWN => return None,
        };

        Some(code)
    }

    /// Convert a syslog severity into a unique string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::EMERG => "emerg",
            Severity::ALERT => "alert",
            Severity::CRIT => "crit",
            Severity::ERR => "err",
            Severity::WARNING => "warning",
            Severity::NOTICE => "notice",
            Severity::INFO => "info",
            Severity::DEBUG => "debug",
            Severity::UNKNOWN => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let severity = match s {
            "emerg" => Severity::EMERG,
            "alert" => Severity::ALERT,
            "crit" => Severity::CRIT,
            "err" => Severity::ERR,
            "warning" => Severity::WARNING,
            "notice" => Severity::NOTICE,
            "info" => Severity::INFO,
            "debug" => Severity::DEBUG,
            "unknown" => Severity::UNKNOWN,
            _ => return Err(()),
        };

        Ok(severity)
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Severity;

    #[test]
    fn deref() {
        assert_eq!(Severity::EMERG.as_str(), "emerg");
        assert_eq!(Severity::ALERT.as_str(), "alert");
        assert_eq!(Severity::CRIT.as_str(), "crit");
        assert_eq!(Severity::ERR.as_str(), "err");
        assert_eq!(Severity::WARNING.as_str(), "warning");
        assert_eq!(Severity::NOTICE.as_str(), "notice");
        assert_eq!(Severity::INFO.as_str(), "info");
        assert_eq!(Severity::DEBUG.as_str(), "debug");
        assert_eq!(Severity::UNKNOWN.as_str(), "unknown");
    }

    #[test]
    fn codes_are_bijective() {
        for code in 0..8u16 {
            let severity = Severity::from_code(code);
            assert_ne!(severity, Severity::UNKNOWN);
            assert_eq!(severity.code(), Some(code as u8));
            assert_eq!(severity.as_str().parse(), Ok(severity));
        }
    }

    #[test]
    fn out_of_range_is_unknown() {
        assert_eq!(Severity::from_code(8), Severity::UNKNOWN);
        assert_eq!(Severity::from_code(u16::MAX), Severity::UNKNOWN);
        assert_eq!(Severity::UNKNOWN.code(), None);
    }
}
