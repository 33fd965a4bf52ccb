use std::fmt;

use serde::{Serialize, Serializer};

/// `ProcID`s are usually numeric PIDs; however, on some systems, they may be something else
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProcId {
    PID(u64),
    Name(String),
}

/// Any all-digit text is a PID. Leading zeros are dropped, so `0042` comes
/// back out as `42`. Digit strings past `u64::MAX` stay textual.
fn parse_pid(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    s.parse().ok()
}

impl From<u32> for ProcId {
    fn from(pid: u32) -> Self {
        ProcId::PID(u64::from(pid))
    }
}

impl From<u64> for ProcId {
    fn from(pid: u64) -> Self {
        ProcId::PID(pid)
    }
}

impl From<&str> for ProcId {
    fn from(s: &str) -> ProcId {
        match parse_pid(s) {
            Some(pid) => ProcId::PID(pid),
            None => ProcId::Name(s.to_owned()),
        }
    }
}

impl From<String> for ProcId {
    fn from(s: String) -> ProcId {
        match parse_pid(&s) {
            Some(pid) => ProcId::PID(pid),
            None => ProcId::Name(s),
        }
    }
}

impl fmt::Display for ProcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcId::PID(pid) => write!(f, "{pid}"),
            ProcId::Name(name) => f.write_str(name),
        }
    }
}

impl Serialize for ProcId {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            ProcId::PID(pid) => ser.serialize_u64(*pid),
            ProcId::Name(name) => ser.serialize_str(name),
        }
    }
}
