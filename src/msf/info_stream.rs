use super::{utils, Result};
use bytes::{Buf, Bytes};
use std::fmt;

/// Format version stamped into the header stream.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InfoVersion {
    Vc2,
    Vc4,
    Vc41,
    Vc50,
    Vc98,
    Vc70Dep,
    Vc70,
    Vc80,
    Vc110,
    Vc140,
    Unknown(u32),
}

impl InfoVersion {
    pub fn new(value: u32) -> Self {
        match value {
            19941610 => Self::Vc2,
            19950623 => Self::Vc4,
            19950814 => Self::Vc41,
            19960307 => Self::Vc50,
            19970604 => Self::Vc98,
            19990604 => Self::Vc70Dep,
            20000404 => Self::Vc70,
            20030901 => Self::Vc80,
            20091201 => Self::Vc110,
            20140508 => Self::Vc140,
            n => Self::Unknown(n),
        }
    }

    pub fn value(&self) -> u32 {
        match self {
            Self::Vc2 => 19941610,
            Self::Vc4 => 19950623,
            Self::Vc41 => 19950814,
            Self::Vc50 => 19960307,
            Self::Vc98 => 19970604,
            Self::Vc70Dep => 19990604,
            Self::Vc70 => 20000404,
            Self::Vc80 => 20030901,
            Self::Vc110 => 20091201,
            Self::Vc140 => 20140508,
            Self::Unknown(n) => *n,
        }
    }

    /// Versions from VC70 on carry a GUID after the age.
    fn has_guid(&self) -> bool {
        self.value() >= Self::Vc70.value()
    }
}

impl fmt::Display for InfoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(n) => write!(f, "unknown ({n})"),
            known => write!(f, "{known:?} ({})", known.value()),
        }
    }
}

/// Decoded header stream (stream 1): version and the values that tie the
/// database to its executable.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InfoStream {
    pub version: InfoVersion,
    pub signature: u32,
    pub age: u32,
    pub guid: Option<[u8; 16]>,
    /// Undecoded remainder (named stream map).
    pub rest: Bytes,
}

impl InfoStream {
    pub fn parse(mut buf: Bytes) -> Result<Self> {
        let version = InfoVersion::new(utils::read_u32_le(&mut buf, "info stream version")?);
        let signature = utils::read_u32_le(&mut buf, "info stream signature")?;
        let age = utils::read_u32_le(&mut buf, "info stream age")?;

        let guid = if version.has_guid() {
            utils::ensure_remaining(&buf, "info stream guid", 16)?;
            let mut guid = [0u8; 16];
            buf.copy_to_slice(&mut guid);
            Some(guid)
        } else {
            None
        };

        Ok(Self {
            version,
            signature,
            age,
            guid,
            rest: buf,
        })
    }
}
