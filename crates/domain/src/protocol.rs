//! Constants and version negotiation for the pipe backend ABI.
use crate::DomainError;
use std::fmt;

pub const TAG_QUERY: &str = "Q";
pub const TAG_AXFR: &str = "AXFR";
pub const TAG_PING: &str = "PING";

pub const FIELD_SEPARATOR: u8 = b'\t';
pub const LINE_TERMINATOR: u8 = b'\n';

pub const END_REPLY: &str = "END\n";
pub const FAIL_REPLY: &str = "FAIL\n";

/// Negotiated field layout of the pipe ABI.
///
/// | version | `Q` trailing fields       | `AXFR` fields    |
/// |---------|---------------------------|------------------|
/// | 1       | remote-ip                 | id               |
/// | 2       | + local-ip                | id               |
/// | 3       | + local-ip, subnet        | id               |
/// | 4       | + local-ip, subnet        | id, zone name    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbiVersion(u8);

impl AbiVersion {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub const V1: AbiVersion = AbiVersion(1);
    pub const V2: AbiVersion = AbiVersion(2);
    pub const V3: AbiVersion = AbiVersion(3);
    pub const V4: AbiVersion = AbiVersion(4);

    pub fn new(version: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&version) {
            Ok(Self(version))
        } else {
            Err(DomainError::UnsupportedAbiVersion(version.to_string()))
        }
    }

    /// The exact handshake line the DNS server must send, without terminator.
    pub fn greeting(&self) -> String {
        format!("HELO\t{}", self.0)
    }

    pub fn carries_local_ip(&self) -> bool {
        self.0 >= 2
    }

    pub fn carries_subnet(&self) -> bool {
        self.0 >= 3
    }

    pub fn axfr_carries_zone(&self) -> bool {
        self.0 >= 4
    }
}

impl Default for AbiVersion {
    fn default() -> Self {
        Self::V4
    }
}

impl fmt::Display for AbiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
