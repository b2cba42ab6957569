//! System account identity.

use std::fmt;

/// Numeric owner of the staged files and the supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemIdentity {
    pub uid: u32,
    pub gid: u32,
}

impl fmt::Display for SystemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "uid={} gid={}", self.uid, self.gid)
    }
}
