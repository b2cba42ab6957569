//! Infrastructure implementation of the `UserDatabase` port using `nix`.

use anyhow::{Context, Result};
use nix::unistd::User;

use crate::application::ports::UserDatabase;
use crate::domain::SystemIdentity;

/// Reads accounts through the C library's passwd lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemUsers;

impl UserDatabase for SystemUsers {
    fn lookup(&self, name: &str) -> Result<Option<SystemIdentity>> {
        let user = User::from_name(name).with_context(|| format!("looking up user '{name}'"))?;
        Ok(user.map(|u| SystemIdentity {
            uid: u.uid.as_raw(),
            gid: u.gid.as_raw(),
        }))
    }
}
