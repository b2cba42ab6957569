//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod account;
pub mod config;
pub mod deps;
pub mod env;
pub mod error;
pub mod layout;
pub mod release;
pub mod render;

pub use account::SystemIdentity;
pub use config::{InstllrConfig, PathsConfig, ProxyConfig};
pub use deps::{CommandPath, DependencyMap, ResolvedCommand};
pub use env::{EnvCheck, check_env};
pub use error::{EnvError, InstallError, LayoutError, ReleaseError};
pub use layout::{InstallPaths, validate_host};
pub use release::{ReleaseAsset, ReleaseInfo, hex_encode, parse_manifest};
pub use render::{ProxyDescriptor, UnitDescriptor, nginx_site, systemd_unit};
