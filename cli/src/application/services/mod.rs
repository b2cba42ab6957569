//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod deps;
pub mod install;
pub mod proxy;
pub mod release;
pub mod stage;
pub mod unit;
pub mod user;
