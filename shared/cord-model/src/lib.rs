//! `Cord` Model Core
//!
//! Value types shared by every entity of the chat API client:
//! permission sets with administrator override, and snowflake identifiers
//! with their embedded creation time.
//!
//! Everything here is a pure function of its inputs and safe to use from any
//! thread.

pub mod error;
pub mod permissions;
pub mod snowflake;

#[cfg(feature = "serde")]
mod serde_util;

pub use error::{Error, Result};
pub use permissions::{Permission, PermissionLevel, PermissionSet};
pub use snowflake::{decode_identifier_timestamp, Identifiable, Snowflake};
