//! Session identifiers
//!
//! Every session gets a fresh random id. Alarms carry the id of the session
//! that scheduled them so a late alarm cannot act on a newer session.

use derive_more::{Display, FromStr};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use uuid::Uuid;

/// Random tag of one playthrough, written as a hyphenated UUID
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Display,
    FromStr,
    DeserializeFromStr,
    SerializeDisplay,
)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Draws a fresh v4 id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}
