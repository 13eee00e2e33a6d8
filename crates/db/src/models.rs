//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no domain behaviour.
//! Domain types live in the `service` crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// pets
// ---------------------------------------------------------------------------

/// A persisted pet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PetRow {
    pub id: i64,
    pub name: String,
    /// Upper-case species name, e.g. `DOG`.
    pub species: String,
    pub age: Option<i32>,
    pub owner_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl PetRow {
    /// True when `other` occupies the same (name, species, owner) slot.
    pub fn same_identity(&self, other: &PetRow) -> bool {
        self.name == other.name
            && self.species == other.species
            && self.owner_name == other.owner_name
    }
}
