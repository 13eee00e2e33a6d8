//! Core domain models for the pet service.
//!
//! [`PetRequest`] is what callers send, [`PetFields`] is a request that has
//! passed validation, and [`Pet`] is a stored record. Conversion to and from
//! the `pets` table row happens here so the `db` crate stays domain-free.

use chrono::{DateTime, Utc};
use db::PetRow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ValidationError;

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// Supported animal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Dog,
    Cat,
    Monkey,
    Rabbit,
    Bird,
    Fish,
    Hamster,
}

impl Species {
    pub const ALL: [Species; 7] = [
        Self::Dog,
        Self::Cat,
        Self::Monkey,
        Self::Rabbit,
        Self::Bird,
        Self::Fish,
        Self::Hamster,
    ];

    /// The upper-case name used on the wire and in the `species` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "DOG",
            Self::Cat => "CAT",
            Self::Monkey => "MONKEY",
            Self::Rabbit => "RABBIT",
            Self::Bird => "BIRD",
            Self::Fish => "FISH",
            Self::Hamster => "HAMSTER",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown species: {0}")]
pub struct ParseSpeciesError(pub String);

impl std::str::FromStr for Species {
    type Err = ParseSpeciesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|species| species.as_str() == s)
            .ok_or_else(|| ParseSpeciesError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PetRequest
// ---------------------------------------------------------------------------

/// Caller-supplied fields for create and update. Not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRequest {
    pub name: String,
    pub species: Species,
    #[serde(default)]
    pub age: Option<i32>,
    pub owner_name: String,
}

impl PetRequest {
    pub fn new(
        name: impl Into<String>,
        species: Species,
        age: Option<i32>,
        owner_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            species,
            age,
            owner_name: owner_name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PetFields
// ---------------------------------------------------------------------------

// Counted in Unicode scalar values, so "🐶" is one character.
const MIN_NAME_LEN: usize = 2;

/// Pet fields that satisfy every validation rule.
///
/// The only way to obtain one is [`PetFields::new`] (or `TryFrom<PetRequest>`),
/// so holding a `PetFields` proves the rules were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetFields {
    name: String,
    species: Species,
    age: Option<i32>,
    owner_name: String,
}

impl PetFields {
    /// Validate in order name, age, owner name; stop at the first violation.
    pub fn new(
        name: String,
        species: Species,
        age: Option<i32>,
        owner_name: String,
    ) -> Result<Self, ValidationError> {
        if name.chars().count() < MIN_NAME_LEN {
            return Err(ValidationError::NameTooShort);
        }
        if age.is_some_and(|age| age < 0) {
            return Err(ValidationError::NegativeAge);
        }
        if owner_name.chars().count() < MIN_NAME_LEN {
            return Err(ValidationError::OwnerNameTooShort);
        }
        Ok(Self {
            name,
            species,
            age,
            owner_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Build the row stored for a brand new pet.
    pub(crate) fn to_new_row(&self, id: i64, now: DateTime<Utc>) -> PetRow {
        PetRow {
            id,
            name: self.name.clone(),
            species: self.species.as_str().to_string(),
            age: self.age,
            owner_name: Some(self.owner_name.clone()),
            created_at: now,
            last_modified: now,
        }
    }

    /// Overwrite the mutable columns of `existing`, keeping id and creation time.
    pub(crate) fn apply_to(self, existing: PetRow, now: DateTime<Utc>) -> PetRow {
        PetRow {
            name: self.name,
            species: self.species.as_str().to_string(),
            age: self.age,
            owner_name: Some(self.owner_name),
            last_modified: now,
            ..existing
        }
    }
}

impl TryFrom<PetRequest> for PetFields {
    type Error = ValidationError;

    fn try_from(request: PetRequest) -> Result<Self, Self::Error> {
        Self::new(request.name, request.species, request.age, request.owner_name)
    }
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// A stored pet record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: Species,
    pub age: Option<i32>,
    /// Nullable at the storage layer even though requests require it.
    pub owner_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl TryFrom<PetRow> for Pet {
    type Error = ParseSpeciesError;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            species: row.species.parse()?,
            name: row.name,
            age: row.age,
            owner_name: row.owner_name,
            created_at: row.created_at,
            last_modified: row.last_modified,
        })
    }
}
