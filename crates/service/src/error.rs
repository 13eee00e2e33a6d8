//! Service-level error types.

use thiserror::Error;

use crate::Species;

/// A request field that failed validation.
///
/// Checked in declaration order; only the first violation is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name length too short")]
    NameTooShort,

    #[error("age must be greater then or equal to zero")]
    NegativeAge,

    #[error("owner_name length too short")]
    OwnerNameTooShort,
}

/// Errors produced by [`crate::PetService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No pet is stored under the requested id.
    #[error("Pet with id: {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another pet already holds this (name, species, owner) tuple.
    #[error("Pet: {name} with owner: {owner_name} for species: {species} already exists")]
    AlreadyExists {
        name: String,
        owner_name: String,
        species: Species,
    },

    /// The store failed. The message is fixed; details go to the log only.
    #[error("{0}")]
    Generic(&'static str),
}
