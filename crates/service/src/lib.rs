//! `service` crate — pet domain model, validation, and the pet service.

pub mod error;
pub mod models;
pub mod service;

pub use error::{ServiceError, ValidationError};
pub use models::{ParseSpeciesError, Pet, PetFields, PetRequest, Species};
pub use service::{PetService, PET_SEQUENCE};

#[cfg(test)]
mod models_tests;
#[cfg(test)]
mod service_tests;
