//! `db` crate — pure persistence layer.
//!
//! Provides the [`PetStore`] and [`SequenceGenerator`] contracts, a Postgres
//! backend with its connection pool and repository functions, and an
//! in-memory backend. No business logic lives here.

pub mod error;
pub mod memory;
pub mod models;
pub mod page;
pub mod pg;
pub mod pool;
pub mod repository;
pub mod store;

pub use error::DbError;
pub use memory::MemoryStore;
pub use models::PetRow;
pub use page::{Page, PageRequest};
pub use pg::PgStore;
pub use pool::DbPool;
pub use store::{PetStore, SequenceGenerator};
