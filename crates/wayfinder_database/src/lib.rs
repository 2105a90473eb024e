//! Persistence layer for the Wayfinder content pipeline.
//!
//! Diesel/Postgres schema and models for the site hierarchy, plus the
//! [`ContentRepository`] trait with a pooled diesel implementation and an
//! in-memory implementation for tests.

mod connection;
mod diesel_repository;
mod in_memory;
mod models;
mod repository;
pub mod schema;

pub use connection::{PgPool, create_pool, establish_connection};
pub use diesel_repository::DieselRepository;
pub use in_memory::InMemoryRepository;
pub use models::{
    NewPage, NewSection, NewSectionContent, NewSite, NewTemplate, PageRow, SectionContentRow,
    SectionRow, SiteRow, TemplateRow,
};
pub use repository::ContentRepository;

use wayfinder_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
