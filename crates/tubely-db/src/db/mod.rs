//! Repositories for video records
//
// Trait shared by all backends
pub mod repository;
//
// PostgreSQL backend
pub mod postgres;
//
// Process-local backend (development and tests)
pub mod memory;

pub use memory::InMemoryVideoRepository;
pub use postgres::PgVideoRepository;
pub use repository::VideoRepository;
