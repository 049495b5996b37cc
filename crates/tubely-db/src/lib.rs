//! Tubely record store
//!
//! The pipeline only needs to read a video record and write it back; both
//! operations sit behind the `VideoRepository` trait so the Postgres store can be
//! swapped for the in-memory one in development and tests.

pub mod db;

pub use db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
