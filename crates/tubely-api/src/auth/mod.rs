//! Bearer token authentication

pub mod jwt;
pub mod models;

pub use jwt::{JwtClaims, JwtService};
pub use models::AuthUser;
