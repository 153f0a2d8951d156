//! Pure domain logic for the accessmap backend.
//!
//! Nothing in this crate talks to the database. Repositories in
//! `accessmap-db` load rows and hand plain values to the functions here.

pub mod access_status;
pub mod error;
pub mod location;
pub mod pagination;
pub mod roles;
pub mod status;
pub mod types;
