//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod feature_confirmation_repo;
pub mod feature_repo;
pub mod location_repo;

pub use feature_confirmation_repo::FeatureConfirmationRepo;
pub use feature_repo::FeatureRepo;
pub use location_repo::LocationRepo;
